//! Progress events emitted by the engine.
//!
//! Each engine call walks a fixed list of [`Stage`]s and hands one
//! [`ProgressEvent`] per stage to an [`Observer`]. Percentages within a call
//! never decrease and the last event of a successful call is 100.

use strum::Display;

/// A milestone of an encrypt or decrypt call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[strum(to_string = "Reading file...")]
    Reading,
    #[strum(to_string = "Computing file hash...")]
    Hashing,
    #[strum(to_string = "Generating encryption parameters...")]
    Parameters,
    #[strum(to_string = "Binding key to file...")]
    BindingKey,
    #[strum(to_string = "Deriving encryption key...")]
    DerivingKey,
    #[strum(to_string = "Encrypting data...")]
    Encrypting,
    #[strum(to_string = "Building encrypted file...")]
    Building,
    #[strum(to_string = "Preparing download...")]
    Preparing,
    #[strum(to_string = "Reading encrypted file...")]
    ReadingContainer,
    #[strum(to_string = "Parsing header...")]
    ParsingHeader,
    #[strum(to_string = "Verifying key binding...")]
    VerifyingBinding,
    #[strum(to_string = "Deriving decryption key...")]
    DerivingDecryptionKey,
    #[strum(to_string = "Decrypting data...")]
    Decrypting,
    #[strum(to_string = "Verifying file integrity...")]
    VerifyingIntegrity,
    #[strum(to_string = "Complete!")]
    Complete,
}

impl Stage {
    /// Stages of `encrypt`, in emission order.
    pub const ENCRYPT: &'static [Self] =
        &[Self::Reading, Self::Hashing, Self::Parameters, Self::BindingKey, Self::DerivingKey, Self::Encrypting, Self::Building, Self::Preparing, Self::Complete];

    /// Stages of `decrypt`, in emission order.
    pub const DECRYPT: &'static [Self] =
        &[Self::ReadingContainer, Self::ParsingHeader, Self::VerifyingBinding, Self::DerivingDecryptionKey, Self::Decrypting, Self::VerifyingIntegrity, Self::Complete];

    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::Reading | Self::ReadingContainer => 0,
            Self::Hashing | Self::ParsingHeader => 10,
            Self::VerifyingBinding => 15,
            Self::Parameters | Self::DerivingDecryptionKey => 20,
            Self::BindingKey => 25,
            Self::DerivingKey => 30,
            Self::Encrypting | Self::Decrypting => 50,
            Self::Building | Self::VerifyingIntegrity => 80,
            Self::Preparing => 95,
            Self::Complete => 100,
        }
    }
}

/// One milestone notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub percent: u8,
    pub status: String,
}

impl From<Stage> for ProgressEvent {
    fn from(stage: Stage) -> Self {
        Self { percent: stage.percent(), status: stage.to_string() }
    }
}

/// Receives progress events from the engine.
///
/// Implementations must not block for long; they run on the engine's thread
/// between cryptographic steps.
pub trait Observer {
    fn notify(&mut self, event: ProgressEvent);
}

/// Discards every event.
impl Observer for () {
    #[inline]
    fn notify(&mut self, _event: ProgressEvent) {}
}

/// Records events in order.
impl Observer for Vec<ProgressEvent> {
    fn notify(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

/// Adapts a closure into an [`Observer`].
pub struct FnObserver<F>(pub F);

impl<F: FnMut(ProgressEvent)> Observer for FnObserver<F> {
    fn notify(&mut self, event: ProgressEvent) {
        (self.0)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_monotonic(stages: &[Stage]) -> bool {
        stages.windows(2).all(|w| w[0].percent() <= w[1].percent())
    }

    #[test]
    fn test_stage_sequences_are_monotonic_and_complete() {
        for stages in [Stage::ENCRYPT, Stage::DECRYPT] {
            assert!(is_monotonic(stages));
            assert_eq!(stages.last().map(|s| s.percent()), Some(100));
        }
    }

    #[test]
    fn test_event_from_stage() {
        let event = ProgressEvent::from(Stage::DerivingKey);
        assert_eq!(event.percent, 30);
        assert_eq!(event.status, "Deriving encryption key...");
    }

    #[test]
    fn test_fn_observer() {
        let mut seen = Vec::new();
        let mut observer = FnObserver(|event: ProgressEvent| seen.push(event.percent));
        observer.notify(Stage::Hashing.into());
        observer.notify(Stage::Complete.into());
        drop(observer);
        assert_eq!(seen, [10, 100]);
    }
}

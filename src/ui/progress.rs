use indicatif::{ProgressBar, ProgressStyle};

use crate::progress::{Observer, ProgressEvent};
use crate::types::Processing;

const TEMPLATE: &str = "{prefix:.bold} [{bar:40.cyan/blue}] {pos:>3}% {msg}";

/// Percentage bar driven by engine [`ProgressEvent`]s.
///
/// Cloning shares the underlying bar, so a clone can be moved onto the
/// blocking thread that runs the engine.
#[derive(Clone)]
pub struct Bar {
    bar: ProgressBar,
}

impl Bar {
    pub fn new(processing: Processing) -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("●○ "));
        }
        bar.set_prefix(processing.to_string());

        Self { bar }
    }

    /// Removes the bar from the terminal, on success or failure.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Observer for Bar {
    fn notify(&mut self, event: ProgressEvent) {
        self.bar.set_position(u64::from(event.percent));
        self.bar.set_message(event.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Stage;

    #[test]
    fn test_bar_tracks_events() {
        let mut bar = Bar::new(Processing::Encryption);
        bar.bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());

        bar.notify(Stage::DerivingKey.into());
        assert_eq!(bar.bar.position(), 30);
        assert_eq!(bar.bar.message(), "Deriving encryption key...");

        bar.notify(Stage::Complete.into());
        assert_eq!(bar.bar.position(), 100);
    }
}

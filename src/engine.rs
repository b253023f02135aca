//! # Engine
//!
//! Orchestrates hashing, key binding, key derivation, sealing and container
//! framing into [`Engine::encrypt`] and [`Engine::decrypt`].
//!
//! An engine is a plain value built from a [`Config`]. It holds no mutable
//! state, so one instance may serve concurrent calls and several instances
//! with different configurations may coexist.
//!
//! ## Encrypt
//!
//! 1. Reject oversized input and short passwords
//! 2. SHA-256 the plaintext
//! 3. Draw salt, IV and file id
//! 4. Bind the salt to the file id, derive the key
//! 5. Seal, build the header, frame the container
//! 6. Produce the key share
//!
//! ## Decrypt
//!
//! 1. Parse and validate the container
//! 2. Refuse expired containers before any key work
//! 3. Re-derive the key with the stored iteration count
//! 4. Open the payload and re-check the content hash

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use crate::cipher::{AesGcm, ContentHash, Derive, KeyBinder, split_tag};
use crate::config::{Config, IV_LEN, SALT_LEN, validate_iterations};
use crate::encoding::{generate_file_id, random_bytes};
use crate::error::{Error, Result};
use crate::file::encrypted_file_name;
use crate::header::metadata::Metadata;
use crate::header::{Header, HeaderParams, assemble, parse_container, parse_header};
use crate::keyshare::KeyShare;
use crate::progress::{Observer, Stage};
use crate::secret::Secret;

/// Per-call encryption options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncryptOptions {
    /// Hours until the container refuses to decrypt. `None` or `0` means
    /// no expiry.
    pub expiry_hours: Option<u32>,

    /// Overrides the engine's configured PBKDF2 iteration count.
    pub iterations: Option<u32>,
}

/// Output of [`Engine::encrypt`].
pub struct Sealed {
    /// The complete `.ufenc` container.
    pub container: Vec<u8>,

    /// Suggested name for the container file.
    pub file_name: String,

    pub header: Header,

    /// Base64 key share for out-of-band delivery. As sensitive as the password.
    pub key_share: String,

    /// The password the container was sealed with, for display or hand-off.
    pub password: Secret,
}

impl std::fmt::Debug for Sealed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sealed")
            .field("container_len", &self.container.len())
            .field("file_name", &self.file_name)
            .field("header", &self.header)
            .field("key_share", &"[REDACTED]")
            .field("password", &self.password)
            .finish()
    }
}

/// Output of [`Engine::decrypt`].
#[derive(Debug)]
pub struct Opened {
    pub data: Vec<u8>,

    /// Original file name as stored in the header. Untrusted; strip any
    /// directory components before using it as a path.
    pub file_name: String,

    pub mime_type: String,
    pub header: Header,
}

/// The encrypt/decrypt facade.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the iteration count is out of range.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Encrypts `data` into a new container.
    ///
    /// `file_name` is recorded in the header and used to suggest the
    /// container's name; no filesystem access happens here.
    ///
    /// # Errors
    ///
    /// - [`Error::SizeLimit`] if `data` exceeds the configured ceiling
    /// - [`Error::WeakPassword`] if the password is shorter than the minimum
    /// - [`Error::Config`] if the iteration override or the expiry is out of range
    /// - [`Error::Random`] if the OS generator fails
    pub fn encrypt(&self, file_name: &str, data: &[u8], password: &Secret, options: EncryptOptions, observer: &mut dyn Observer) -> Result<Sealed> {
        let size = data.len() as u64;
        if size > self.config.max_file_size {
            return Err(Error::SizeLimit { size, max: self.config.max_file_size });
        }
        if password.char_count() < self.config.min_password_length {
            return Err(Error::WeakPassword { min: self.config.min_password_length });
        }

        let iterations = options.iterations.unwrap_or(self.config.iterations);
        validate_iterations(iterations).map_err(Error::Config)?;

        emit(observer, Stage::Reading);

        emit(observer, Stage::Hashing);
        let content_hash = ContentHash::new(data);

        emit(observer, Stage::Parameters);
        let salt = random_bytes::<SALT_LEN>()?;
        let iv = random_bytes::<IV_LEN>()?;
        let file_id = generate_file_id()?;
        debug!(file_id = %file_id, size, iterations, "generated encryption parameters");

        emit(observer, Stage::BindingKey);
        let bound_salt = KeyBinder::new(&salt).bind(&file_id)?;

        emit(observer, Stage::DerivingKey);
        let key = Derive::new(password).derive_key(&bound_salt, iterations);
        debug!(file_id = %file_id, "derived encryption key");

        emit(observer, Stage::Encrypting);
        let sealed = AesGcm::new(&key).seal(&iv, data)?;
        let (_, auth_tag) = split_tag(&sealed).ok_or(Error::Format("sealed output shorter than authentication tag"))?;

        emit(observer, Stage::Building);
        let encrypted_at = Utc::now();
        let key_expiry = expiry_after(encrypted_at, options.expiry_hours)?;
        let header = Header::new(HeaderParams {
            file_id: file_id.clone(),
            metadata: Metadata::from_file(file_name, size),
            salt: &salt,
            iv: &iv,
            auth_tag,
            iterations,
            encrypted_at,
            key_expiry,
            content_hash: content_hash.to_hex(),
        });
        let container = assemble(&header, &sealed)?;

        emit(observer, Stage::Preparing);
        let key_share = KeyShare::new(password, file_id.as_str(), key_expiry).encode()?;

        info!(file_id = %file_id, plaintext = size, container = container.len(), expires = key_expiry.is_some(), "file encrypted");
        emit(observer, Stage::Complete);

        Ok(Sealed {
            container,
            file_name: encrypted_file_name(file_name),
            header,
            key_share,
            password: Secret::new(password.expose_secret()),
        })
    }

    /// Decrypts a container.
    ///
    /// The iteration count comes from the header, not from this engine's
    /// configuration, so containers written with other settings still open.
    ///
    /// # Errors
    ///
    /// - [`Error::Format`], [`Error::Version`], [`Error::Header`] for
    ///   containers this implementation cannot read
    /// - [`Error::ExpiredKey`] if the header's key expiry has passed
    /// - [`Error::Decryption`] for a wrong password or altered payload
    /// - [`Error::Integrity`] if the plaintext hash does not match the header
    pub fn decrypt(&self, container: &[u8], password: &Secret, observer: &mut dyn Observer) -> Result<Opened> {
        emit(observer, Stage::ReadingContainer);

        emit(observer, Stage::ParsingHeader);
        let (header, payload) = parse_container(container)?;
        header.validate()?;

        if header.is_expired_at(Utc::now())
            && let Some(expiry) = header.key_expiry()
        {
            return Err(Error::ExpiredKey(expiry.to_rfc3339()));
        }

        let salt = header.salt_bytes()?;
        let iv = header.iv_bytes()?;
        debug!(file_id = header.file_id(), iterations = header.pbkdf2_iterations(), "parsed container header");

        emit(observer, Stage::VerifyingBinding);
        let bound_salt = KeyBinder::new(&salt).bind(header.file_id())?;

        emit(observer, Stage::DerivingDecryptionKey);
        let key = Derive::new(password).derive_key(&bound_salt, header.pbkdf2_iterations());

        emit(observer, Stage::Decrypting);
        let data = AesGcm::new(&key).open(&iv, payload)?;

        emit(observer, Stage::VerifyingIntegrity);
        ContentHash::new(&data).verify_hex(header.original_file_hash())?;

        info!(file_id = header.file_id(), plaintext = data.len(), "file decrypted");
        emit(observer, Stage::Complete);

        Ok(Opened { data, file_name: header.original_file_name().to_owned(), mime_type: header.mime_type().to_owned(), header })
    }

    /// Reads a container's header for preview without a password.
    ///
    /// Returns `None` for anything that is not a readable `.ufenc` file.
    #[must_use]
    pub fn inspect(&self, container: &[u8]) -> Option<Header> {
        parse_header(container)
    }
}

#[inline]
fn emit(observer: &mut dyn Observer, stage: Stage) {
    observer.notify(stage.into());
}

fn expiry_after(from: DateTime<Utc>, hours: Option<u32>) -> Result<Option<DateTime<Utc>>> {
    hours
        .filter(|&hours| hours > 0)
        .map(|hours| {
            TimeDelta::try_hours(i64::from(hours))
                .and_then(|delta| from.checked_add_signed(delta))
                .ok_or_else(|| Error::Config(format!("expiry of {hours} hours is out of range")))
        })
        .transpose()
}

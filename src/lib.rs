//! UFENC - password-based file encryption into `.ufenc` containers.
//!
//! A container is a self-describing `UFENC001` file: a JSON header with the
//! parameters needed to re-derive the key, followed by an AES-256-GCM
//! payload. Keys come from PBKDF2-HMAC-SHA256 over a salt that is first
//! bound to the container's file id with HMAC-SHA256, so a key derived for
//! one container is useless for any other.
//!
//! ```no_run
//! use ufenc::{Config, EncryptOptions, Engine, Secret};
//!
//! # fn main() -> ufenc::Result<()> {
//! let engine = Engine::new(Config::default())?;
//! let password = Secret::new("CorrectHorseBattery1!");
//!
//! let sealed = engine.encrypt("hello.txt", b"hello test", &password, EncryptOptions::default(), &mut ())?;
//! let opened = engine.decrypt(&sealed.container, &password, &mut ())?;
//! assert_eq!(opened.data, b"hello test");
//! # Ok(())
//! # }
//! ```

pub mod cipher;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod file;
pub mod header;
pub mod keyshare;
pub mod progress;
pub mod secret;
pub mod strength;
pub mod types;
pub mod ui;

pub use config::Config;
pub use engine::{EncryptOptions, Engine, Opened, Sealed};
pub use error::{Error, Result};
pub use header::Header;
pub use keyshare::KeyShare;
pub use progress::{Observer, ProgressEvent, Stage};
pub use secret::Secret;

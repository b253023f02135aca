//! Terminal presentation for the command line.
//!
//! - [`display`]: header preview tables, success and key share output
//! - [`progress`]: progress bar fed by engine events
//! - [`prompt`]: password and confirmation dialogs

pub mod display;
pub mod progress;
pub mod prompt;

//! Interactive prompts for passwords and confirmations.

use std::path::Path;

use anyhow::{Result, anyhow};
use inquire::validator::{StringValidator, Validation};
use inquire::{Confirm, Password, PasswordDisplayMode};

use crate::secret::Secret;

/// Prompt handler carrying the password policy of the active engine.
pub struct Prompt {
    password_min_length: usize,
}

impl Prompt {
    pub const fn new(password_min_length: usize) -> Self {
        Self { password_min_length }
    }

    /// Asks for an encryption password twice and checks the minimum length.
    pub fn prompt_encryption_password(&self) -> Result<Secret> {
        Password::new("Enter encryption password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_custom_confirmation_message("Confirm password:")
            .with_custom_confirmation_error_message("passwords do not match")
            .with_validator(MinLength(self.password_min_length))
            .prompt()
            .map(Secret::from_string)
            .map_err(|e| anyhow!("password input failed: {e}"))
    }

    /// Asks once; a wrong password surfaces as a decryption error later.
    pub fn prompt_decryption_password(&self) -> Result<Secret> {
        Self::prompt_password("Enter decryption password:")
    }

    /// Single masked entry with no policy check.
    pub fn prompt_password(message: &str) -> Result<Secret> {
        Password::new(message)
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .map(Secret::from_string)
            .map_err(|e| anyhow!("password input failed: {e}"))
    }

    pub fn confirm_file_overwrite(&self, path: &Path) -> Result<bool> {
        let filename = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::confirm(&format!("Output file {filename} already exists. Overwrite?"))
    }

    fn confirm(prompt: &str) -> Result<bool> {
        Confirm::new(prompt).with_default(false).prompt().map_err(|e| anyhow!("confirmation failed: {e}"))
    }
}

/// Character-count minimum, matching the engine's policy.
#[derive(Clone)]
struct MinLength(usize);

impl StringValidator for MinLength {
    fn validate(&self, input: &str) -> Result<Validation, inquire::CustomUserError> {
        if input.trim().is_empty() {
            return Ok(Validation::Invalid("password cannot be empty or whitespace only".into()));
        }
        if input.chars().count() < self.0 {
            return Ok(Validation::Invalid(format!("password must be at least {} characters long", self.0).into()));
        }
        Ok(Validation::Valid)
    }
}

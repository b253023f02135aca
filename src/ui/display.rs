//! Display utilities for container details and results.

use std::path::Path;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;

use crate::encoding::format_bytes;
use crate::header::Header;
use crate::strength::{Level, Strength};
use crate::types::ProcessorMode;

/// Renders the preview rows shown before a container is decrypted.
pub fn header_table(header: &Header) -> Table {
    let expiry = header.key_expiry().map_or_else(|| "never".to_owned(), |expiry| expiry.to_rfc3339());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic).set_header(vec!["Field", "Value"]);

    for (field, value) in [
        ("File name", header.original_file_name().to_owned()),
        ("Type", header.mime_type().to_owned()),
        ("Size", format_bytes(header.original_size())),
        ("Encrypted at", header.encrypted_at().map_or_else(|| header.encrypted_at_raw().to_owned(), |at| at.to_rfc3339())),
        ("Key expires", expiry),
        ("Algorithm", format!("{} / {}", header.algorithm(), header.kdf())),
        ("Iterations", header.pbkdf2_iterations().to_string()),
        ("File id", header.file_id().to_owned()),
        ("SHA-256", header.original_file_hash().to_owned()),
    ] {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }

    table
}

pub fn show_header(header: &Header) {
    println!();
    println!("{}", header_table(header));
    println!();
}

pub fn show_success(mode: ProcessorMode, path: &Path) {
    println!();
    println!("{} {}", style("✓").green(), style(format!("File {} successfully: {}", mode.past_tense(), path.display())).bold());
}

/// Prints the key share. The caller decides whether the terminal is a safe
/// place for it.
pub fn show_key_share(key_share: &str) {
    println!();
    println!("{}", style("Key share (send separately from the file):").yellow().bold());
    println!("{key_share}");
}

pub fn show_generated_password(password: &str) {
    println!();
    println!("{} {}", style("Generated password:").bold(), style(password).cyan());
    println!("{}", style("Store it now; it cannot be recovered from the encrypted file.").dim());
}

pub fn show_strength(strength: &Strength) {
    let label = match strength.level {
        Some(Level::VeryWeak | Level::Weak) => style(strength.label()).red(),
        Some(Level::Fair) => style(strength.label()).yellow(),
        Some(_) => style(strength.label()).green(),
        None => style("empty").dim(),
    };

    println!("{} {} ({}/{}, {}%)", style("Strength:").bold(), label.bold(), strength.score, crate::strength::MAX_SCORE, strength.percent);
}

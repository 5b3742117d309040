//! Cas command - normalize and checksum-verify CAS numbers offline.

use colored::Colorize;
use retort::chem::{is_valid_cas, normalize_cas};

pub fn run(values: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let mut all_valid = true;

    for raw in &values {
        match normalize_cas(raw) {
            Some(normalized) if is_valid_cas(&normalized) => {
                println!("{:20} {} {}", raw, "valid".green().bold(), normalized);
            }
            Some(normalized) => {
                all_valid = false;
                println!(
                    "{:20} {} normalized to {} but the check digit does not match",
                    raw,
                    "invalid".red().bold(),
                    normalized
                );
            }
            None => {
                all_valid = false;
                println!(
                    "{:20} {} no digits to normalize",
                    raw,
                    "invalid".red().bold()
                );
            }
        }
    }

    Ok(all_valid)
}

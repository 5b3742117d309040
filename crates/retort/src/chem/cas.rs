//! CAS registry number normalization and check-digit validation.
//!
//! CAS numbers have the canonical shape `NNNNN-NN-N`: up to seven leading
//! digits, two middle digits, and a single check digit. Real-world data
//! arrives with en-dashes, slashes, spaces, or no separators at all, so
//! normalization is deliberately permissive and never fails.

use once_cell::sync::Lazy;
use regex::Regex;

/// Any run of non-digit characters (unicode dashes, slashes, spaces, ...).
static NON_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]+").unwrap());

/// Shape of a normalized CAS number.
static CAS_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2,7}-[0-9]{2}-[0-9]$").unwrap());

/// Normalize a raw CAS value to the standard `NNNNN-NN-N` form.
///
/// Every run of non-digit characters is collapsed to a single hyphen and
/// leading/trailing hyphens are trimmed. When fewer than five digits remain
/// the cleaned string is returned unchanged; it cannot form a valid CAS
/// shape, and the caller decides what to do with it. Inputs with no digits
/// at all yield `None`.
///
/// Already-canonical input is a fixed point: `normalize_cas` is idempotent
/// for any value carrying at least five digits.
pub fn normalize_cas(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = NON_DIGIT_RUN.replace_all(trimmed, "-");
    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        return None;
    }

    let digits: String = cleaned.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 5 {
        return Some(cleaned.to_string());
    }

    let (body, check) = digits.split_at(digits.len() - 1);
    let (first, middle) = body.split_at(body.len() - 2);
    Some(format!("{first}-{middle}-{check}"))
}

/// Validate a normalized CAS number, including its check digit.
///
/// The check digit is the weighted digit sum of the body, weights counted
/// 1, 2, 3, ... from the rightmost body digit, taken mod 10.
pub fn is_valid_cas(cas: &str) -> bool {
    let cas = cas.trim();
    if !CAS_SHAPE.is_match(cas) {
        return false;
    }

    let digits: Vec<u32> = cas.chars().filter_map(|c| c.to_digit(10)).collect();
    let Some((&check, body)) = digits.split_last() else {
        return false;
    };
    let total: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| (i as u32 + 1) * d)
        .sum();

    total % 10 == check
}

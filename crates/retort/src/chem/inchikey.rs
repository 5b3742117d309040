//! InChIKey layer handling.
//!
//! A standard InChIKey is 27 characters in three hyphenated blocks. The
//! first 14 characters hash the connectivity (canonical) layer; the rest
//! encode stereochemistry, isotopes, and charge. Two compounds sharing the
//! first block but not the full key are stereoisomers of each other.

/// Length of the connectivity (canonical) block.
pub const CONNECTIVITY_LEN: usize = 14;

/// Extract the 14-character connectivity prefix of an InChIKey.
///
/// Returns `None` when the value is too short to carry a full connectivity
/// block; such values never participate in stereoisomer grouping.
pub fn connectivity_prefix(inchikey: &str) -> Option<&str> {
    if inchikey.len() >= CONNECTIVITY_LEN && inchikey.is_char_boundary(CONNECTIVITY_LEN) {
        Some(&inchikey[..CONNECTIVITY_LEN])
    } else {
        None
    }
}

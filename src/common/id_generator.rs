// src/common/id_generator.rs
//! Crockford Base32 ID generator
//!
//! Generates human-readable, prefixed IDs (e.g. U_K7NP3X for users). The
//! alphabet excludes I, L, O and U so ids survive being read out loud over
//! Discord voice chat when someone files a ticket.

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User account (U_)
    User,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
        }
    }
}

/// Generate a random Crockford Base32 string of the given length
fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID, e.g. "U_K7NP3X"
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

/// Generate a raw Crockford Base32 string without prefix.
/// Used for upload filenames and other non-entity identifiers.
pub fn generate_raw_id(length: usize) -> String {
    generate_crockford_string(length)
}

/// Generate a User ID (U_XXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_format() {
        let id = generate_user_id();
        assert!(id.starts_with("U_"));
        assert_eq!(id.len(), 8);
    }

    #[test]
    fn test_no_ambiguous_characters() {
        let id = generate_raw_id(256);
        for c in id.chars() {
            assert!(
                !matches!(c, 'I' | 'L' | 'O' | 'U'),
                "ambiguous character {} in generated id",
                c
            );
        }
    }

    #[test]
    fn test_raw_id_length() {
        assert_eq!(generate_raw_id(8).len(), 8);
        assert_eq!(generate_raw_id(48).len(), 48);
    }
}

//! Short code generation.
//!
//! Codes are drawn uniformly from the lowercase base-36 alphabet, which keeps
//! them URL-safe and case-insensitive. At the default length of 13 the code
//! space holds 36^13 (about 1.7e20) values.

use rand::Rng;

/// Characters a generated code is built from.
pub const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Default code length.
pub const DEFAULT_CODE_LENGTH: usize = 13;

/// Shortest code length accepted by configuration.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest code length accepted by configuration.
pub const MAX_CODE_LENGTH: usize = 32;

/// Generates a random short code of `length` characters.
///
/// Uniqueness is not checked here; see
/// [`crate::application::services::LinkService`] for the collision retry.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(13);
/// assert_eq!(code.len(), 13);
/// assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_default_length() {
        let code = generate_code(DEFAULT_CODE_LENGTH);
        assert_eq!(code.len(), 13);
    }

    #[test]
    fn test_generate_code_respects_length() {
        assert_eq!(generate_code(MIN_CODE_LENGTH).len(), MIN_CODE_LENGTH);
        assert_eq!(generate_code(MAX_CODE_LENGTH).len(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_base36_characters() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code(DEFAULT_CODE_LENGTH));
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_whole_alphabet() {
        let seen: HashSet<char> = (0..200)
            .flat_map(|_| generate_code(DEFAULT_CODE_LENGTH).chars().collect::<Vec<_>>())
            .collect();

        assert_eq!(seen.len(), ALPHABET.len());
    }
}

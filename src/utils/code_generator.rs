//! Short code generation and format checks.
//!
//! Codes are 6 characters drawn uniformly from the 62-symbol alphabet `[A-Za-z0-9]`,
//! giving `62^6` (about 5.7e10) possible codes.

use rand::Rng;

/// Symbols a short code may contain.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of every short code.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    random_alphanumeric(CODE_LENGTH)
}

/// Random string of `len` symbols from [`CODE_ALPHABET`], uniformly distributed.
pub fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` has the exact length and alphabet of a short code.
///
/// Used to answer obviously malformed codes without a database round trip.
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_distinct_symbols() {
        let distinct: HashSet<u8> = CODE_ALPHABET.iter().copied().collect();
        assert_eq!(CODE_ALPHABET.len(), 62);
        assert_eq!(distinct.len(), 62);
    }

    #[test]
    fn test_generate_code_has_correct_length() {
        for _ in 0..100 {
            assert_eq!(generate_code().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_mostly_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();

        // 1000 draws from 62^6 collide with probability below 1e-5
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_generate_code_covers_alphabet() {
        let seen: HashSet<char> = (0..2000)
            .flat_map(|_| generate_code().into_bytes())
            .map(char::from)
            .collect();

        // 12000 draws over 62 symbols; missing any one has negligible probability
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_random_alphanumeric_length() {
        assert_eq!(random_alphanumeric(48).len(), 48);
        assert!(random_alphanumeric(0).is_empty());
    }

    #[test]
    fn test_is_well_formed_code() {
        assert!(is_well_formed_code("aB3xY9"));
        assert!(is_well_formed_code("000000"));
        assert!(!is_well_formed_code("abc12"));
        assert!(!is_well_formed_code("abc1234"));
        assert!(!is_well_formed_code("abc-12"));
        assert!(!is_well_formed_code(""));
        assert!(!is_well_formed_code("ábc123"));
    }
}

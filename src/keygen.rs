//! Random key names
//!
//! Used by the CLI demo to write under a fresh key each run.

use rand::Rng;

/// Characters a generated key is drawn from
pub const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Build a `len`-character key from `KEY_ALPHABET` using the given source
pub fn random_key<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let key = random_key(&mut rng, 12);

        assert_eq!(key.len(), 12);
        assert!(key.bytes().all(|b| KEY_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_same_seed_same_key() {
        let a = random_key(&mut StdRng::seed_from_u64(42), 16);
        let b = random_key(&mut StdRng::seed_from_u64(42), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_length() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_key(&mut rng, 0), "");
    }
}

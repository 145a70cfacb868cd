//! Short opaque identifiers for habits and mood entries.

use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 26;

/// Generate a fresh lowercase base-36 identifier
///
/// Collisions are only avoided probabilistically.
pub fn generate_id() -> String {
    generate_id_with(&mut rand::thread_rng())
}

/// Generate an identifier from a caller supplied random source
pub fn generate_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_do_not_repeat() {
        let ids: HashSet<_> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let a = generate_id_with(&mut StdRng::seed_from_u64(7));
        let b = generate_id_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}

use rand::RngCore;
use rand_core::OsRng;
use zeroize::Zeroizing;

/// A fresh 32-byte Ed25519 secret seed from the OS RNG, wiped on drop.
pub fn random_seed() -> Zeroizing<[u8; 32]> {
    let mut seed = Zeroizing::new([0u8; 32]);
    OsRng.fill_bytes(&mut seed[..]);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_not_all_zero() {
        let seed = random_seed();
        // Probability of 32 zero bytes is 2^-256.
        assert!(seed.iter().any(|&b| b != 0));
    }

    #[test]
    fn seeds_differ_between_calls() {
        assert_ne!(*random_seed(), *random_seed());
    }
}

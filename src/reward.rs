//! Promo codes handed out for a win.

use rand::Rng;
use tracing::instrument;

/// Generates a code of `len` random decimal digits.
#[instrument(skip(rng))]
pub fn generate_promo_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Text sent to the chat when the human wins.
pub fn win_notification(promo_code: &str) -> String {
    format!("Victory! Promo code issued: {}", promo_code)
}

/// Text sent to the chat when the human loses.
pub fn loss_notification() -> String {
    "Defeat".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_code_is_digits_of_requested_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for len in [0, 1, 5, 12] {
            let code = generate_promo_code(&mut rng, len);
            assert_eq!(code.len(), len);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_same_seed_same_code() {
        let a = generate_promo_code(&mut ChaCha8Rng::seed_from_u64(9), 5);
        let b = generate_promo_code(&mut ChaCha8Rng::seed_from_u64(9), 5);
        assert_eq!(a, b);
    }
}

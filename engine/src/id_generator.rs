use crate::{SessionId, SessionRng};

/// Random 128-bit identifier rendered as lowercase hex, e.g. `game-3f09…`.
///
/// Drawn from the caller's RNG so a seeded registry hands out the same ids
/// on every run.
pub fn generate_session_id(rng: &mut SessionRng) -> SessionId {
    let value: u128 = rng.random();
    SessionId::new(format!("game-{:032x}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_fixed_shape() {
        let id = generate_session_id(&mut SessionRng::new(1));
        assert!(id.as_str().starts_with("game-"));
        assert_eq!(id.as_str().len(), "game-".len() + 32);
    }

    #[test]
    fn ids_differ() {
        let mut rng = SessionRng::from_random();
        assert_ne!(generate_session_id(&mut rng), generate_session_id(&mut rng));
    }

    #[test]
    fn same_seed_same_ids() {
        let mut a = SessionRng::new(21);
        let mut b = SessionRng::new(21);
        for _ in 0..8 {
            assert_eq!(generate_session_id(&mut a), generate_session_id(&mut b));
        }
    }
}

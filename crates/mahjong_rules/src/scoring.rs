//! Hand valuation.
//!
//! Detecting a complete hand (four melds and a pair across concealed and
//! exposed tiles) is not implemented yet, so a mahjong declaration is never
//! offered.

use crate::Player;
use tracing::instrument;

/// Whether `player` can declare mahjong. Always `false` for now.
#[instrument(skip(_player))]
pub fn can_declare_mahjong(_player: &Player) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Wind;

    #[test]
    fn test_mahjong_never_achievable() {
        assert!(!can_declare_mahjong(&Player::new(Wind::East)));
    }
}

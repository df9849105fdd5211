//! Scoring module - points for cleared tiles
//!
//! Points are a pure function of how many distinct slots were cleared in one
//! resolution pass. There are no combo or chain multipliers: a 3-run and a
//! 5-run differ only in their cleared cell count.

use crate::types::POINTS_PER_TILE;

/// Points for clearing `cleared` distinct slots
pub fn calculate_match_score(cleared: usize) -> u32 {
    (cleared as u32).saturating_mul(POINTS_PER_TILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_scores() {
        assert_eq!(calculate_match_score(0), 0);
        assert_eq!(calculate_match_score(3), 30);
        assert_eq!(calculate_match_score(5), 50);
        assert_eq!(calculate_match_score(6), 60);
    }
}

//! Scroll speed as a function of score

use crate::config::GameConfig;

/// Score points needed per +1 scroll speed
pub const SCORE_PER_SPEED_STEP: u32 = 3;

/// Scroll speed (pixels per tick) shared by the ground and the obstacles
pub fn speed(score: u32, config: &GameConfig) -> u32 {
    config.base_speed + score / SCORE_PER_SPEED_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_steps_every_three_points() {
        let config = GameConfig::default();
        let base = config.base_speed;
        assert_eq!(speed(0, &config), base);
        assert_eq!(speed(2, &config), base);
        assert_eq!(speed(3, &config), base + 1);
        assert_eq!(speed(8, &config), base + 2);
        assert_eq!(speed(9, &config), base + 3);
    }

    proptest! {
        #[test]
        fn prop_speed_is_non_decreasing(score in 0u32..1_000_000) {
            let config = GameConfig::default();
            prop_assert!(speed(score + 1, &config) >= speed(score, &config));
            prop_assert!(speed(score + 1, &config) - speed(score, &config) <= 1);
        }
    }
}

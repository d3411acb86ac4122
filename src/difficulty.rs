use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game difficulty level.
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// The numeric parameter bundle for a session at this difficulty.
    pub(crate) fn tuning(self) -> Tuning {
        match self {
            Difficulty::Easy => Tuning {
                initial_speed: 1.0,
                max_speed: 5.0,
                special_food_chance: 0.15,
                wizard_chance: 0.95,
            },
            Difficulty::Normal => Tuning {
                initial_speed: 2.0,
                max_speed: 8.0,
                special_food_chance: 0.10,
                wizard_chance: 0.95,
            },
            Difficulty::Hard => Tuning {
                initial_speed: 3.0,
                max_speed: 12.0,
                special_food_chance: 0.05,
                wizard_chance: 0.95,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        })
    }
}

/// Immutable per-session parameters derived from a difficulty level.
///
/// A session captures its `Tuning` at construction; changing the menu
/// difficulty never rescales a session already in flight.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tuning {
    /// Snake speed at session start, in moves per second.
    pub(crate) initial_speed: f64,

    /// Speed cap for the session, in moves per second.
    pub(crate) max_speed: f64,

    /// Chance that a respawned food is the special kind.
    pub(crate) special_food_chance: f64,

    /// Chance that a wizard spawn trial succeeds.
    pub(crate) wizard_chance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Difficulty::Easy, 1.0, 5.0, 0.15)]
    #[case(Difficulty::Normal, 2.0, 8.0, 0.10)]
    #[case(Difficulty::Hard, 3.0, 12.0, 0.05)]
    fn test_tuning_table(
        #[case] difficulty: Difficulty,
        #[case] initial_speed: f64,
        #[case] max_speed: f64,
        #[case] special_food_chance: f64,
    ) {
        let tuning = difficulty.tuning();
        assert!((tuning.initial_speed - initial_speed).abs() < f64::EPSILON);
        assert!((tuning.max_speed - max_speed).abs() < f64::EPSILON);
        assert!((tuning.special_food_chance - special_food_chance).abs() < f64::EPSILON);
        assert!((tuning.wizard_chance - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }

    #[rstest]
    #[case(Difficulty::Easy, "Easy")]
    #[case(Difficulty::Normal, "Normal")]
    #[case(Difficulty::Hard, "Hard")]
    fn test_display(#[case] difficulty: Difficulty, #[case] s: &str) {
        assert_eq!(difficulty.to_string(), s);
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:^6}", Difficulty::Easy), " Easy ");
    }
}

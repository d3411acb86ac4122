use super::grid::Grid;
use crate::consts;
use rand::seq::IteratorRandom;
use rand::Rng;
use ratatui::layout::Position;
use std::collections::HashSet;

/// What a food item is worth and does.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum FoodKind {
    Normal,
    Special,
}

impl FoodKind {
    pub(super) fn points(self) -> u32 {
        match self {
            FoodKind::Normal => consts::FOOD_POINTS,
            FoodKind::Special => consts::SPECIAL_FOOD_POINTS,
        }
    }

    /// Advisory side effect for the collision resolver.  The food never
    /// touches the snake itself.
    pub(super) fn effect(self) -> Option<FoodEffect> {
        match self {
            FoodKind::Normal => None,
            FoodKind::Special => Some(FoodEffect::SpeedBoost),
        }
    }

    pub(super) fn symbol(self) -> char {
        match self {
            FoodKind::Normal => consts::FOOD_SYMBOL,
            FoodKind::Special => consts::SPECIAL_FOOD_SYMBOL,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum FoodEffect {
    SpeedBoost,
}

/// The single food item on the board.
#[derive(Clone, Debug)]
pub(super) struct Food {
    position: Position,
    kind: FoodKind,
    special_chance: f64,
    phase: f32,
}

impl Food {
    pub(super) fn new<R: Rng>(
        rng: &mut R,
        grid: Grid,
        special_chance: f64,
        occupied: &HashSet<Position>,
    ) -> Food {
        let mut food = Food {
            position: Position::ORIGIN,
            kind: FoodKind::Normal,
            special_chance,
            phase: 0.0,
        };
        food.respawn(rng, grid, occupied);
        food
    }

    pub(super) fn position(&self) -> Position {
        self.position
    }

    pub(super) fn kind(&self) -> FoodKind {
        self.kind
    }

    /// Phase of the pulse animation, in `[0, 1)`.
    pub(super) fn pulse(&self) -> f32 {
        self.phase
    }

    pub(super) fn animate(&mut self, dt: f32) {
        self.phase = (self.phase + dt * consts::FOOD_PULSE_RATE).fract();
    }

    /// Move the food to a free cell and reroll its kind.
    ///
    /// Uniform rejection sampling almost surely lands within a few tries
    /// while the board is mostly empty; past the attempt bound the free
    /// cells are scanned directly so placement stays total on a crowded
    /// board.  If no cell is free at all the food stays put.
    pub(super) fn respawn<R: Rng>(&mut self, rng: &mut R, grid: Grid, occupied: &HashSet<Position>) {
        self.kind = if rng.random_bool(self.special_chance) {
            FoodKind::Special
        } else {
            FoodKind::Normal
        };
        self.phase = 0.0;
        for _ in 0..consts::FOOD_PLACEMENT_ATTEMPTS {
            let pos = grid.random_position(rng);
            if !occupied.contains(&pos) {
                self.position = pos;
                return;
            }
        }
        if let Some(pos) = grid.positions().filter(|p| !occupied.contains(p)).choose(rng) {
            self.position = pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn grid() -> Grid {
        Grid {
            width: 40,
            height: 30,
        }
    }

    #[test]
    fn test_respawn_avoids_occupied_cells() {
        let mut rng = ChaCha12Rng::seed_from_u64(2025);
        // a fat block in the middle of the board
        let occupied = (10..30)
            .flat_map(|x| (5..25).map(move |y| Position::new(x, y)))
            .collect::<HashSet<_>>();
        let mut food = Food::new(&mut rng, grid(), 0.0, &occupied);
        for _ in 0..200 {
            food.respawn(&mut rng, grid(), &occupied);
            assert!(!occupied.contains(&food.position()));
        }
    }

    #[test]
    fn test_respawn_scans_when_nearly_full() {
        let mut rng = ChaCha12Rng::seed_from_u64(99);
        let free = Position::new(17, 23);
        let occupied = grid()
            .positions()
            .filter(|&p| p != free)
            .collect::<HashSet<_>>();
        let mut food = Food::new(&mut rng, grid(), 0.0, &HashSet::new());
        food.respawn(&mut rng, grid(), &occupied);
        assert_eq!(food.position(), free);
    }

    #[test]
    fn test_kind_follows_special_chance() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let none = HashSet::new();
        let mut food = Food::new(&mut rng, grid(), 0.0, &none);
        assert_eq!(food.kind(), FoodKind::Normal);
        food.special_chance = 1.0;
        food.respawn(&mut rng, grid(), &none);
        assert_eq!(food.kind(), FoodKind::Special);
    }

    #[test]
    fn test_points_and_effects_by_kind() {
        assert_eq!(FoodKind::Normal.points(), 10);
        assert_eq!(FoodKind::Special.points(), 30);
        assert_eq!(FoodKind::Normal.effect(), None);
        assert_eq!(FoodKind::Special.effect(), Some(FoodEffect::SpeedBoost));
    }

    #[test]
    fn test_pulse_phase_wraps() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let none = HashSet::new();
        let mut food = Food::new(&mut rng, grid(), 0.0, &none);
        let mut prev = food.pulse();
        let mut wrapped = false;
        for _ in 0..120 {
            food.animate(1.0 / 60.0);
            let phase = food.pulse();
            assert!((0.0..1.0).contains(&phase));
            if phase < prev {
                wrapped = true;
            }
            prev = phase;
        }
        assert!(wrapped, "phase should wrap at least once over two seconds");
    }
}

use super::grid::Grid;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;
use std::collections::HashSet;
use std::time::Instant;

/// The roaming bonus wizard and the elixir he may conjure.
///
/// Dormant most of the time; a periodic trial may put him on the board
/// for a fixed stay, during which each tick can conjure an elixir
/// nearby.  He leaves when the elixir is taken or when his stay runs
/// out, whichever comes first.  The snake passing over the wizard
/// himself does nothing.
#[derive(Clone, Debug)]
pub(super) struct Wizard {
    state: State,
    last_trial: Instant,
    appearance_chance: f64,
}

#[derive(Clone, Copy, Debug)]
enum State {
    Dormant,
    Active {
        position: Position,
        since: Instant,
        elixir: Option<Position>,
    },
}

impl Wizard {
    /// The trial clock starts at `now`, so the first appearance roll
    /// happens one full interval into the session.
    pub(super) fn new(appearance_chance: f64, now: Instant) -> Wizard {
        Wizard {
            state: State::Dormant,
            last_trial: now,
            appearance_chance,
        }
    }

    pub(super) fn position(&self) -> Option<Position> {
        match self.state {
            State::Dormant => None,
            State::Active { position, .. } => Some(position),
        }
    }

    pub(super) fn elixir(&self) -> Option<Position> {
        match self.state {
            State::Dormant => None,
            State::Active { elixir, .. } => elixir,
        }
    }

    pub(super) fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Run the periodic appearance trial, the stay-expiry check, and the
    /// per-tick elixir roll.  `excluded` cells never receive the elixir.
    ///
    /// The trial clock free-runs whether or not the wizard is out, so
    /// appearances are always spaced at least one interval apart.
    pub(super) fn update<R: Rng>(
        &mut self,
        now: Instant,
        rng: &mut R,
        grid: Grid,
        excluded: &HashSet<Position>,
    ) {
        if now.duration_since(self.last_trial) >= consts::WIZARD_TRIAL_INTERVAL {
            self.last_trial = now;
            if !self.is_active() && rng.random_bool(self.appearance_chance) {
                self.state = State::Active {
                    position: grid.random_interior(rng, consts::WIZARD_EDGE_MARGIN),
                    since: now,
                    elixir: None,
                };
            }
        }
        if let State::Active {
            position,
            since,
            elixir,
        } = &mut self.state
        {
            if now.duration_since(*since) > consts::WIZARD_STAY_DURATION {
                self.state = State::Dormant;
            } else if elixir.is_none() && rng.random_bool(consts::ELIXIR_CHANCE) {
                *elixir = conjure_elixir(rng, grid, *position, excluded);
            }
        }
    }

    #[cfg(test)]
    pub(super) fn materialize(&mut self, position: Position, elixir: Position, now: Instant) {
        self.state = State::Active {
            position,
            since: now,
            elixir: Some(elixir),
        };
    }

    /// Collect the elixir if `head` is on it.  Pickup also dismisses the
    /// wizard in the same step.
    pub(super) fn take_elixir(&mut self, head: Position) -> bool {
        match self.state {
            State::Active {
                elixir: Some(pos), ..
            } if pos == head => {
                self.state = State::Dormant;
                true
            }
            _ => false,
        }
    }
}

/// Sample a cell near the wizard for the elixir: a bounded number of
/// attempts, offsets clamped to the board rather than wrapped, skipping
/// the wizard's own cell and every excluded cell.  Giving up just means
/// another roll on a later tick.
fn conjure_elixir<R: Rng>(
    rng: &mut R,
    grid: Grid,
    wizard: Position,
    excluded: &HashSet<Position>,
) -> Option<Position> {
    for _ in 0..consts::ELIXIR_PLACEMENT_ATTEMPTS {
        let dx = rng.random_range(-consts::ELIXIR_RADIUS..=consts::ELIXIR_RADIUS);
        let dy = rng.random_range(-consts::ELIXIR_RADIUS..=consts::ELIXIR_RADIUS);
        if (dx, dy) == (0, 0) {
            continue;
        }
        let pos = grid.clamp(i32::from(wizard.x) + dx, i32::from(wizard.y) + dy);
        if pos != wizard && !excluded.contains(&pos) {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    fn grid() -> Grid {
        Grid {
            width: 40,
            height: 30,
        }
    }

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(0xCAFE)
    }

    #[test]
    fn test_no_trial_before_first_interval() {
        let t0 = Instant::now();
        let mut wizard = Wizard::new(1.0, t0);
        let none = HashSet::new();
        wizard.update(t0 + Duration::from_secs(4), &mut rng(), grid(), &none);
        assert!(!wizard.is_active());
    }

    #[test]
    fn test_certain_trial_spawns_in_the_interior() {
        let t0 = Instant::now();
        let mut wizard = Wizard::new(1.0, t0);
        let none = HashSet::new();
        wizard.update(t0 + Duration::from_secs(5), &mut rng(), grid(), &none);
        assert!(wizard.is_active());
        let pos = wizard.position().unwrap();
        assert!((2..38).contains(&pos.x), "x at the edge: {pos:?}");
        assert!((2..28).contains(&pos.y), "y at the edge: {pos:?}");
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let t0 = Instant::now();
        let mut wizard = Wizard::new(0.0, t0);
        let none = HashSet::new();
        let mut rng = rng();
        for i in 1..100 {
            wizard.update(t0 + Duration::from_secs(i * 5), &mut rng, grid(), &none);
        }
        assert!(!wizard.is_active());
    }

    #[test]
    fn test_stay_expires() {
        let t0 = Instant::now();
        let mut wizard = Wizard::new(1.0, t0);
        let none = HashSet::new();
        let mut rng = rng();
        wizard.update(t0 + Duration::from_secs(5), &mut rng, grid(), &none);
        assert!(wizard.is_active());
        wizard.update(t0 + Duration::from_secs(66), &mut rng, grid(), &none);
        assert!(!wizard.is_active());
        assert_eq!(wizard.elixir(), None);
    }

    #[test]
    fn test_wizard_returns_after_leaving() {
        let t0 = Instant::now();
        let mut wizard = Wizard::new(1.0, t0);
        let none = HashSet::new();
        let mut rng = rng();
        wizard.update(t0 + Duration::from_secs(5), &mut rng, grid(), &none);
        wizard.update(t0 + Duration::from_secs(66), &mut rng, grid(), &none);
        assert!(!wizard.is_active());
        wizard.update(t0 + Duration::from_secs(72), &mut rng, grid(), &none);
        assert!(wizard.is_active());
    }

    #[test]
    fn test_elixir_lands_near_the_wizard() {
        let t0 = Instant::now();
        let mut wizard = Wizard::new(1.0, t0);
        let none = HashSet::new();
        let mut rng = rng();
        let mut now = t0 + Duration::from_secs(5);
        wizard.update(now, &mut rng, grid(), &none);
        let wizard_pos = wizard.position().unwrap();
        // the per-tick conjuring chance is small, so run plenty of ticks
        // while staying inside the wizard's stay
        for _ in 0..900 {
            if wizard.elixir().is_some() {
                break;
            }
            now += Duration::from_millis(50);
            wizard.update(now, &mut rng, grid(), &none);
        }
        let elixir = wizard.elixir().expect("an elixir should have appeared");
        assert_ne!(elixir, wizard_pos);
        let dx = i32::from(elixir.x) - i32::from(wizard_pos.x);
        let dy = i32::from(elixir.y) - i32::from(wizard_pos.y);
        assert!(dx.abs() <= 2, "elixir too far in x: {dx}");
        assert!(dy.abs() <= 2, "elixir too far in y: {dy}");
    }

    #[test]
    fn test_elixir_avoids_excluded_cells() {
        let mut rng = rng();
        // exclude the whole board except one cell next to the wizard
        let wizard_pos = Position::new(10, 10);
        let free = Position::new(11, 10);
        let excluded = grid()
            .positions()
            .filter(|&p| p != free && p != wizard_pos)
            .collect::<HashSet<_>>();
        for _ in 0..200 {
            if let Some(pos) = conjure_elixir(&mut rng, grid(), wizard_pos, &excluded) {
                assert_eq!(pos, free);
            }
        }
    }

    #[test]
    fn test_pickup_dismisses_the_wizard() {
        let t0 = Instant::now();
        let mut wizard = Wizard::new(1.0, t0);
        wizard.state = State::Active {
            position: Position::new(10, 10),
            since: t0,
            elixir: Some(Position::new(11, 10)),
        };
        assert!(!wizard.take_elixir(Position::new(12, 10)));
        assert!(wizard.is_active());
        // stepping on the wizard himself is not a pickup
        assert!(!wizard.take_elixir(Position::new(10, 10)));
        assert!(wizard.is_active());
        assert!(wizard.take_elixir(Position::new(11, 10)));
        assert!(!wizard.is_active());
        assert_eq!(wizard.elixir(), None);
    }
}

use super::grid::Grid;
use ratatui::layout::Position;

/// Short-lived cosmetic particle in playfield cell space.
///
/// Positions are fractional cells so slow drifts survive rounding; a
/// particle may drift off the grid, in which case it simply stops being
/// drawn until it expires.
#[derive(Clone, Copy, Debug)]
pub(super) struct Particle {
    pub(super) x: f32,
    pub(super) y: f32,
    vx: f32,
    vy: f32,
    gravity: f32,
    age: f32,
    lifetime: f32,
}

impl Particle {
    pub(super) fn new(x: f32, y: f32, vx: f32, vy: f32, lifetime: f32) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            gravity: 0.0,
            age: 0.0,
            lifetime,
        }
    }

    pub(super) fn with_gravity(mut self, gravity: f32) -> Particle {
        self.gravity = gravity;
        self
    }

    /// Remaining life as a fraction of the total, 1 at spawn, 0 at death.
    pub(super) fn fade(&self) -> f32 {
        (1.0 - self.age / self.lifetime).max(0.0)
    }

    /// The cell under the particle, if it is still over the grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(super) fn cell(&self, grid: Grid) -> Option<Position> {
        let x = self.x.round();
        let y = self.y.round();
        (x >= 0.0 && x < f32::from(grid.width) && y >= 0.0 && y < f32::from(grid.height))
            .then(|| Position::new(x as u16, y as u16))
    }
}

/// Arena of live particles.
#[derive(Clone, Debug, Default)]
pub(super) struct Particles(Vec<Particle>);

impl Particles {
    pub(super) fn new() -> Particles {
        Particles(Vec::new())
    }

    pub(super) fn spawn(&mut self, particle: Particle) {
        self.0.push(particle);
    }

    /// Ages and integrates every particle, compacting expired entries
    /// with swap-remove so the pass stays in place.  Particle draw order
    /// is not meaningful, so the reordering is harmless.
    pub(super) fn advance(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.0.len() {
            let p = &mut self.0[i];
            p.age += dt;
            if p.age >= p.lifetime {
                self.0.swap_remove(i);
            } else {
                p.x += p.vx * dt;
                p.y += p.vy * dt;
                p.vy += p.gravity * dt;
                i += 1;
            }
        }
    }

    pub(super) fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.0.iter()
    }

    pub(super) fn clear(&mut self) {
        self.0.clear();
    }

    pub(super) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_integrates_position() {
        let mut arena = Particles::new();
        arena.spawn(Particle::new(5.0, 5.0, 2.0, -1.0, 10.0));
        arena.advance(0.5);
        let p = arena.iter().next().unwrap();
        assert!((p.x - 6.0).abs() < 1e-5);
        assert!((p.y - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_advance_compacts_expired() {
        let mut arena = Particles::new();
        arena.spawn(Particle::new(0.0, 0.0, 0.0, 0.0, 0.2));
        arena.spawn(Particle::new(1.0, 1.0, 0.0, 0.0, 5.0));
        arena.spawn(Particle::new(2.0, 2.0, 0.0, 0.0, 0.3));
        arena.advance(1.0);
        assert_eq!(arena.len(), 1);
        assert!((arena.iter().next().unwrap().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fade_decreases_to_zero() {
        let mut arena = Particles::new();
        arena.spawn(Particle::new(0.0, 0.0, 0.0, 0.0, 1.0));
        let fresh = arena.iter().next().unwrap().fade();
        assert!((fresh - 1.0).abs() < 1e-5);
        arena.advance(0.75);
        let old = arena.iter().next().unwrap().fade();
        assert!(old < fresh);
        assert!(old > 0.0);
        arena.advance(0.75);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_gravity_bends_velocity() {
        let mut arena = Particles::new();
        arena.spawn(Particle::new(0.0, 0.0, 0.0, -2.0, 10.0).with_gravity(4.0));
        arena.advance(1.0);
        arena.advance(1.0);
        let p = arena.iter().next().unwrap();
        // vy goes -2 -> 2 over two seconds, so the net drop cancels out
        assert!((p.y - 0.0).abs() < 1e-5);
        assert!(p.cell(Grid {
            width: 40,
            height: 30
        })
        .is_some());
    }

    #[test]
    fn test_cell_is_none_off_grid() {
        let grid = Grid {
            width: 10,
            height: 10,
        };
        let p = Particle::new(-0.6, 5.0, 0.0, 0.0, 1.0);
        assert_eq!(p.cell(grid), None);
        let p = Particle::new(9.4, 9.4, 0.0, 0.0, 1.0);
        assert_eq!(p.cell(grid), Some(Position::new(9, 9)));
        let p = Particle::new(9.6, 5.0, 0.0, 0.0, 1.0);
        assert_eq!(p.cell(grid), None);
    }
}

use super::direction::Direction;
use super::grid::Grid;
use super::particles::{Particle, Particles};
use crate::consts;
use crate::difficulty::Tuning;
use rand::Rng;
use ratatui::layout::Position;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Snake state.
///
/// The body is head-first and every cell is an already-wrapped playfield
/// position.  Movement is rate-gated rather than frame-gated: `advance`
/// only moves the snake once a full move interval has elapsed, so
/// gameplay speed is independent of how often the session loop runs.
#[derive(Clone, Debug)]
pub(super) struct Snake {
    /// Cells occupied by the snake, head first.
    body: VecDeque<Position>,

    /// The direction the snake is facing.
    direction: Direction,

    /// Direction requested since the last move.  Latest input wins;
    /// reversals are dropped on arrival.
    pending: Option<Direction>,

    /// Current speed in moves per second.
    speed: f64,

    /// Upper bound on `speed` for this session.
    max_speed: f64,

    /// Number of upcoming moves that skip tail removal.
    growth_pending: u32,

    /// When the snake last moved (or was created).
    last_move: Instant,

    /// Whether the wyrm transformation is active.
    wyrm: bool,

    /// Embers trailing the head while transformed.
    embers: Particles,
}

impl Snake {
    /// Create a snake of [`consts::INITIAL_SNAKE_LENGTH`] cells at the
    /// center of `grid`, facing east, with its movement clock started at
    /// `now`.
    pub(super) fn new(grid: Grid, tuning: Tuning, now: Instant) -> Snake {
        let mid_x = i32::from(grid.width / 2);
        let mid_y = i32::from(grid.height / 2);
        let body = (0..consts::INITIAL_SNAKE_LENGTH)
            .map(|i| grid.wrap(mid_x - i32::from(i), mid_y))
            .collect::<VecDeque<_>>();
        Snake {
            body,
            direction: Direction::East,
            pending: None,
            speed: tuning.initial_speed,
            max_speed: tuning.max_speed,
            growth_pending: 0,
            last_move: now,
            wyrm: false,
            embers: Particles::new(),
        }
    }

    pub(super) fn head(&self) -> Position {
        *self.body.front().expect("snake body should never be empty")
    }

    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(super) fn len(&self) -> usize {
        self.body.len()
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    pub(super) fn speed(&self) -> f64 {
        self.speed
    }

    pub(super) fn is_wyrm(&self) -> bool {
        self.wyrm
    }

    pub(super) fn embers(&self) -> &Particles {
        &self.embers
    }

    /// Queue a direction change for the next move.  A request to double
    /// straight back into the neck is dropped.
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.pending = Some(direction);
        }
    }

    /// Seconds between accepted moves at the current speed.
    pub(super) fn move_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    /// Advance one cell if a move interval has elapsed; returns whether
    /// the snake moved.  The queued direction is committed even when the
    /// move itself is deferred, so reversal checks always run against
    /// the freshest heading.
    pub(super) fn advance(&mut self, now: Instant, grid: Grid) -> bool {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
        if now.duration_since(self.last_move) < self.move_interval() {
            return false;
        }
        self.last_move = now;
        let head = self.direction.step(self.head(), grid);
        self.body.push_front(head);
        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else {
            let _ = self.body.pop_back();
        }
        true
    }

    /// Keep one extra segment on an upcoming move.
    pub(super) fn grow(&mut self) {
        self.growth_pending += 1;
    }

    /// Ramp the speed up by the growth rate, saturating at the session
    /// cap.
    pub(super) fn increase_speed(&mut self) {
        self.speed = (self.speed * (1.0 + consts::SPEED_GROWTH_RATE)).min(self.max_speed);
    }

    /// Whether the head overlaps any other body cell.  All positions are
    /// already wrapped, so plain equality is the whole check.
    pub(super) fn self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }

    /// Switch the wyrm transformation on or off.  Turning it off retires
    /// any embers still in the air.
    pub(super) fn set_wyrm(&mut self, active: bool) {
        if self.wyrm != active {
            self.wyrm = active;
            if !active {
                self.embers.clear();
            }
        }
    }

    /// Spew embers from the head, streaming opposite to travel with some
    /// sideways scatter.  Called once per move while transformed.
    pub(super) fn breathe<R: Rng>(&mut self, rng: &mut R) {
        let (vx, vy) = self.direction.velocity();
        let head = self.head();
        for _ in 0..rng.random_range(consts::EMBERS_PER_MOVE) {
            let speed = rng.random_range(2.0_f32..5.0);
            let drift = rng.random_range(-1.5_f32..1.5);
            self.embers.spawn(Particle::new(
                f32::from(head.x),
                f32::from(head.y),
                -vx * speed + vy.abs() * drift,
                -vy * speed + vx.abs() * drift,
                rng.random_range(consts::EMBER_LIFETIME),
            ));
        }
    }

    pub(super) fn update_embers(&mut self, dt: f32) {
        self.embers.advance(dt);
    }

    #[cfg(test)]
    pub(super) fn set_body(&mut self, cells: impl IntoIterator<Item = Position>) {
        self.body = cells.into_iter().collect();
    }
}

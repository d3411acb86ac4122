use super::particles::{Particle, Particles};
use crate::consts;
use crate::util::center_rect;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect, Size},
    text::Line,
    widgets::{Block, Clear, Widget},
};
use std::time::{Duration, Instant};

/// One self-expiring effect timer.
#[derive(Clone, Copy, Debug)]
struct EffectTimer {
    started: Instant,
    duration: Duration,
}

impl EffectTimer {
    fn new(now: Instant, duration: Duration) -> EffectTimer {
        EffectTimer { started: now, duration }
    }

    fn expired(self, now: Instant) -> bool {
        now.duration_since(self.started) >= self.duration
    }

    /// Elapsed fraction of the duration, clamped to `[0, 1]`.
    fn progress(self, now: Instant) -> f32 {
        (now.duration_since(self.started).as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// The bundle of effects an elixir pickup triggers.
///
/// The banner, the burst, and the wyrm transformation time out
/// independently.  Picking up another elixir while any of them is live
/// restarts all three from now; durations never stack.
#[derive(Clone, Debug)]
pub(super) struct PowerUps {
    banner: Option<EffectTimer>,
    burst: Option<EffectTimer>,
    wyrm: Option<EffectTimer>,
    burst_center: Position,
    debris: Particles,
}

impl PowerUps {
    pub(super) fn new() -> PowerUps {
        PowerUps {
            banner: None,
            burst: None,
            wyrm: None,
            burst_center: Position::ORIGIN,
            debris: Particles::new(),
        }
    }

    /// Start (or restart) every effect, with the burst centered on the
    /// pickup cell.
    pub(super) fn trigger<R: Rng>(&mut self, now: Instant, rng: &mut R, center: Position) {
        self.banner = Some(EffectTimer::new(now, consts::BANNER_DURATION));
        self.burst = Some(EffectTimer::new(now, consts::BURST_DURATION));
        self.wyrm = Some(EffectTimer::new(now, consts::WYRM_DURATION));
        self.burst_center = center;
        self.debris.clear();
        for _ in 0..consts::BURST_DEBRIS_COUNT {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(5.0_f32..15.0);
            let lifetime = rng.random_range(0.5..consts::BURST_DURATION.as_secs_f32() * 0.9);
            self.debris.spawn(
                Particle::new(
                    f32::from(center.x),
                    f32::from(center.y),
                    angle.cos() * speed,
                    angle.sin() * speed,
                    lifetime,
                )
                .with_gravity(rng.random_range(2.5_f32..7.5)),
            );
        }
    }

    /// Retire expired timers and age the debris.
    pub(super) fn update(&mut self, now: Instant, dt: f32) {
        if self.banner.is_some_and(|t| t.expired(now)) {
            self.banner = None;
        }
        if self.burst.is_some_and(|t| t.expired(now)) {
            self.burst = None;
            self.debris.clear();
        }
        if self.wyrm.is_some_and(|t| t.expired(now)) {
            self.wyrm = None;
        }
        if self.burst.is_some() {
            self.debris.advance(dt);
        }
    }

    pub(super) fn banner_active(&self, now: Instant) -> bool {
        self.banner.is_some_and(|t| !t.expired(now))
    }

    /// Burst progress in `[0, 1)` while the burst is live.
    pub(super) fn burst_progress(&self, now: Instant) -> Option<f32> {
        self.burst
            .map(|t| t.progress(now))
            .filter(|&progress| progress < 1.0)
    }

    pub(super) fn wyrm_active(&self, now: Instant) -> bool {
        self.wyrm.is_some_and(|t| !t.expired(now))
    }

    /// True while at least one of the three effects is still running.
    pub(super) fn is_any_active(&self, now: Instant) -> bool {
        self.banner_active(now) || self.burst_progress(now).is_some() || self.wyrm_active(now)
    }

    pub(super) fn burst_center(&self) -> Position {
        self.burst_center
    }

    pub(super) fn debris(&self) -> &Particles {
        &self.debris
    }

    /// Burst ring radius for a given progress: a fast attack to half the
    /// maximum over the first 30%, then a slower bloom to full size.
    pub(super) fn burst_radius(progress: f32, max_radius: f32) -> f32 {
        if progress < 0.3 {
            max_radius * (progress / 0.3) * 0.5
        } else {
            max_radius * (0.5 + (progress - 0.3) / 0.7 * 0.5)
        }
    }
}

/// Full-screen celebration stripe shown while the banner timer runs.
#[derive(Clone, Copy, Debug)]
pub(super) struct Banner;

impl Widget for Banner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = Size {
            width: (area.width / 10) * 7,
            height: area.height / 2,
        };
        if size.width < 12 || size.height < 5 {
            return;
        }
        let popup = center_rect(area, size);
        Clear.render(popup, buf);
        let block = Block::bordered().border_style(consts::BANNER_BORDER_STYLE);
        let inner = block.inner(popup);
        block.render(popup, buf);
        let stripes = Layout::vertical([Constraint::Ratio(1, 3); 3]).split(inner);
        for (stripe, style) in stripes.iter().zip(consts::BANNER_STRIPE_STYLES) {
            buf.set_style(*stripe, style);
        }
        let middle = stripes[1];
        let text_row = Rect {
            y: middle.y + middle.height / 2,
            height: 1,
            ..middle
        };
        Line::styled("WYRM MODE", consts::BANNER_TEXT_STYLE)
            .centered()
            .render(text_row, buf);
    }
}

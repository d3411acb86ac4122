//! Sound-effect hooks.
//!
//! Gameplay code announces noteworthy moments as [`FxEvent`]s through an
//! [`FxSink`].  The default sink does nothing; a real audio backend only
//! has to implement the trait.  The sound option is applied with
//! [`Gated`], so gameplay code emits events unconditionally.

use ratatui::layout::Position;

/// A moment worth making a noise about.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FxEvent {
    /// The snake ate a food item at `pos`
    Eat { pos: Position, special: bool },

    /// The session ended with the snake's head at `pos`
    GameOver { pos: Position },

    /// The wizard's elixir was collected at `pos`
    BonusCollected { pos: Position },

    /// A menu item was activated
    MenuSelect,

    /// The menu selection moved
    MenuChange,
}

pub(crate) trait FxSink {
    fn play(&mut self, event: FxEvent);
}

/// The built-in sink: swallows every event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SilentFx;

impl FxSink for SilentFx {
    fn play(&mut self, _event: FxEvent) {}
}

/// Recording sink for tests.
impl FxSink for Vec<FxEvent> {
    fn play(&mut self, event: FxEvent) {
        self.push(event);
    }
}

/// Wrapper that drops events while the sound option is off.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Gated<F> {
    sink: F,
    enabled: bool,
}

impl<F> Gated<F> {
    pub(crate) fn new(sink: F, enabled: bool) -> Gated<F> {
        Gated { sink, enabled }
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &F {
        &self.sink
    }
}

impl<F: FxSink> FxSink for Gated<F> {
    fn play(&mut self, event: FxEvent) {
        if self.enabled {
            self.sink.play(event);
        }
    }
}

use crate::difficulty::Difficulty;
use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;

/// Gameplay options settable in the main menu.
///
/// Also deserialized from the `[options]` table of the configuration
/// file to provide the startup defaults.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    /// Difficulty for new game sessions
    pub(crate) difficulty: Difficulty,

    /// Whether sound effects are enabled
    pub(crate) sound: bool,
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Difficulty => self.difficulty.into(),
            OptKey::Sound => self.sound.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Difficulty => {
                self.difficulty = value
                    .try_into()
                    .expect("Options::set(Difficulty, value) called with non-Difficulty value");
            }
            OptKey::Sound => {
                self.sound = value
                    .try_into()
                    .expect("Options::set(Sound, value) called with non-Bool value");
            }
        }
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            difficulty: Difficulty::default(),
            sound: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Difficulty,
    Sound,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Difficulty => "Difficulty",
            OptKey::Sound => "Sound",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    Difficulty,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(false) => write!(f, "   [ ]    "),
            OptValue::Bool(true) => write!(f, "   [✓]    "),
            OptValue::Difficulty(level) => {
                write!(
                    f,
                    "{left} {level:^6} {right}",
                    left = if level.can_decrease() { '◀' } else { '◁' },
                    right = if level.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

impl Adjustable for Difficulty {
    fn increase(&mut self) {
        if let Some(level) = self.next() {
            *self = level;
        }
    }

    fn decrease(&mut self) {
        if let Some(level) = self.prev() {
            *self = level;
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        *self != Difficulty::max()
    }

    fn can_decrease(&self) -> bool {
        *self != Difficulty::min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod opt_key {
        use super::*;

        #[test]
        fn display_width() {
            let actual_width = OptKey::iter()
                .map(|key| key.as_str().chars().count())
                .max()
                .unwrap();
            assert_eq!(actual_width, usize::from(OptKey::DISPLAY_WIDTH));
        }

        #[test]
        fn fmt_width() {
            assert_eq!(
                format!(
                    "{:width$}",
                    OptKey::Sound,
                    width = usize::from(OptKey::DISPLAY_WIDTH)
                ),
                "Sound     "
            );
        }
    }

    mod opt_value {
        use super::*;

        #[test]
        fn display_width() {
            let actual_width = [
                OptValue::Bool(false),
                OptValue::Bool(true),
                OptValue::Difficulty(Difficulty::Easy),
                OptValue::Difficulty(Difficulty::Normal),
                OptValue::Difficulty(Difficulty::Hard),
            ]
            .iter()
            .map(|value| value.to_string().chars().count())
            .max()
            .unwrap();
            assert_eq!(actual_width, usize::from(OptValue::DISPLAY_WIDTH));
        }

        #[test]
        fn difficulty_arrows() {
            assert_eq!(
                OptValue::Difficulty(Difficulty::Easy).to_string(),
                "◁  Easy  ▶"
            );
            assert_eq!(
                OptValue::Difficulty(Difficulty::Normal).to_string(),
                "◀ Normal ▶"
            );
            assert_eq!(
                OptValue::Difficulty(Difficulty::Hard).to_string(),
                "◀  Hard  ▷"
            );
        }
    }

    mod adjust {
        use super::*;

        #[test]
        fn difficulty_steps_and_saturates() {
            let mut level = Difficulty::Easy;
            level.increase();
            assert_eq!(level, Difficulty::Normal);
            level.increase();
            assert_eq!(level, Difficulty::Hard);
            level.increase();
            assert_eq!(level, Difficulty::Hard);
            level.decrease();
            level.decrease();
            level.decrease();
            assert_eq!(level, Difficulty::Easy);
        }

        #[test]
        fn difficulty_toggle_is_inert() {
            let mut level = Difficulty::Normal;
            level.toggle();
            assert_eq!(level, Difficulty::Normal);
        }
    }

    #[test]
    fn get_set_roundtrip() {
        let mut opts = Options::default();
        assert_eq!(opts.get(OptKey::Sound), OptValue::Bool(true));
        opts.set(OptKey::Difficulty, Difficulty::Hard.into());
        opts.set(OptKey::Sound, false.into());
        assert_eq!(
            opts,
            Options {
                difficulty: Difficulty::Hard,
                sound: false,
            }
        );
    }

    #[test]
    fn deserialize_partial() {
        let opts = toml::from_str::<Options>("difficulty = \"hard\"").unwrap();
        assert_eq!(
            opts,
            Options {
                difficulty: Difficulty::Hard,
                sound: true,
            }
        );
    }
}

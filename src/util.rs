use crate::config::Config;
use crate::consts;
use crate::highscores::HighScores;
use crate::options::Options;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// State shared by every screen and handed from one to the next.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    /// Configuration read at startup
    pub(crate) config: Config,

    /// Current gameplay options, as last set in the main menu
    pub(crate) options: Options,

    /// The high-score table
    pub(crate) scores: HighScores,
}

/// Centered rectangle of [`consts::DISPLAY_SIZE`] (or as much of it as
/// fits) within `buffer_area`.  All screens draw inside this.
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Centered rectangle of the given size within `area`, clipped to `area`.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Ordered navigation over a fieldless enum, derived from its [`Enum`]
/// impl.  Used by the menus to step through their items.
pub(crate) trait EnumExt: Enum {
    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Sample {
        Alpha,
        Beta,
        Gamma,
    }

    #[test]
    fn test_enum_ext_bounds() {
        assert_eq!(Sample::min(), Sample::Alpha);
        assert_eq!(Sample::max(), Sample::Gamma);
    }

    #[rstest]
    #[case(Sample::Alpha, None, Some(Sample::Beta))]
    #[case(Sample::Beta, Some(Sample::Alpha), Some(Sample::Gamma))]
    #[case(Sample::Gamma, Some(Sample::Beta), None)]
    fn test_enum_ext_steps(
        #[case] value: Sample,
        #[case] prev: Option<Sample>,
        #[case] next: Option<Sample>,
    ) {
        assert_eq!(value.prev(), prev);
        assert_eq!(value.next(), next);
    }

    #[test]
    fn test_enum_ext_iter() {
        assert_eq!(
            Sample::iter().collect::<Vec<_>>(),
            vec![Sample::Alpha, Sample::Beta, Sample::Gamma]
        );
    }

    #[rstest]
    #[case(Rect::new(0, 0, 100, 50), Size::new(20, 10), Rect::new(40, 20, 20, 10))]
    #[case(Rect::new(10, 5, 20, 10), Size::new(20, 10), Rect::new(10, 5, 20, 10))]
    #[case(Rect::new(0, 0, 10, 4), Size::new(20, 10), Rect::new(0, 0, 10, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] centered: Rect) {
        assert_eq!(center_rect(area, size), centered);
    }

    #[test]
    fn test_display_area_in_a_large_terminal() {
        let display = get_display_area(Rect::new(0, 0, 120, 50));
        assert_eq!(display, Rect::new(20, 7, 80, 36));
    }
}

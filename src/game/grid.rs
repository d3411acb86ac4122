use rand::Rng;
use ratatui::layout::{Position, Positions, Rect, Size};

/// Toroidal playfield bounds.
///
/// Every edge wraps onto the opposite edge, so any pair of signed
/// coordinates names some cell and no out-of-bounds state is
/// representable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Grid {
    pub(super) width: u16,
    pub(super) height: u16,
}

impl Grid {
    /// Maps arbitrary signed coordinates onto the grid with floored
    /// modulo, so `-1` lands on the far edge.
    pub(super) fn wrap(self, x: i32, y: i32) -> Position {
        let x = x.rem_euclid(i32::from(self.width));
        let y = y.rem_euclid(i32::from(self.height));
        Position {
            x: u16::try_from(x).expect("floored modulo should land in 0..width"),
            y: u16::try_from(y).expect("floored modulo should land in 0..height"),
        }
    }

    /// Clamps signed coordinates to the nearest cell without wrapping.
    pub(super) fn clamp(self, x: i32, y: i32) -> Position {
        let x = x.clamp(0, i32::from(self.width) - 1);
        let y = y.clamp(0, i32::from(self.height) - 1);
        Position {
            x: u16::try_from(x).expect("clamped x should land in 0..width"),
            y: u16::try_from(y).expect("clamped y should land in 0..height"),
        }
    }

    pub(super) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(super) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    pub(super) fn random_position<R: Rng>(self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Uniform cell at least `margin` cells in from every edge.
    pub(super) fn random_interior<R: Rng>(self, rng: &mut R, margin: u16) -> Position {
        Position::new(
            rng.random_range(margin..self.width - margin),
            rng.random_range(margin..self.height - margin),
        )
    }
}

impl From<Size> for Grid {
    fn from(size: Size) -> Grid {
        Grid {
            width: size.width,
            height: size.height,
        }
    }
}

use super::grid::Grid;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// One cell in this direction.  Total on a toroidal grid: every step
    /// lands on some cell.
    pub(super) fn step(self, pos: Position, grid: Grid) -> Position {
        let (dx, dy) = self.delta();
        grid.wrap(i32::from(pos.x) + dx, i32::from(pos.y) + dy)
    }

    pub(super) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Unit vector as floats, for particle velocities.
    pub(super) fn velocity(self) -> (f32, f32) {
        match self {
            Direction::North => (0.0, -1.0),
            Direction::East => (1.0, 0.0),
            Direction::South => (0.0, 1.0),
            Direction::West => (-1.0, 0.0),
        }
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid() -> Grid {
        Grid {
            width: 40,
            height: 30,
        }
    }

    #[rstest]
    #[case(Direction::North, Position::new(2, 7), Position::new(2, 6))]
    #[case(Direction::South, Position::new(2, 7), Position::new(2, 8))]
    #[case(Direction::East, Position::new(2, 7), Position::new(3, 7))]
    #[case(Direction::West, Position::new(2, 7), Position::new(1, 7))]
    #[case(Direction::North, Position::new(2, 0), Position::new(2, 29))]
    #[case(Direction::South, Position::new(2, 29), Position::new(2, 0))]
    #[case(Direction::East, Position::new(39, 15), Position::new(0, 15))]
    #[case(Direction::West, Position::new(0, 7), Position::new(39, 7))]
    fn test_step(#[case] d: Direction, #[case] pos: Position, #[case] stepped: Position) {
        assert_eq!(d.step(pos, grid()), stepped);
    }

    #[rstest]
    #[case(Direction::North, Direction::South)]
    #[case(Direction::East, Direction::West)]
    #[case(Direction::South, Direction::North)]
    #[case(Direction::West, Direction::East)]
    fn test_reverse(#[case] d: Direction, #[case] r: Direction) {
        assert_eq!(d.reverse(), r);
        assert_eq!(r.reverse(), d);
    }
}

use glam::IVec2;
use strum_macros::EnumIter;

/// A cardinal movement direction on the grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the fixed order used for neighbor expansion.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the grid offset for one step in this direction.
    ///
    /// `y` grows downward, matching the row order of the stage map.
    pub fn offset(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Parses a behavior-pattern letter.
    pub fn from_char(c: char) -> Option<Direction> {
        match c {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns the behavior-pattern letter for this direction.
    pub fn as_char(&self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_offsets_are_unit_steps() {
        for direction in Direction::iter() {
            let offset = direction.offset();
            assert_eq!(offset.x.abs() + offset.y.abs(), 1);
        }
    }

    #[test]
    fn test_letter_round_trip() {
        for direction in Direction::iter() {
            assert_eq!(Direction::from_char(direction.as_char()), Some(direction));
        }
        assert_eq!(Direction::from_char('Z'), None);
    }

    #[test]
    fn test_iteration_order_matches_neighbor_order() {
        let collected: Vec<Direction> = Direction::iter().collect();
        assert_eq!(collected, Direction::DIRECTIONS);
    }
}

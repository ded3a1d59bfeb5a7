//! Cyclic behavior patterns shared by guard monsters and dispensers.

use crate::direction::Direction;

/// A finite cyclic sequence of directions with a rotating cursor.
///
/// The sequence itself is immutable; consuming a step advances an index
/// modulo the length, so after exactly `len()` advances the pattern is
/// observably back in its initial state. An empty pattern is inert: it has no
/// current direction and advancing it does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorPattern {
    steps: Vec<Direction>,
    cursor: usize,
}

impl BehaviorPattern {
    pub fn new(steps: Vec<Direction>) -> BehaviorPattern {
        BehaviorPattern { steps, cursor: 0 }
    }

    /// Parses an already-expanded pattern segment such as `"UUDDLLLL"`.
    ///
    /// Characters that are not direction letters are ignored.
    pub fn parse(segment: &str) -> BehaviorPattern {
        BehaviorPattern::new(segment.chars().filter_map(Direction::from_char).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns the direction at the cursor, or `None` for an empty pattern.
    pub fn current(&self) -> Option<Direction> {
        self.steps.get(self.cursor).copied()
    }

    /// Moves the cursor to the next element, wrapping past the end.
    pub fn advance(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.steps.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn test_parse() {
        let pattern = BehaviorPattern::parse("UUDDLLLL");
        assert_eq!(pattern.len(), 8);
        assert_eq!(pattern.current(), Some(Up));
    }

    #[test]
    fn test_parse_skips_foreign_characters() {
        let pattern = BehaviorPattern::parse(" U D ");
        assert_eq!(pattern.len(), 2);
    }

    #[test]
    fn test_rotation_returns_to_initial_state() {
        let initial = BehaviorPattern::new(vec![Up, Right, Right, Down]);
        let mut pattern = initial.clone();

        for step in 0..initial.len() {
            assert_eq!(pattern.current(), Some(initial.steps[step]));
            pattern.advance();
        }
        assert_eq!(pattern, initial);
    }

    #[test]
    fn test_empty_pattern_is_inert() {
        let mut pattern = BehaviorPattern::parse("");
        assert!(pattern.is_empty());
        assert_eq!(pattern.current(), None);
        pattern.advance();
        assert_eq!(pattern.current(), None);
    }
}

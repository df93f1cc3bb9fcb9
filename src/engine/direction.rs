use enum_map::Enum;

/// A compass heading for the snake.  `Enum` is derived so that tests and
/// menus can iterate over all four values via [`crate::util::EnumExt`].
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit `(row_delta, col_delta)` for one step in this direction.
    /// Rows grow downwards, columns grow rightwards.
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::EnumExt;

    #[test]
    fn deltas_are_unit_steps() {
        for d in Direction::iter() {
            let (dr, dc) = d.delta();
            assert_eq!(dr.abs() + dc.abs(), 1, "{d:?} is not a unit step");
        }
    }

    #[test]
    fn reverse_is_an_involution() {
        for d in Direction::iter() {
            assert_ne!(d.reverse(), d);
            assert_eq!(d.reverse().reverse(), d);
        }
    }

    #[test]
    fn reverse_negates_delta() {
        for d in Direction::iter() {
            let (dr, dc) = d.delta();
            assert_eq!(d.reverse().delta(), (-dr, -dc));
        }
    }
}

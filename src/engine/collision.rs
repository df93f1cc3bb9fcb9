use super::grid::Cell;
use std::collections::HashSet;

/// Decide whether the head may enter `next_head` on this tick.
///
/// Entering a cell the body occupies is fatal, with one exception: the
/// current tail cell, which the tail vacates during the same tick.  The
/// exception is withheld at or below `min_safe_length`, where the "tail" is
/// the segment directly behind the head and has nowhere to go.
pub(super) fn legal_move(
    next_head: Cell,
    occupied: &HashSet<Cell>,
    tail: Cell,
    length: usize,
    min_safe_length: usize,
) -> bool {
    if !occupied.contains(&next_head) {
        return true;
    }
    next_head == tail && length > min_safe_length
}

#[cfg(test)]
mod tests {
    use super::super::direction::Direction;
    use super::super::grid::Grid;
    use super::super::snake::Snake;
    use super::*;

    const MIN_SAFE_LENGTH: usize = 2;

    /// A length-4 snake curled so its tail cell sits directly above its
    /// head.  Segments head-first: (5,3) (5,4) (4,4) (4,3).
    fn curled_snake() -> Snake {
        let mut snake = Snake::new(Grid::new(9, 9), Cell::new(4, 4), Direction::Right, 4);
        snake.advance(Cell::new(5, 4), false);
        snake.advance(Cell::new(5, 3), false);
        snake
    }

    #[test]
    fn curled_snake_layout_is_what_the_tests_assume() {
        let snake = curled_snake();
        assert_eq!(
            snake.segments().iter().copied().collect::<Vec<_>>(),
            vec![
                Cell::new(5, 3),
                Cell::new(5, 4),
                Cell::new(4, 4),
                Cell::new(4, 3),
            ]
        );
        assert_eq!(snake.tail(), Cell::new(4, 3));
    }

    #[test]
    fn free_cell_is_legal() {
        let snake = curled_snake();
        assert!(legal_move(
            Cell::new(6, 3),
            &snake.occupied(),
            snake.tail(),
            snake.len(),
            MIN_SAFE_LENGTH,
        ));
    }

    #[test]
    fn every_body_cell_except_the_tail_is_fatal() {
        let snake = curled_snake();
        let occupied = snake.occupied();
        for &cell in snake.segments().iter().skip(1) {
            let legal = legal_move(cell, &occupied, snake.tail(), snake.len(), MIN_SAFE_LENGTH);
            assert_eq!(
                legal,
                cell == snake.tail(),
                "unexpected verdict for {cell:?}"
            );
        }
    }

    #[test]
    fn tail_cell_is_legal_above_minimum_length() {
        let snake = curled_snake();
        assert!(snake.len() > MIN_SAFE_LENGTH);
        assert!(legal_move(
            snake.tail(),
            &snake.occupied(),
            snake.tail(),
            snake.len(),
            MIN_SAFE_LENGTH,
        ));
    }

    #[test]
    fn tail_cell_is_fatal_at_minimum_length() {
        // At minimum length the tail is the segment right behind the head.
        let snake = Snake::new(Grid::new(9, 9), Cell::new(4, 4), Direction::Up, MIN_SAFE_LENGTH);
        assert!(!legal_move(
            snake.tail(),
            &snake.occupied(),
            snake.tail(),
            snake.len(),
            MIN_SAFE_LENGTH,
        ));
    }
}

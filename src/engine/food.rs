use super::grid::{Cell, Grid};
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;
use std::ops::Range;

/// How many uniform draws to attempt before switching to an exhaustive
/// choice over the free cells
const SPAWN_ATTEMPTS: usize = 128;

/// The one piece of food on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) cell: Cell,
    pub(crate) bonus: bool,
}

/// Place a new piece of food on a cell the snake does not occupy.
///
/// Cells are drawn uniformly from the grid inset by
/// [`consts::FOOD_SPAWN_MARGIN`] on every side and re-drawn while they land
/// on the snake.  The retry loop is bounded; if the board is dense the draw
/// falls back to choosing among the remaining free cells (inset first, then
/// the whole grid), so the result is occupied-free whenever any free cell
/// exists.  Returns `None` only when the snake covers the entire grid.
pub(super) fn spawn<R: Rng>(
    rng: &mut R,
    grid: Grid,
    occupied: &HashSet<Cell>,
    score: u32,
    bonus_interval: u32,
) -> Option<Food> {
    let bonus = score != 0 && score % bonus_interval == 0;
    sample_free(rng, grid, occupied).map(|cell| Food { cell, bonus })
}

fn sample_free<R: Rng>(rng: &mut R, grid: Grid, occupied: &HashSet<Cell>) -> Option<Cell> {
    let rows = inset(grid.rows);
    let cols = inset(grid.cols);
    if !rows.is_empty() && !cols.is_empty() {
        for _ in 0..SPAWN_ATTEMPTS {
            let cell = Cell::new(
                rng.random_range(rows.clone()),
                rng.random_range(cols.clone()),
            );
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
        let in_inset = grid
            .cells()
            .filter(|c| rows.contains(&c.row) && cols.contains(&c.col))
            .filter(|c| !occupied.contains(c))
            .choose(rng);
        if in_inset.is_some() {
            return in_inset;
        }
    }
    grid.cells().filter(|c| !occupied.contains(c)).choose(rng)
}

fn inset(dim: i32) -> Range<i32> {
    consts::FOOD_SPAWN_MARGIN..dim - consts::FOOD_SPAWN_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn never_spawns_on_an_occupied_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(10, 10);
        for _ in 0..1000 {
            let occupied = grid
                .cells()
                .filter(|_| rng.random_bool(0.4))
                .collect::<HashSet<_>>();
            let food = spawn(&mut rng, grid, &occupied, 1, 5).expect("board is not full");
            assert!(!occupied.contains(&food.cell));
            assert!(grid.contains(food.cell));
        }
    }

    #[test]
    fn spawns_inside_the_margin_when_it_can() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(10, 12);
        let occupied = HashSet::new();
        for _ in 0..200 {
            let food = spawn(&mut rng, grid, &occupied, 0, 5).expect("board is empty");
            assert!((2..8).contains(&food.cell.row), "{:?}", food.cell);
            assert!((2..10).contains(&food.cell.col), "{:?}", food.cell);
        }
    }

    #[test]
    fn falls_back_outside_the_margin_when_the_inset_is_full() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        // On a 5x5 grid the inset is the single cell (2, 2).
        let grid = Grid::new(5, 5);
        let occupied = HashSet::from([Cell::new(2, 2)]);
        let food = spawn(&mut rng, grid, &occupied, 0, 5).expect("free cells remain");
        assert!(!occupied.contains(&food.cell));
        assert!(grid.contains(food.cell));
    }

    #[test]
    fn full_board_yields_no_food() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(4, 4);
        let occupied = grid.cells().collect::<HashSet<_>>();
        assert_eq!(spawn(&mut rng, grid, &occupied, 3, 5), None);
    }

    #[test]
    fn bonus_on_every_fifth_point_but_not_at_zero() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(10, 10);
        let occupied = HashSet::new();
        for (score, bonus) in [(0, false), (1, false), (5, true), (6, false), (10, true)] {
            let food = spawn(&mut rng, grid, &occupied, score, 5).expect("board is empty");
            assert_eq!(food.bonus, bonus, "score {score}");
        }
    }
}

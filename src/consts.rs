//! Assorted constants & hard-coded configuration
use crate::engine::Direction;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between frame-clock callbacks.  One snake step takes
/// [`FRAME_DIVIDER`] of these.
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(20);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default number of columns on the board
pub(crate) const GRID_COLUMNS: u16 = 76;

/// Default number of rows on the board
pub(crate) const GRID_ROWS: u16 = 19;

/// Snake length (head included) at the start of each life
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 5;

/// The direction a fresh snake faces
pub(crate) const INITIAL_DIRECTION: Direction = Direction::Up;

/// Default number of frame callbacks per effective game tick
pub(crate) const FRAME_DIVIDER: u32 = 10;

/// Every `BONUS_INTERVAL`-th point turns the next food into bonus food
pub(crate) const BONUS_INTERVAL: u32 = 5;

/// Snake lengths at or below this never get the moving-into-the-tail
/// exception from the collision check
pub(crate) const MIN_SAFE_LENGTH: usize = 2;

/// Food never spawns within this many cells of the board edge
pub(crate) const FOOD_SPAWN_MARGIN: i32 = 2;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for bonus food
pub(crate) const BONUS_FOOD_SYMBOL: char = '★';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for bonus food
pub(crate) const BONUS_FOOD_STYLE: Style =
    Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

mod paused;
use self::paused::{PauseOpt, Paused};
use crate::app::Screen;
use crate::command::Command;
use crate::config::{GameConfig, Theme};
use crate::consts;
use crate::engine::{Cell, Direction, GameEngine, GameStatus};
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::io;
use std::time::Instant;

/// The playing screen: owns the engine, feeds it frames & input, and draws
/// its snapshots.  The engine never hears about any of the terminal side.
#[derive(Clone, Debug)]
pub(crate) struct PlayScreen<R = rand::rngs::ThreadRng> {
    engine: GameEngine<R>,
    theme: Theme,
    overlay: Option<Paused>,
    next_frame: Option<Instant>,
}

impl PlayScreen<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: GameConfig, theme: Theme) -> Self {
        PlayScreen::new_with_rng(config, theme, rand::rng())
    }
}

impl<R: Rng> PlayScreen<R> {
    pub(crate) fn new_with_rng(config: GameConfig, theme: Theme, rng: R) -> PlayScreen<R> {
        PlayScreen {
            engine: GameEngine::new_with_rng(config, rng),
            theme,
            overlay: None,
            next_frame: None,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Wait for the next key event or frame deadline, whichever comes
    /// first.  Frame deadlines go to the engine; everything else is handled
    /// here.
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.engine.status() == GameStatus::Running {
            if self.next_frame.is_none() {
                self.next_frame = Some(Instant::now() + consts::FRAME_PERIOD);
            }
            let when = self.next_frame.expect("next_frame should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.engine
                    .tick()
                    .expect("the engine was checked to be running");
                self.next_frame = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.engine.status() {
            GameStatus::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.engine.set_direction(Direction::Up),
                        Command::Down => self.engine.set_direction(Direction::Down),
                        Command::Left => self.engine.set_direction(Direction::Left),
                        Command::Right => self.engine.set_direction(Direction::Right),
                        Command::Esc | Command::Space => self.pause(),
                        _ => (),
                    }
                }
            }
            GameStatus::Paused => {
                let menu = self
                    .overlay
                    .as_mut()
                    .expect("a paused game always has its menu");
                match menu.handle_event(event)? {
                    PauseOpt::Resume => {
                        self.overlay = None;
                        self.engine.start();
                    }
                    PauseOpt::Restart => return Some(self.restart()),
                    PauseOpt::Quit => return Some(Screen::Quit),
                }
            }
            GameStatus::Stopped | GameStatus::GameOver => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Space | Command::Enter => self.engine.start(),
                    Command::R => return Some(self.restart()),
                    Command::Quit | Command::Q => return Some(Screen::Quit),
                    _ => (),
                }
            }
        }
        None
    }

    fn pause(&mut self) {
        self.engine.pause();
        self.overlay = Some(Paused::new());
        self.next_frame = None;
    }

    /// A restart replaces the whole engine: score, lives, and RNG start
    /// over.
    fn restart(&self) -> Screen {
        Screen::Play(PlayScreen::new(self.engine.config(), self.theme))
    }
}

impl<R> Widget for &PlayScreen<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.engine.snapshot();
        let display = get_display_area(area);
        let [score_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let config = self.engine.config();
        Line::styled(
            format!(
                " Score: {}   Speed: {}   Lives lost: {}",
                snap.score, config.frame_divider, snap.lives_lost
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_size = Size {
            width: config.columns.saturating_add(2),
            height: config.rows.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        // The board is a torus, so the border is always the dotted
        // "you can pass through me" one.
        DottedBorder.render(block_area, buf);

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &cell in snap.segments.iter().skip(1) {
            board.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, self.theme.snake);
        }
        if let Some(food) = snap.food {
            if food.bonus {
                board.draw_cell(food.cell, consts::BONUS_FOOD_SYMBOL, self.theme.bonus_food);
            } else {
                board.draw_cell(food.cell, consts::FOOD_SYMBOL, self.theme.food);
            }
        }
        // Draw the head last so it wins any overlap
        if let Some(&head) = snap.segments.front() {
            board.draw_cell(head, head_symbol(snap.direction), self.theme.snake);
        }

        match snap.status {
            GameStatus::Running => (),
            GameStatus::Stopped => {
                Line::from_iter([
                    Span::raw(" Press "),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(" to start — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            GameStatus::GameOver => {
                Span::from(" — GAME OVER —").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Press "),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(" to play again — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            GameStatus::Paused => {
                if let Some(menu) = self.overlay {
                    let menu_area = center_rect(
                        display,
                        Size {
                            width: Paused::WIDTH,
                            height: Paused::HEIGHT,
                        },
                    );
                    menu.render(menu_area, buf);
                }
            }
        }
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// Maps board cells to buffer cells inside `area`
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut ratatui::buffer::Cell> {
        let x = self.area.x.checked_add(x)?;
        let y = self.area.y.checked_add(y)?;
        self.buf.cell_mut((x, y))
    }

    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Ok(x) = u16::try_from(cell.col) else {
            return;
        };
        let Ok(y) = u16::try_from(cell.row) else {
            return;
        };
        if let Some(buf_cell) = self.cell_mut(x, y) {
            buf_cell.set_char(symbol);
            buf_cell.set_style(Style::reset().patch(style));
        }
    }
}

/// The board border: dotted, because every edge leads somewhere
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut set = |x: u16, y: u16, symbol: char| {
            if let Some(cell) = buf.cell_mut((area.x.saturating_add(x), area.y.saturating_add(y))) {
                cell.set_char(symbol);
            }
        };
        for x in 1..max_x {
            set(x, 0, '⋯');
            set(x, max_y, '⋯');
        }
        for y in 1..max_y {
            set(0, y, '⋮');
            set(max_x, y, '⋮');
        }
        set(0, 0, '·');
        set(max_x, 0, '·');
        set(0, max_y, '·');
        set(max_x, max_y, '·');
    }
}

//! Screen geometry shared by hit-testing and drawing.

use crate::board::GridPos;
use crate::config::DisplayConfig;
use crate::controller::{Difficulty, PauseChoice};

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment test
    #[must_use]
    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        px >= f64::from(self.x)
            && px < f64::from(self.x + self.width)
            && py >= f64::from(self.y)
            && py < f64::from(self.y + self.height)
    }

    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

const MENU_BUTTON_SIZE: (i32, i32) = (400, 90);
const MENU_FIRST_Y: i32 = 240;
const MENU_GAP: i32 = 120;

const PAUSE_BUTTON_SIZE: (i32, i32) = (380, 80);
const PAUSE_FIRST_Y: i32 = 300;
const PAUSE_GAP: i32 = 110;

/// Fixed positions of the board, reference image and buttons
#[derive(Debug, Clone)]
pub struct Layout {
    screen: Rect,
    board: Rect,
    reference: Rect,
    menu: Vec<(Difficulty, Rect)>,
    pause: Vec<(PauseChoice, Rect)>,
}

impl Layout {
    /// Compute the layout for a display
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // Screen sizes are far below i32::MAX
    pub fn new(display: &DisplayConfig) -> Self {
        let width = display.width as i32;
        let height = display.height as i32;
        let margin = display.margin as i32;

        let board_side = height - 2 * margin;
        let board = Rect::new(width - board_side - margin, margin, board_side, board_side);
        let reference_side = board_side / 2;
        let reference = Rect::new(margin, margin, reference_side, reference_side);

        let menu = Difficulty::ALL
            .iter()
            .enumerate()
            .map(|(i, &difficulty)| {
                let rect = Rect::new(
                    width / 2 - MENU_BUTTON_SIZE.0 / 2,
                    MENU_FIRST_Y + i as i32 * MENU_GAP,
                    MENU_BUTTON_SIZE.0,
                    MENU_BUTTON_SIZE.1,
                );
                (difficulty, rect)
            })
            .collect();

        let pause = PauseChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, &choice)| {
                let rect = Rect::new(
                    width / 2 - PAUSE_BUTTON_SIZE.0 / 2,
                    PAUSE_FIRST_Y + i as i32 * PAUSE_GAP,
                    PAUSE_BUTTON_SIZE.0,
                    PAUSE_BUTTON_SIZE.1,
                );
                (choice, rect)
            })
            .collect();

        Self {
            screen: Rect::new(0, 0, width, height),
            board,
            reference,
            menu,
            pause,
        }
    }

    #[must_use]
    pub const fn screen(&self) -> Rect {
        self.screen
    }

    #[must_use]
    pub const fn board(&self) -> Rect {
        self.board
    }

    #[must_use]
    pub const fn reference(&self) -> Rect {
        self.reference
    }

    #[must_use]
    pub fn menu_buttons(&self) -> &[(Difficulty, Rect)] {
        &self.menu
    }

    #[must_use]
    pub fn pause_buttons(&self) -> &[(PauseChoice, Rect)] {
        &self.pause
    }

    /// Difficulty button under the cursor
    #[must_use]
    pub fn menu_item_at(&self, point: (f64, f64)) -> Option<Difficulty> {
        self.menu.iter().find(|(_, rect)| rect.contains(point)).map(|(d, _)| *d)
    }

    /// Pause menu button under the cursor
    #[must_use]
    pub fn pause_item_at(&self, point: (f64, f64)) -> Option<PauseChoice> {
        self.pause.iter().find(|(_, rect)| rect.contains(point)).map(|(c, _)| *c)
    }

    /// Side of one tile for a board of `grid_size` cells
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn tile_side(&self, grid_size: usize) -> i32 {
        self.board.width / grid_size.max(1) as i32
    }

    /// Screen rectangle of a board cell
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn cell_rect(&self, pos: GridPos, grid_size: usize) -> Rect {
        let side = self.tile_side(grid_size);
        Rect::new(
            self.board.x + pos.col as i32 * side,
            self.board.y + pos.row as i32 * side,
            side,
            side,
        )
    }

    /// Board cell under the cursor; `None` outside the board
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn board_cell_at(&self, point: (f64, f64), grid_size: usize) -> Option<GridPos> {
        if grid_size == 0 || !self.board.contains(point) {
            return None;
        }
        let side = f64::from(self.tile_side(grid_size));
        if side <= 0.0 {
            return None;
        }
        let col = ((point.0 - f64::from(self.board.x)) / side).floor() as usize;
        let row = ((point.1 - f64::from(self.board.y)) / side).floor() as usize;
        (row < grid_size && col < grid_size).then_some(GridPos::new(row, col))
    }
}

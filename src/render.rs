//! Presentation layer: draws controller snapshots and reports key presses.

use crate::{
    board::GridPos,
    config::DisplayConfig,
    controller::{Difficulty, GamePhase, KeyInput, PauseChoice, Snapshot},
    layout::{Layout, Rect as LayoutRect},
    utils::{
        format_elapsed,
        safe_cast::{f64_to_i32_clamp, usize_to_i32},
    },
    Error, Result,
};
use log::{debug, info};
use opencv::{
    core::{self, Mat, Point, Rect, Scalar, Size, VecN, CV_8UC3},
    highgui::{self, WINDOW_AUTOSIZE},
    imgcodecs,
    imgproc::{self, InterpolationFlags, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
};
use std::path::{Path, PathBuf};

const KEY_ESCAPE: i32 = 27;

const BACKDROP: Scalar = VecN([30.0, 20.0, 20.0, 0.0]);
const BUTTON: Scalar = VecN([90.0, 50.0, 40.0, 0.0]);
const BUTTON_HOVER: Scalar = VecN([200.0, 120.0, 60.0, 0.0]);
const TEXT: Scalar = VecN([255.0, 255.0, 255.0, 0.0]);
const BLANK_TILE: Scalar = VecN([15.0, 10.0, 10.0, 0.0]);
const GRID_LINE: Scalar = VecN([60.0, 40.0, 40.0, 0.0]);
const CURSOR_ACTIVE: Scalar = VecN([0.0, 165.0, 255.0, 0.0]);
const CURSOR_IDLE: Scalar = VecN([0.0, 255.0, 0.0, 0.0]);
const WIN_TEXT: Scalar = VecN([80.0, 255.0, 120.0, 0.0]);

/// Sink for per-frame snapshots
pub trait Presenter {
    /// Prepare `image` as a `grid_size` x `grid_size` puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or decoded
    fn load_puzzle(&mut self, image: &Path, grid_size: usize) -> Result<()>;

    /// Draw one frame and return the key pressed since the last one
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or window handling fails
    fn present(&mut self, snapshot: &Snapshot<'_>) -> Result<KeyInput>;
}

struct PuzzleArt {
    grid_size: usize,
    reference: Mat,
    tiles: Vec<Mat>,
}

/// OpenCV `highgui` window presenter
pub struct WindowPresenter {
    window: String,
    layout: Layout,
    background: Option<Mat>,
    puzzle: Option<PuzzleArt>,
}

impl WindowPresenter {
    /// Open the game window
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created or the background
    /// image cannot be decoded
    pub fn new(display: &DisplayConfig, background: Option<&Path>) -> Result<Self> {
        let layout = Layout::new(display);
        let screen = layout.screen();

        let background = background
            .map(|path| {
                let image = read_image(path)?;
                let mut resized = Mat::default();
                imgproc::resize(
                    &image,
                    &mut resized,
                    Size::new(screen.width, screen.height),
                    0.0,
                    0.0,
                    InterpolationFlags::INTER_AREA as i32,
                )?;
                Ok::<_, Error>(resized)
            })
            .transpose()?;

        highgui::named_window(&display.window_title, WINDOW_AUTOSIZE)?;
        info!("Opened window '{}' at {}x{}", display.window_title, screen.width, screen.height);

        Ok(Self {
            window: display.window_title.clone(),
            layout,
            background,
            puzzle: None,
        })
    }

    fn blank_canvas(&self) -> Result<Mat> {
        if let Some(background) = &self.background {
            return Ok(background.try_clone()?);
        }
        let screen = self.layout.screen();
        let mut canvas = Mat::zeros(screen.height, screen.width, CV_8UC3)?.to_mat()?;
        imgproc::rectangle(&mut canvas, cv_rect(screen), BACKDROP, -1, LINE_8, 0)?;
        Ok(canvas)
    }

    fn draw_menu(&self, canvas: &mut Mat, hovered: Option<Difficulty>) -> Result<()> {
        let screen = self.layout.screen();
        draw_centered_text(canvas, "Select Difficulty", (screen.width / 2, 150), 1.6, 3, TEXT)?;
        draw_centered_text(
            canvas,
            "Point with your right hand, pinch to choose",
            (screen.width / 2, 195),
            0.7,
            1,
            TEXT,
        )?;
        for &(difficulty, rect) in self.layout.menu_buttons() {
            draw_button(canvas, rect, difficulty.label(), hovered == Some(difficulty))?;
        }
        Ok(())
    }

    fn draw_game(&self, canvas: &mut Mat, snapshot: &Snapshot<'_>) -> Result<()> {
        let Some(board) = snapshot.board else {
            return Ok(());
        };

        if let Some(art) = self.puzzle.as_ref().filter(|art| art.grid_size == board.grid_size()) {
            {
                let mut roi = canvas.roi_mut(cv_rect(self.layout.reference()))?;
                art.reference.copy_to(&mut roi)?;
            }

            let n = board.grid_size();
            for (row, ids) in board.grid().iter().enumerate() {
                for (col, &id) in ids.iter().enumerate() {
                    let cell = cv_rect(self.layout.cell_rect(GridPos::new(row, col), n));
                    if id == board.blank_id() && !snapshot.reveal_blank {
                        imgproc::rectangle(canvas, cell, BLANK_TILE, -1, LINE_8, 0)?;
                    } else if let Some(tile) = art.tiles.get(id) {
                        let mut roi = canvas.roi_mut(cell)?;
                        tile.copy_to(&mut roi)?;
                    }
                    imgproc::rectangle(canvas, cell, GRID_LINE, 2, LINE_8, 0)?;
                }
            }
        }

        let reference = self.layout.reference();
        let info_x = reference.x;
        let mut info_y = reference.y + reference.height + 50;
        if let Some(difficulty) = snapshot.difficulty {
            draw_text(canvas, difficulty.label(), (info_x, info_y), 0.9, 2, TEXT)?;
            info_y += 45;
        }
        if let Some(elapsed) = snapshot.elapsed {
            let time = format!("Time {}", format_elapsed(elapsed));
            draw_text(canvas, &time, (info_x, info_y), 0.9, 2, TEXT)?;
            info_y += 45;
        }
        let moves = format!("Moves {}", snapshot.moves);
        draw_text(canvas, &moves, (info_x, info_y), 0.9, 2, TEXT)?;
        info_y += 45;
        draw_text(canvas, "Left fist: pause", (info_x, info_y), 0.6, 1, TEXT)?;
        Ok(())
    }

    fn draw_pause(&self, canvas: &mut Mat, hovered: Option<PauseChoice>) -> Result<()> {
        shade(canvas, 0.6)?;
        let screen = self.layout.screen();
        draw_centered_text(canvas, "Paused", (screen.width / 2, 220), 1.6, 3, TEXT)?;
        for &(choice, rect) in self.layout.pause_buttons() {
            draw_button(canvas, rect, choice.label(), hovered == Some(choice))?;
        }
        Ok(())
    }

    fn draw_win(&self, canvas: &mut Mat, snapshot: &Snapshot<'_>) -> Result<()> {
        shade(canvas, 0.35)?;
        let center = self.layout.screen().center();
        draw_centered_text(canvas, "Solved!", (center.0, center.1 - 20), 2.2, 4, WIN_TEXT)?;
        if let Some(elapsed) = snapshot.elapsed {
            let summary = format!("{} in {} moves", format_elapsed(elapsed), snapshot.moves);
            draw_centered_text(canvas, &summary, (center.0, center.1 + 40), 1.0, 2, TEXT)?;
        }
        Ok(())
    }

    fn draw_cursor(&self, canvas: &mut Mat, snapshot: &Snapshot<'_>) -> Result<()> {
        let Some((x, y)) = snapshot.gesture.cursor else {
            return Ok(());
        };
        let screen = self.layout.screen();
        let center = Point::new(
            f64_to_i32_clamp(x, 0, screen.width - 1),
            f64_to_i32_clamp(y, 0, screen.height - 1),
        );

        if snapshot.gesture.pinch_active {
            imgproc::circle(canvas, center, 12, CURSOR_ACTIVE, -1, LINE_AA, 0)?;
            imgproc::circle(canvas, center, 15, TEXT, 2, LINE_AA, 0)?;
        } else {
            imgproc::circle(canvas, center, 14, CURSOR_IDLE, 3, LINE_AA, 0)?;
        }
        Ok(())
    }
}

impl Presenter for WindowPresenter {
    fn load_puzzle(&mut self, image: &Path, grid_size: usize) -> Result<()> {
        let source = read_image(image)?;
        let side = self.layout.tile_side(grid_size);
        let board_side = side * usize_to_i32(grid_size)?;

        let mut board_image = Mat::default();
        imgproc::resize(
            &source,
            &mut board_image,
            Size::new(board_side, board_side),
            0.0,
            0.0,
            InterpolationFlags::INTER_AREA as i32,
        )?;

        let mut tiles = Vec::with_capacity(grid_size * grid_size);
        for row in 0..grid_size {
            for col in 0..grid_size {
                let cell = self.layout.cell_rect(GridPos::new(row, col), grid_size);
                let local = Rect::new(
                    cell.x - self.layout.board().x,
                    cell.y - self.layout.board().y,
                    side,
                    side,
                );
                tiles.push(Mat::roi(&board_image, local)?.try_clone()?);
            }
        }

        let reference_rect = self.layout.reference();
        let mut reference = Mat::default();
        imgproc::resize(
            &source,
            &mut reference,
            Size::new(reference_rect.width, reference_rect.height),
            0.0,
            0.0,
            InterpolationFlags::INTER_AREA as i32,
        )?;

        debug!("Cut {} into {} tiles of {}px", image.display(), tiles.len(), side);
        self.puzzle = Some(PuzzleArt {
            grid_size,
            reference,
            tiles,
        });
        Ok(())
    }

    fn present(&mut self, snapshot: &Snapshot<'_>) -> Result<KeyInput> {
        let mut canvas = self.blank_canvas()?;

        match snapshot.phase {
            GamePhase::SelectDifficulty => self.draw_menu(&mut canvas, snapshot.hovered_menu)?,
            GamePhase::Playing => self.draw_game(&mut canvas, snapshot)?,
            GamePhase::Paused => {
                self.draw_game(&mut canvas, snapshot)?;
                self.draw_pause(&mut canvas, snapshot.hovered_pause)?;
            }
            GamePhase::Won => {
                self.draw_game(&mut canvas, snapshot)?;
                self.draw_win(&mut canvas, snapshot)?;
            }
        }
        self.draw_cursor(&mut canvas, snapshot)?;

        highgui::imshow(&self.window, &canvas)?;
        let key = highgui::wait_key(1)?;
        Ok(match key {
            KEY_ESCAPE => KeyInput::Escape,
            k if k == i32::from(b'q') || k == i32::from(b'Q') => KeyInput::Quit,
            _ => KeyInput::None,
        })
    }
}

impl Drop for WindowPresenter {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close windows: {e}");
        }
    }
}

/// Presenter without a window; logs screen changes
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    phases: Vec<GamePhase>,
    loaded: Vec<(PathBuf, usize)>,
    frames: u64,
}

impl HeadlessPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every distinct phase shown, in order
    #[must_use]
    pub fn phases(&self) -> &[GamePhase] {
        &self.phases
    }

    /// Puzzles prepared so far
    #[must_use]
    pub fn loaded(&self) -> &[(PathBuf, usize)] {
        &self.loaded
    }

    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for HeadlessPresenter {
    fn load_puzzle(&mut self, image: &Path, grid_size: usize) -> Result<()> {
        std::fs::File::open(image)
            .map_err(|e| Error::Asset(format!("Cannot read puzzle image {}: {e}", image.display())))?;
        info!("Prepared {} as a {grid_size}x{grid_size} puzzle", image.display());
        self.loaded.push((image.to_path_buf(), grid_size));
        Ok(())
    }

    fn present(&mut self, snapshot: &Snapshot<'_>) -> Result<KeyInput> {
        self.frames += 1;
        if self.phases.last() != Some(&snapshot.phase) {
            info!(
                "Screen: {:?} (frame {}, moves {})",
                snapshot.phase, self.frames, snapshot.moves
            );
            self.phases.push(snapshot.phase);
        }
        Ok(KeyInput::None)
    }
}

fn read_image(path: &Path) -> Result<Mat> {
    let name = path
        .to_str()
        .ok_or_else(|| Error::Asset(format!("Non UTF-8 image path: {}", path.display())))?;
    let image = imgcodecs::imread(name, imgcodecs::IMREAD_COLOR)?;
    if image.empty() {
        return Err(Error::Asset(format!("Could not decode image {}", path.display())));
    }
    Ok(image)
}

const fn cv_rect(rect: LayoutRect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}

/// Darken the whole canvas, `amount` in `[0, 1]`
fn shade(canvas: &mut Mat, amount: f64) -> Result<()> {
    let dark = Mat::zeros(canvas.rows(), canvas.cols(), canvas.typ())?.to_mat()?;
    let mut blended = Mat::default();
    core::add_weighted(&*canvas, 1.0 - amount, &dark, amount, 0.0, &mut blended, -1)?;
    *canvas = blended;
    Ok(())
}

fn draw_button(canvas: &mut Mat, rect: LayoutRect, label: &str, hovered: bool) -> Result<()> {
    let color = if hovered { BUTTON_HOVER } else { BUTTON };
    imgproc::rectangle(canvas, cv_rect(rect), color, -1, LINE_8, 0)?;
    imgproc::rectangle(canvas, cv_rect(rect), TEXT, if hovered { 3 } else { 1 }, LINE_8, 0)?;
    draw_centered_text(canvas, label, rect.center(), 1.1, 2, TEXT)
}

fn draw_text(canvas: &mut Mat, text: &str, origin: (i32, i32), scale: f64, thickness: i32, color: Scalar) -> Result<()> {
    imgproc::put_text(
        canvas,
        text,
        Point::new(origin.0, origin.1),
        FONT_HERSHEY_SIMPLEX,
        scale,
        color,
        thickness,
        LINE_AA,
        false,
    )?;
    Ok(())
}

/// Draw `text` with its box centered on `center`
fn draw_centered_text(
    canvas: &mut Mat,
    text: &str,
    center: (i32, i32),
    scale: f64,
    thickness: i32,
    color: Scalar,
) -> Result<()> {
    let mut baseline = 0;
    let size = imgproc::get_text_size(text, FONT_HERSHEY_SIMPLEX, scale, thickness, &mut baseline)?;
    draw_text(
        canvas,
        text,
        (center.0 - size.width / 2, center.1 + size.height / 2),
        scale,
        thickness,
        color,
    )
}

//! Interaction controller: menus, play, pause and win screens.
//!
//! The controller is a plain state machine advanced once per frame by
//! [`Controller::tick`]. It never blocks and never loads assets itself; when
//! a difficulty is picked it reports [`Flow::DifficultySelected`] and waits
//! for the caller to prepare the image and call [`Controller::start_session`].

use crate::{
    board::Board,
    config::{BoardConfig, Config},
    gesture::{GestureEvent, PinchEvent},
    layout::Layout,
    Result,
};
use log::{debug, info};
use rand::rngs::StdRng;
use std::fmt;
use std::time::{Duration, Instant};

/// Bounded retries when a scramble happens to land on the solved picture
const MAX_RESHUFFLES: usize = 8;

/// Difficulty tier picked from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Menu order
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Grid size for this tier
    #[must_use]
    pub const fn grid_size(self, board: &BoardConfig) -> usize {
        match self {
            Self::Easy => board.easy,
            Self::Normal => board.normal,
            Self::Hard => board.hard,
        }
    }

    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Normal => "NORMAL",
            Self::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pause menu option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseChoice {
    Resume,
    Restart,
    Menu,
}

impl PauseChoice {
    /// Menu order
    pub const ALL: [Self; 3] = [Self::Resume, Self::Restart, Self::Menu];

    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Restart => "Restart",
            Self::Menu => "Main Menu",
        }
    }
}

/// Screen currently driven by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    SelectDifficulty,
    Playing,
    Paused,
    Won,
}

/// Keyboard input observed by the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyInput {
    #[default]
    None,
    /// Leave the current screen
    Escape,
    /// Shut down
    Quit,
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Load an image for this tier, then call `start_session`
    DifficultySelected(Difficulty),
    /// Orderly shutdown
    Exit,
}

/// Play time that excludes pauses
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
    frozen: Option<Duration>,
}

impl Stopwatch {
    #[must_use]
    pub const fn start(now: Instant) -> Self {
        Self {
            started: now,
            paused_total: Duration::ZERO,
            paused_at: None,
            frozen: None,
        }
    }

    /// Elapsed play time; constant while paused or after `freeze`
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        if let Some(frozen) = self.frozen {
            return frozen;
        }
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(self.started).saturating_sub(self.paused_total)
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Resume and return how long the pause lasted
    pub fn resume(&mut self, now: Instant) -> Duration {
        let paused_for = self
            .paused_at
            .take()
            .map_or(Duration::ZERO, |at| now.saturating_duration_since(at));
        self.paused_total += paused_for;
        paused_for
    }

    /// Stop the clock at the current reading
    pub fn freeze(&mut self, now: Instant) {
        if self.frozen.is_none() {
            self.frozen = Some(self.elapsed(now));
        }
    }

    #[must_use]
    pub const fn paused_total(&self) -> Duration {
        self.paused_total
    }
}

/// One puzzle instance
#[derive(Debug, Clone)]
pub struct Session {
    pub difficulty: Difficulty,
    pub board: Board,
    pub stopwatch: Stopwatch,
    pub moves: usize,
    won_at: Option<Instant>,
}

/// Read-only view handed to the presentation layer each frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub gesture: GestureEvent,
    pub phase: GamePhase,
    pub layout: &'a Layout,
    pub board: Option<&'a Board>,
    pub difficulty: Option<Difficulty>,
    pub elapsed: Option<Duration>,
    pub moves: usize,
    pub hovered_menu: Option<Difficulty>,
    pub hovered_pause: Option<PauseChoice>,
    /// Draw the blank tile too (solved picture)
    pub reveal_blank: bool,
}

/// Per-screen event handling on top of gesture events
pub struct Controller {
    layout: Layout,
    board_config: BoardConfig,
    selection_cooldown: Duration,
    phase: GamePhase,
    session: Option<Session>,
    hovered_menu: Option<Difficulty>,
    hovered_pause: Option<PauseChoice>,
    last_selection: Option<Instant>,
    fist_was_closed: bool,
    rng: StdRng,
}

impl Controller {
    #[must_use]
    pub fn new(config: &Config, rng: StdRng) -> Self {
        Self {
            layout: Layout::new(&config.display),
            board_config: config.board.clone(),
            selection_cooldown: config.gesture.pinch_cooldown(),
            phase: GamePhase::SelectDifficulty,
            session: None,
            hovered_menu: None,
            hovered_pause: None,
            last_selection: None,
            fist_was_closed: false,
            rng,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Mutable access to the running session
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Advance the active screen by one frame
    pub fn tick(&mut self, event: &GestureEvent, key: KeyInput, now: Instant) -> Flow {
        if key == KeyInput::Quit {
            info!("Quit requested");
            return Flow::Exit;
        }

        let fist_closed = event.left_fist && !self.fist_was_closed;
        self.fist_was_closed = event.left_fist;

        match self.phase {
            GamePhase::SelectDifficulty => self.tick_menu(event, key, now),
            GamePhase::Playing => {
                self.tick_playing(event, fist_closed, now);
                Flow::Continue
            }
            GamePhase::Paused => {
                self.tick_paused(event, key, now);
                Flow::Continue
            }
            GamePhase::Won => {
                self.tick_won(now);
                Flow::Continue
            }
        }
    }

    /// Create a fresh shuffled board for `difficulty` and enter play
    ///
    /// # Errors
    ///
    /// Returns an error if the configured grid size is invalid
    pub fn start_session(&mut self, difficulty: Difficulty, now: Instant) -> Result<()> {
        let board = self.new_board(difficulty)?;
        info!(
            "Starting {} session on a {}x{} board",
            difficulty,
            board.grid_size(),
            board.grid_size()
        );
        self.session = Some(Session {
            difficulty,
            board,
            stopwatch: Stopwatch::start(now),
            moves: 0,
            won_at: None,
        });
        self.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Read-only state for drawing
    #[must_use]
    pub fn snapshot(&self, gesture: &GestureEvent, now: Instant) -> Snapshot<'_> {
        let session = self.session.as_ref();
        Snapshot {
            gesture: *gesture,
            phase: self.phase,
            layout: &self.layout,
            board: session.map(|s| &s.board),
            difficulty: session.map(|s| s.difficulty),
            elapsed: session.map(|s| s.stopwatch.elapsed(now)),
            moves: session.map_or(0, |s| s.moves),
            hovered_menu: self.hovered_menu,
            hovered_pause: self.hovered_pause,
            reveal_blank: self.phase == GamePhase::Won,
        }
    }

    fn tick_menu(&mut self, event: &GestureEvent, key: KeyInput, now: Instant) -> Flow {
        if key == KeyInput::Escape {
            info!("Leaving from difficulty menu");
            return Flow::Exit;
        }

        let hovered = event.cursor.and_then(|c| self.layout.menu_item_at(c));
        self.hovered_menu = hovered;
        match hovered {
            Some(difficulty) if event.pinch_event == PinchEvent::PinchDown && self.accept_selection(now) => {
                info!("Difficulty selected: {difficulty}");
                Flow::DifficultySelected(difficulty)
            }
            _ => Flow::Continue,
        }
    }

    fn tick_playing(&mut self, event: &GestureEvent, fist_closed: bool, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            self.set_phase(GamePhase::SelectDifficulty);
            return;
        };

        if fist_closed {
            session.stopwatch.pause(now);
            self.set_phase(GamePhase::Paused);
            return;
        }

        if event.pinch_event == PinchEvent::PinchDown {
            let n = session.board.grid_size();
            if let Some(cell) = event.cursor.and_then(|c| self.layout.board_cell_at(c, n)) {
                if session.board.move_tile(cell) {
                    session.moves += 1;
                    debug!("Moved tile at ({}, {})", cell.row, cell.col);
                }
            }
        }

        if session.board.is_solved() {
            session.stopwatch.freeze(now);
            session.won_at = Some(now);
            info!(
                "Solved in {:.1}s with {} moves",
                session.stopwatch.elapsed(now).as_secs_f64(),
                session.moves
            );
            self.set_phase(GamePhase::Won);
        }
    }

    fn tick_paused(&mut self, event: &GestureEvent, key: KeyInput, now: Instant) {
        if key == KeyInput::Escape {
            self.return_to_menu();
            return;
        }

        self.hovered_pause = event.cursor.and_then(|c| self.layout.pause_item_at(c));
        let Some(choice) = self.hovered_pause else {
            return;
        };
        if event.pinch_event != PinchEvent::PinchDown || !self.accept_selection(now) {
            return;
        }

        match choice {
            PauseChoice::Resume => {
                if let Some(session) = self.session.as_mut() {
                    let paused_for = session.stopwatch.resume(now);
                    debug!("Resumed after {:.1}s pause", paused_for.as_secs_f64());
                }
                self.set_phase(GamePhase::Playing);
            }
            PauseChoice::Restart => {
                let restarted = self
                    .session
                    .as_ref()
                    .map(|s| s.difficulty)
                    .map(|difficulty| self.start_session(difficulty, now));
                match restarted {
                    Some(Ok(())) => {}
                    Some(Err(e)) => {
                        log::warn!("Restart failed: {e}");
                        self.return_to_menu();
                    }
                    None => self.return_to_menu(),
                }
            }
            PauseChoice::Menu => self.return_to_menu(),
        }
    }

    fn tick_won(&mut self, now: Instant) {
        let won_at = self.session.as_ref().and_then(|s| s.won_at).unwrap_or(now);
        if now.saturating_duration_since(won_at) >= self.board_config.win_display() {
            self.return_to_menu();
        }
    }

    fn new_board(&mut self, difficulty: Difficulty) -> Result<Board> {
        let n = difficulty.grid_size(&self.board_config);
        let moves_per_cell = self.board_config.shuffle_moves_per_cell;
        let mut board = Board::shuffled(n, moves_per_cell, &mut self.rng)?;
        for _ in 0..MAX_RESHUFFLES {
            if !board.is_solved() {
                break;
            }
            debug!("Scramble landed on the solved board, shuffling again");
            board.shuffle_with(moves_per_cell, &mut self.rng);
        }
        Ok(board)
    }

    fn accept_selection(&mut self, now: Instant) -> bool {
        let ready = self
            .last_selection
            .map_or(true, |last| now.saturating_duration_since(last) > self.selection_cooldown);
        if ready {
            self.last_selection = Some(now);
        }
        ready
    }

    fn return_to_menu(&mut self) {
        self.session = None;
        self.set_phase(GamePhase::SelectDifficulty);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!("Phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.hovered_menu = None;
        self.hovered_pause = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_excludes_pause() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::start(t0);
        watch.pause(t0 + Duration::from_secs(2));
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(5)), Duration::from_secs(2));
        assert_eq!(watch.resume(t0 + Duration::from_secs(6)), Duration::from_secs(4));
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(7)), Duration::from_secs(3));
        assert_eq!(watch.paused_total(), Duration::from_secs(4));
    }

    #[test]
    fn test_stopwatch_freeze() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::start(t0);
        watch.freeze(t0 + Duration::from_secs(3));
        assert_eq!(watch.elapsed(t0 + Duration::from_secs(30)), Duration::from_secs(3));
    }

    #[test]
    fn test_difficulty_grid_sizes() {
        let board = BoardConfig::default();
        assert_eq!(Difficulty::Easy.grid_size(&board), 2);
        assert_eq!(Difficulty::Normal.grid_size(&board), 3);
        assert_eq!(Difficulty::Hard.grid_size(&board), 4);
    }
}

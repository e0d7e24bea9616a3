use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use log::info;
use ratatui::{backend::Backend, Terminal};

use crate::ai::{Agent, MinimaxAgent};
use crate::config::AppConfig;
use crate::error::{BoardError, PlayError};
use crate::game::{Board, Player};
use crate::play::{MatchOutcome, MatchReport};

use super::board_widget::column_at;
use super::game_view::{self, GameView};

pub struct App {
    config: AppConfig,
    board: Board,
    computer: MinimaxAgent,
    human: Player,
    selected_column: usize,
    board_origin_x: u16,
    moves: Vec<usize>,
    /// The computer moves on the next loop turn, after a redraw.
    awaiting_computer: bool,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let computer = match config.ai.seed {
            Some(seed) => MinimaxAgent::with_seed(config.ai.depth, seed),
            None => MinimaxAgent::new(config.ai.depth),
        };
        let human = if config.ai.ai_starts {
            Player::Yellow
        } else {
            Player::Red
        };
        App {
            board: Board::new(config.board.width, config.board.height),
            selected_column: config.board.width / 2, // Start in middle
            computer,
            human,
            board_origin_x: 0,
            moves: Vec::new(),
            awaiting_computer: false,
            should_quit: false,
            message: None,
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Columns played so far in the current game.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Outcome of the current game for the human and its move history.
    /// A game that is still open counts as quit.
    pub fn report(&self) -> MatchReport {
        MatchReport {
            outcome: MatchOutcome::for_human(self.board.outcome(), self.human),
            moves: self.moves.clone(),
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), PlayError> {
        self.start();
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.awaiting_computer {
                self.computer_move()?;
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Queue the computer's opening move when it plays Red.
    fn start(&mut self) {
        if self.board.current_turn() != self.human && !self.board.is_terminal() {
            self.queue_computer_move();
        }
    }

    fn queue_computer_move(&mut self) {
        self.awaiting_computer = true;
        self.message = Some("Computer thinking...".to_string());
    }

    /// Handle keyboard and mouse events
    fn handle_events(&mut self) -> Result<(), PlayError> {
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Mouse(mouse) => self.handle_mouse(mouse)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) -> Result<(), BoardError> {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.board.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece()?;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let column = c as usize - '0' as usize;
                if column < self.board.width() {
                    self.selected_column = column;
                    self.drop_piece()?;
                } else {
                    self.message = Some(format!("No column {column} on this board"));
                }
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
        Ok(())
    }

    /// Hover selects the column under the pointer, a left click drops there.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<(), BoardError> {
        let Some(column) = column_at(
            mouse.column,
            self.board_origin_x,
            self.config.ui.cell_width,
            self.board.width(),
        ) else {
            return Ok(());
        };

        match mouse.kind {
            MouseEventKind::Moved => self.selected_column = column,
            MouseEventKind::Down(MouseButton::Left) => {
                self.message = None;
                self.selected_column = column;
                self.drop_piece()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn restart(&mut self) {
        self.board = Board::new(self.config.board.width, self.config.board.height);
        self.moves.clear();
        self.selected_column = self.board.width() / 2;
        self.awaiting_computer = false;
        self.message = Some("New game started!".to_string());
        self.start();
    }

    /// Drop the human's piece in the selected column and queue the answer.
    fn drop_piece(&mut self) -> Result<(), BoardError> {
        if self.awaiting_computer {
            return Ok(());
        }
        if self.board.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return Ok(());
        }
        if !self.board.is_available(self.selected_column) {
            self.message = Some("Column is full!".to_string());
            return Ok(());
        }

        self.board.apply_move(self.selected_column)?;
        self.moves.push(self.selected_column);
        if !self.announce_outcome() {
            self.queue_computer_move();
        }
        Ok(())
    }

    fn computer_move(&mut self) -> Result<(), BoardError> {
        self.awaiting_computer = false;
        let decision = self.computer.select_action(&mut self.board)?;
        self.board.apply_move(decision.column)?;
        self.moves.push(decision.column);
        self.message = Some(format!(
            "Computer played column {}{}",
            decision.column,
            if decision.random { " (random)" } else { "" }
        ));
        self.announce_outcome();
        Ok(())
    }

    /// Report a finished game. Returns true if the game is over.
    fn announce_outcome(&mut self) -> bool {
        let Some(result) = self.board.outcome() else {
            return false;
        };
        let outcome = MatchOutcome::for_human(Some(result), self.human);
        info!("game over after {} moves: {:?}", self.moves.len(), outcome);
        self.message = Some(format!("{outcome} Press 'r' to restart."));
        true
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        let view = GameView {
            board: &self.board,
            human: self.human,
            selected_column: self.selected_column,
            message: self.message.as_deref(),
            cell_width: self.config.ui.cell_width,
        };
        self.board_origin_x = game_view::render(frame, &view);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

use std::io;
use std::sync::mpsc::{self, Receiver};

use crate::game::{channel_observer, Game, GameEvent, COLS};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, Terminal};

use super::game_view::{self, BoardLayout, ViewState};

/// `[ui]` section of the configuration file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Column the cursor starts on (0-based)
    pub start_column: usize,
    /// Capture the mouse so cells can be clicked
    pub mouse: bool,
    pub show_column_numbers: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            start_column: 3, // Start in middle
            mouse: true,
            show_column_numbers: true,
        }
    }
}

pub struct App {
    game: Game,
    events: Receiver<GameEvent>,
    config: UiConfig,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    board_layout: Option<BoardLayout>,
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        let (tx, events) = mpsc::channel();
        let mut game = Game::new();
        game.subscribe(channel_observer(tx));

        App {
            game,
            events,
            selected_column: config.start_column.min(COLS - 1),
            config,
            should_quit: false,
            message: None,
            board_layout: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Poll for one terminal event and dispatch it
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) if self.config.mouse => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
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
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='7') => {
                let col = c as usize - '1' as usize;
                self.selected_column = col;
                self.drop_piece(col);
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(col) = self
            .board_layout
            .and_then(|layout| layout.column_at(mouse.column, mouse.row))
        else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.message = None;
                self.selected_column = col;
                self.drop_piece(col);
            }
            MouseEventKind::Moved => self.selected_column = col,
            _ => {}
        }
    }

    /// Drop into `col`. Rejected moves are ignored: the board simply does
    /// not react.
    fn drop_piece(&mut self, col: usize) {
        self.game.drop_piece(col);
        self.apply_game_events();
    }

    fn restart(&mut self) {
        self.game.restart();
        self.selected_column = self.config.start_column.min(COLS - 1);
        self.apply_game_events();
    }

    /// Update the message line from whatever the game reported since the
    /// last command.
    fn apply_game_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                GameEvent::GameWon { player, .. } => {
                    self.message = Some(format!("{player} wins! Press 'r' to restart."));
                }
                GameEvent::GameDrawn => {
                    self.message = Some("It's a draw! Press 'r' to restart.".to_string());
                }
                GameEvent::Restarted => {
                    self.message = Some("New game started!".to_string());
                }
                GameEvent::PiecePlaced { .. } | GameEvent::TurnChanged(_) => {}
            }
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame) {
        let view = ViewState {
            selected_column: self.selected_column,
            message: self.message.as_deref(),
            show_column_numbers: self.config.show_column_numbers,
        };
        self.board_layout = Some(game_view::render(frame, &self.game, &view));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

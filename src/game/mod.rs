//! Core Connect Four game logic: grid, players, the game state machine and
//! the events it emits to observers.

mod board;
mod event;
mod player;
mod state;

pub use board::{Cell, Grid, Position, COLS, CONNECT, ROWS};
pub use event::{channel_observer, GameEvent, GameObserver};
pub use player::Player;
pub use state::{Game, GameStatus};

//! Terminal UI: renders the game and turns key presses and mouse clicks
//! into moves.

mod app;
pub mod game_view;

pub use app::{App, UiConfig};

//! Terminal UI: play against the computer with the keyboard or the mouse.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;

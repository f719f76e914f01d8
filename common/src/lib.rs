pub mod config;
pub mod game;
pub mod input;
pub mod maze;
pub mod notice;
pub mod player;
pub mod render;
pub mod time;
pub mod timer;

#[cfg(test)]
mod test_helpers;

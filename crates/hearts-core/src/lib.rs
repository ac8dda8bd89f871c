//! Rules and state for Hearts with three to five players.

pub mod game;
pub mod model;

#[cfg(test)]
pub(crate) mod testing;

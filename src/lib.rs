//! 365 Daily: holidays, name days and name day wishes for a few dozen
//! countries, answered by a hosted Gemini model.

pub mod calendar;
pub mod config;
pub mod providers;
pub mod render;
pub mod traits;
pub mod types;
pub mod views;

#[cfg(test)]
mod testing;

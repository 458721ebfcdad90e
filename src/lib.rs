//! Terminal renditions of the two portfolio demo games: a one-on-one
//! fighter ("Neon Strike") and a wrap-around Snake.
//!
//! Simulation modules are pure (`&State -> State`, injected time and RNG);
//! all terminal I/O lives in `display` and the binary.

pub mod config;
pub mod display;
pub mod fight;
pub mod input;
pub mod prefs;
pub mod snake;

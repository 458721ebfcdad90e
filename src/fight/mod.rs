//! Neon Strike: one player-controlled fighter against an AI opponent.

pub mod ai;
pub mod compute;
pub mod entities;

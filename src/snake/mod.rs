//! Snake on a toroidal grid, advanced on a fixed interval.

pub mod compute;
pub mod entities;

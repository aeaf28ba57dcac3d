//! Pokéfav - browse the first Pokémon, keep favorites, see their type mix.
//!
//! The library exposes the app's modules so integration tests can drive the
//! reducer, the session services and the render functions directly.

pub mod action;
pub mod breakdown;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod favorites;
pub mod generation;
pub mod logging;
pub mod pager;
pub mod reducer;
pub mod selection;
pub mod session;
pub mod state;
pub mod ui;

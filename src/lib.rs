//! Library entry for appmarket exposing the marketplace list for the binary and integration tests.

pub mod config;
pub mod controller;
pub mod events;
pub mod logic;
pub mod sources;
pub mod state;
pub mod ui;
pub mod util;

//! A terminal grid of tiles parsed from a text template, with swipe gesture
//! detection on the mouse and value-style tile swaps.

pub mod app;
pub mod config;
pub mod gesture;
pub mod grid;
pub mod theme;
pub mod ui;

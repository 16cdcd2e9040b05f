pub mod config;
pub mod error;
pub mod screen;
pub mod solution;
pub mod widget;

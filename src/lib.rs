pub mod analysis;
pub mod app;
pub mod data;
pub mod processing;
pub mod render;
pub mod state;
pub mod ui;

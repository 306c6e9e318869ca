pub mod app;
pub mod config;
pub mod event;
pub mod generator;
pub mod session;
pub mod timer;
pub mod ui;

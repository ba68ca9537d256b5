pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infra;
pub mod platform;
pub mod prompt;
pub mod ui;
pub mod usecase;

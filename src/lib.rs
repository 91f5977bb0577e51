pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod render;
pub mod scanner;
pub mod workflow;

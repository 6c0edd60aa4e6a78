//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod output;
pub mod plan;
pub mod project;
pub mod run;

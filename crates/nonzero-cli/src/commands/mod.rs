pub mod completions;
pub mod config;
pub mod stats;
pub mod suggest;

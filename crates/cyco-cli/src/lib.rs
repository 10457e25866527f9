pub mod cli;
pub mod config;
pub mod pipeline;

pub use cli::{Cli, Commands};
pub use config::CycoConfig;
pub use pipeline::{run, RunOptions, RunReport};

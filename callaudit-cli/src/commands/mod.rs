//! Command handlers -- one module per subcommand

pub mod audit;
pub mod catchers;
pub mod config;

//! CLI subcommand implementations.

pub mod info;
pub mod search;
pub mod series;
pub mod table;

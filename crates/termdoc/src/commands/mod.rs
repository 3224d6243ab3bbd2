//! Subcommand implementations. Each returns a [`Report`](crate::output::Report).

pub mod audit;
pub mod resolve;

//! CLI subcommand implementations.

pub mod fragment;
pub mod inspect;
pub mod probe;
pub mod style;

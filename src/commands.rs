//! Subcommand implementations invoked by [`crate::cli`].

pub mod list;
pub mod run;

//! Process execution for toolchain invocations.

pub mod command;

pub use command::{run, CommandOptions, CommandResult};

//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::DEFAULT_MANIFEST;

/// featprobe - probe the C++ toolchain and write a config header.
#[derive(Debug, Parser)]
#[command(name = "featprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the probe manifest
    #[arg(short, long, global = true, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run probes and write the header (default if no command specified)
    Run(RunArgs),

    /// List probe groups and the macros they define
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Header to write (overrides the manifest)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Scratch directory for probe sources (overrides the manifest)
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Re-run probes even if the header exists
    #[arg(short, long)]
    pub force: bool,

    /// C++ compiler to use instead of autodetection
    #[arg(long, env = "FEATPROBE_CXX")]
    pub compiler: Option<String>,

    /// Extra compiler flag (repeatable)
    #[arg(
        long = "cxxflag",
        env = "FEATPROBE_CXXFLAGS",
        value_delimiter = ' ',
        allow_hyphen_values = true
    )]
    pub cxxflags: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

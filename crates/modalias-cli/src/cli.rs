//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use modalias_config::AliasOptions;

/// modalias - inspect module alias configurations
#[derive(Parser, Debug)]
#[command(
    name = "modalias",
    version,
    about = "Inspect module alias configurations",
    long_about = "Loads alias settings the way a module loader would at startup and shows\n\
                  how requests are rewritten and which directories are searched."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Root directory (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Settings file relative to the root (default: package.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub file: Option<String>,

    /// Extra module directory relative to the root (repeatable)
    #[arg(long = "modules-dir", global = true, value_name = "DIR")]
    pub modules_dir: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Options given explicitly on the command line.
    pub fn options(&self) -> AliasOptions {
        AliasOptions {
            cwd: self.cwd.clone(),
            modules_dir: self.modules_dir.clone(),
            file: self.file.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show how requests are rewritten by the configured aliases
    Rewrite(RewriteArgs),

    /// Print the module search path list computed for a directory
    Paths(PathsArgs),

    /// Resolve a request to a file through aliases and search directories
    Resolve(ResolveArgs),

    /// Report the settings file status, aliases and search directories
    Check,
}

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Module requests to rewrite
    #[arg(required = true, value_name = "REQUEST")]
    pub requests: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Requesting directory (default: the root)
    #[arg(value_name = "FROM")]
    pub from: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Module request
    #[arg(value_name = "REQUEST")]
    pub request: String,

    /// Directory the request is made from (default: the root)
    #[arg(long, value_name = "DIR")]
    pub from: Option<PathBuf>,
}

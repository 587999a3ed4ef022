pub mod setup;

use clap::Parser;
use std::path::PathBuf;

/// Finds methods without tests (and tests without methods) in Ruby sources
/// and prints skeletons for the missing ones.
#[derive(Parser, Debug)]
#[command(name = "testgap")]
#[command(version, disable_version_flag = true)]
#[command(after_help = "Use - as a file name to read source from standard input.")]
pub struct Cli {
    /// Ruby source files or directories to analyze
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Test classes are named FooTest instead of TestFoo
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,

    /// Run the generated code with ruby instead of printing it
    #[arg(short = 'e', long = "eval")]
    pub eval: bool,

    /// Keep methods every object has for all classes
    #[arg(short = 'f', long = "full")]
    pub full: bool,

    /// Increase diagnostic output (-d: debug, -dd: trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Configuration file (default: nearest .testgap.toml)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

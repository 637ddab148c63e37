mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use tvbuild_lib::config::BuildMode;

use crate::output::{OutputFormat, print_error};

/// tvb - per-platform deliverable assembly for TV web apps
#[derive(Parser)]
#[command(name = "tvb")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Assemble the deliverable for one platform
  Build {
    #[command(flatten)]
    target: TargetArgs,

    /// Generic entry document (default: <out>/index.html, or <root>/index.html in development)
    #[arg(long)]
    generic: Option<PathBuf>,

    /// JSON module list written by the bundler, used for chunk totals
    #[arg(long)]
    modules: Option<PathBuf>,

    /// Skip the bundle size report
    #[arg(long)]
    no_report: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Print the configuration handed to the external bundler
  Config {
    #[command(flatten)]
    target: TargetArgs,
  },

  /// List supported platforms
  Platforms {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Show which vendor chunk module paths are assigned to
  Chunk {
    /// Resolved module paths
    #[arg(required = true)]
    modules: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

/// Options shared by commands that resolve a build configuration.
#[derive(Args)]
pub struct TargetArgs {
  /// Target platform (default: $VITE_PLATFORM, then webos)
  #[arg(short, long)]
  pub platform: Option<String>,

  /// Build mode
  #[arg(short, long, value_enum, default_value_t)]
  pub mode: ModeArg,

  /// Project root
  #[arg(long, default_value = ".")]
  pub root: PathBuf,

  /// Output directory (default: <root>/dist)
  #[arg(long)]
  pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ModeArg {
  #[default]
  Release,
  Development,
}

impl From<ModeArg> for BuildMode {
  fn from(mode: ModeArg) -> Self {
    match mode {
      ModeArg::Release => BuildMode::Release,
      ModeArg::Development => BuildMode::Development,
    }
  }
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build {
      target,
      generic,
      modules,
      no_report,
      output,
    } => cmd::cmd_build(
      target,
      cmd::BuildInputs {
        generic,
        modules,
        no_report,
      },
      output,
    ),
    Commands::Config { target } => cmd::cmd_config(target),
    Commands::Platforms { output } => cmd::cmd_platforms(output),
    Commands::Chunk { modules, output } => cmd::cmd_chunk(&modules, output),
  };

  if let Err(e) = result {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

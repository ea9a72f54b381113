use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use self::{build::BuildArg, zone::ZoneArg};

mod build;
mod config;
mod zone;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug output (per-row drop reasons)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Log warnings and errors only
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build the pitch-pattern lookup model from a corpus CSV file
    Build(#[clap(flatten)] BuildArg),
    /// Print the zone of one plate location
    Zone(#[clap(flatten)] ZoneArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(&args);
    match &args.mode {
        Mode::Build(arg) => build::run(arg)?,
        Mode::Zone(arg) => zone::run(arg)?,
    }
    Ok(())
}

/// `RUST_LOG` takes precedence over `-v`/`-q`.
fn init_tracing(args: &CommandArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

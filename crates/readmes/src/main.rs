//! readmes CLI - repository browser pages with README files spliced in.
//!
//! Provides commands for:
//! - `render`: Render the browser page for a repository path to stdout

mod commands;
mod error;
mod output;
mod page;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// Log directives for `--verbose`.
const VERBOSE_FILTER: &str = "warn,readmes=debug,readmes_browser=debug,readmes_config=debug,\
                              readmes_render=debug,readmes_repo=debug,readmes_tree=debug";

/// readmes - README rendering for repository browser pages.
#[derive(Parser)]
#[command(name = "readmes", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the browser page for a path.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables DEBUG for the readmes crates, otherwise use RUST_LOG
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_targets_readmes_crates() {
        assert!(VERBOSE_FILTER.parse::<EnvFilter>().is_ok());
        for directive in VERBOSE_FILTER.split(',').skip(1) {
            assert!(directive.starts_with("readmes"), "{directive}");
            assert!(directive.ends_with("=debug"), "{directive}");
        }
        assert!(!VERBOSE_FILTER.contains("git2"));
    }
}

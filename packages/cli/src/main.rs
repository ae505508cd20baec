mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - edit page-builder documents from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page file (defaults to the config's defaultPage)
    #[arg(short, long, global = true)]
    page: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and an empty page
    Init(InitArgs),

    /// List the registered component types
    Types(TypesArgs),

    /// Print the component tree
    Tree(TreeArgs),

    /// Add a new component
    Add(AddArgs),

    /// Move a component under a new parent
    Move(MoveArgs),

    /// Reposition a component among its siblings
    Reorder(ReorderArgs),

    /// Delete a component and its children
    Remove(RemoveArgs),

    /// Set properties on a component
    Set(SetArgs),

    /// Clear properties on a component
    Unset(UnsetArgs),

    /// Check the page against the registry
    Check(CheckArgs),

    /// Rewrite the page with canonical formatting
    Fmt(FmtArgs),
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    let ctx = Context::new(&cwd, cli.page.as_deref())?;

    match cli.command {
        Command::Init(args) => init(args, &ctx),
        Command::Types(args) => types(args, &ctx),
        Command::Tree(args) => tree(args, &ctx),
        Command::Add(args) => add(args, &ctx),
        Command::Move(args) => move_node(args, &ctx),
        Command::Reorder(args) => reorder(args, &ctx),
        Command::Remove(args) => remove(args, &ctx),
        Command::Set(args) => set(args, &ctx),
        Command::Unset(args) => unset(args, &ctx),
        Command::Check(args) => check(args, &ctx),
        Command::Fmt(args) => fmt(args, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

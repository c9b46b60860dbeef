mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, compile, export, init, pull, push, ApplyArgs, CompileArgs, ExportArgs, InitArgs,
    PullArgs, PushArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - compose, edit and publish landing pages
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// Generate markup for a page document
    Compile(CompileArgs),

    /// Write a standalone HTML page
    Export(ExportArgs),

    /// Apply a list of edits to a page document
    Apply(ApplyArgs),

    /// Download a page from the content service
    Pull(PullArgs),

    /// Save a page to the content service
    Push(PushArgs),
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match command {
        Command::Init(args) => init(args, &cwd),
        Command::Compile(args) => compile(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Pull(args) => pull(args, &cwd).await,
        Command::Push(args) => push(args, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

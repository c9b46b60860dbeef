use super::{read_document, resolve, write_file};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::{compile_document, CompileOptions};
use tracing::debug;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Page document (JSON)
    pub input: String,

    /// Output file (defaults to the input with an .html extension)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Emit single-line markup regardless of config
    #[arg(long)]
    pub compact: bool,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let options = if args.compact {
        CompileOptions::compact()
    } else {
        config.compile_options()
    };

    let input = resolve(cwd, &args.input);
    let document = read_document(&input)?;
    let markup = compile_document(&document, &options);
    debug!(source = ?document.source, bytes = markup.len(), "Generated markup");

    if args.stdout {
        println!("{}", markup);
        return Ok(());
    }

    let output = match &args.output {
        Some(path) => resolve(cwd, path),
        None => input.with_extension("html"),
    };
    write_file(&output, &markup)?;

    println!(
        "  {} {} → {} ({} components)",
        "✓".green(),
        args.input,
        output.display(),
        document.components.len()
    );

    Ok(())
}

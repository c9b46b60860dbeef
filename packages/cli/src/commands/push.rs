use super::{page_identifier, read_document, resolve};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{ActiveEdit, DocumentModel};
use pagecraft_gateway::HttpGateway;
use std::fs;
use tracing::info;

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Page document (JSON)
    pub input: String,

    /// Stable page identifier
    pub id: String,

    /// Legacy identifier tried when the stable one fails
    #[arg(long)]
    pub legacy: Option<String>,

    /// Hand-written markup that replaces the generated html
    #[arg(long)]
    pub html: Option<String>,
}

pub async fn push(args: PushArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let gateway = HttpGateway::with_credentials(config.gateway_config(), config.credentials());
    let identifier = page_identifier(&args.id, args.legacy.as_deref());

    let document = read_document(&resolve(cwd, &args.input))?;
    let mut model = DocumentModel::with_history_limit(document, config.history_limit)
        .with_compile_options(config.compile_options());

    let active = match &args.html {
        Some(path) => Some(ActiveEdit::new().html(fs::read_to_string(resolve(cwd, path))?)),
        None => None,
    };

    println!("{} {}", "⬆️  Pushing".bright_blue().bold(), identifier);

    let receipt = model.save(&gateway, &identifier, active.as_ref()).await?;
    info!(page = %identifier, endpoint = %receipt.endpoint, version = receipt.version, "Page pushed");

    println!(
        "  {} Saved via {} endpoint at {}",
        "✓".green(),
        receipt.endpoint,
        receipt.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

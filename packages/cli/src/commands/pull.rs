use super::{page_identifier, resolve, write_file};
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{DocumentModel, SessionLoad};
use pagecraft_gateway::HttpGateway;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct PullArgs {
    /// Stable page identifier
    pub id: String,

    /// Legacy identifier tried when the stable one fails
    #[arg(long)]
    pub legacy: Option<String>,

    /// Where to write the page document
    #[arg(short, long, default_value = "page.json")]
    pub output: String,
}

pub async fn pull(args: PullArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let gateway = HttpGateway::with_credentials(config.gateway_config(), config.credentials());
    let identifier = page_identifier(&args.id, args.legacy.as_deref());

    println!("{} {}", "⬇️  Pulling".bright_blue().bold(), identifier);

    let model = match DocumentModel::load(&gateway, &identifier).await? {
        SessionLoad::Ready(model) => model,
        SessionLoad::AuthPending => {
            warn!(page = %identifier, token_env = %config.token_env, "Content service asked for credentials");
            bail!(
                "The content service requires credentials; set ${} and try again",
                config.token_env
            )
        }
    };

    let document = model.document();
    info!(page = %identifier, session = %model.session_id(), "Page pulled");
    let output = resolve(cwd, &args.output);
    write_file(&output, document.to_json_pretty()?)?;

    println!(
        "  {} {} components, {} sections → {}",
        "✓".green(),
        document.components.len(),
        document.sections.len(),
        output.display()
    );

    Ok(())
}

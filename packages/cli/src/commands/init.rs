use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{ComponentDescriptor, Document};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Base URL of the content service
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Name of the starter page document
    #[arg(short, long, default_value = "page.json")]
    pub page: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagecraft project...".bright_blue().bold());

    let page_path = PathBuf::from(cwd).join(&args.page);
    if !page_path.exists() {
        fs::write(&page_path, starter_page().to_json_pretty()?)?;
        println!("  {} Created {}", "✓".green(), args.page);
    }

    let mut config = Config::default();
    if let Some(url) = args.api_base_url {
        config.api_base_url = url;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", args.page);
    println!("  2. Run: pagecraft compile {}", args.page);
    println!("  3. Set ${} and run: pagecraft push {} <page-id>", config.token_env, args.page);

    Ok(())
}

fn starter_page() -> Document {
    let mut page = Document::with_components(vec![
        ComponentDescriptor::hero_header(
            "Welcome to our store",
            "Fresh arrivals every week",
            "Shop now",
            "",
        ),
        ComponentDescriptor::text("Tell your customers what makes you different."),
        ComponentDescriptor::button("/collections/all", "Browse the collection"),
    ]);
    page.css = ".hero-header { padding: 4rem 2rem; text-align: center; }".to_string();
    page
}

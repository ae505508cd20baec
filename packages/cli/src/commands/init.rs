use super::context::Context;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Document, PageDocument};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Force overwrite existing config and page
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = PathBuf::from(&ctx.cwd).join(DEFAULT_CONFIG_NAME);

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

    println!("{}", "📝 Initializing Pagecraft page...".bright_blue().bold());

    let config = Config {
        default_page: ctx.config.default_page.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    if !ctx.page_path.exists() || args.force {
        let mut page = PageDocument::default();
        if let Some(title) = args.title {
            page.title = title;
        }
        let mut document = Document::create(&ctx.page_path, page);
        ctx.save(&mut document)?;
        println!("  {} Created {}", "✓".green(), ctx.page_path.display());
    }

    println!();
    println!("{}", "✅ Page initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft types");
    println!("  2. Run: pagecraft add section");
    println!("  3. Run: pagecraft tree --props");

    Ok(())
}

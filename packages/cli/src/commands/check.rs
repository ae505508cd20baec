use super::context::Context;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_linter::{lint_document, Diagnostic, DiagnosticLevel, LintOptions};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn check(args: CheckArgs, ctx: &Context) -> Result<()> {
    let document = ctx.load_document()?;
    let registry = ctx.registry()?;
    let diagnostics = lint_document(document.page(), &registry, LintOptions::default());

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&diagnostics)?),
        "text" => print_text(&diagnostics, ctx),
        other => return Err(anyhow!("Unknown format '{}'. Use: text or json", other)),
    }

    // Exit with error code if there are errors
    if pagecraft_linter::has_errors(&diagnostics) {
        std::process::exit(1);
    }

    Ok(())
}

fn print_text(diagnostics: &[Diagnostic], ctx: &Context) {
    println!("🔍 Checking {}", ctx.page_path.display());

    for diagnostic in diagnostics {
        let level = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };
        let node = diagnostic
            .node_id
            .as_deref()
            .map(|id| format!(" [{}]", id))
            .unwrap_or_default();

        println!("  {}{}: {} ({})", level, node, diagnostic.message, diagnostic.rule.dimmed());
        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "help:".cyan(), suggestion);
        }
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .count();

    if diagnostics.is_empty() {
        println!("  {} No issues found!", "✓".green());
    } else {
        println!();
        println!("  {} {}  {} {}", "Errors:".red(), errors, "Warnings:".yellow(), warnings);
    }
}

#[derive(Debug, Args)]
pub struct FmtArgs {
    /// Only report whether the file is formatted
    #[arg(long)]
    pub check: bool,
}

pub fn fmt(args: FmtArgs, ctx: &Context) -> Result<()> {
    let on_disk = std::fs::read_to_string(&ctx.page_path)?;
    let mut document = ctx.load_document()?;
    let formatted = format!("{}\n", document.export_with(&ctx.config.serializer())?);

    if formatted == on_disk {
        println!("{} {} is formatted", "✓".green(), ctx.page_path.display());
        return Ok(());
    }

    if args.check {
        println!("{} {} is not formatted", "✗".red(), ctx.page_path.display());
        std::process::exit(1);
    }

    ctx.save(&mut document)?;
    println!("{} Formatted {}", "✓".green(), ctx.page_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_rewrites_with_configured_indent() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        std::fs::write(dir.path().join("pagecraft.config.json"), r#"{ "indent": 4 }"#).unwrap();
        std::fs::write(
            dir.path().join("page.json"),
            r#"{"title":"T","components":[{"id":"a","type":"div","props":{},"children":[]}]}"#,
        )
        .unwrap();

        let ctx = Context::new(&cwd, None).unwrap();
        fmt(FmtArgs { check: false }, &ctx).unwrap();

        let text = std::fs::read_to_string(&ctx.page_path).unwrap();
        assert!(text.contains("\n    \"title\": \"T\""));
        assert!(text.ends_with('\n'));

        // Second run finds nothing to do
        fmt(FmtArgs { check: true }, &ctx).unwrap();
    }
}

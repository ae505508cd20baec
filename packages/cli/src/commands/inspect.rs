use super::context::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{resolve_tree, ResolvedNode};

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn types(args: TypesArgs, ctx: &Context) -> Result<()> {
    let registry = ctx.registry()?;

    if args.json {
        let definitions: Vec<_> = registry.definitions().collect();
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    for def in registry.definitions() {
        let kind = if def.accepts_children() {
            "container".green()
        } else {
            "leaf".dimmed()
        };
        println!("{} {} [{}]", def.component_type.bright_white().bold(), def.label, kind);

        for (key, prop) in &def.props_schema {
            let cascade = if prop.cascade { " (cascades)" } else { "" };
            println!("    {:<16} default {:?}{}", key, prop.default, cascade.cyan());
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Show each node's effective props
    #[arg(long)]
    pub props: bool,
}

pub fn tree(args: TreeArgs, ctx: &Context) -> Result<()> {
    let document = ctx.load_document()?;
    let registry = ctx.registry()?;
    let page = document.page();

    println!("{} ({} theme)", page.title.bright_white().bold(), page.theme);
    if page.is_empty() {
        println!("  {}", "(empty page)".dimmed());
        return Ok(());
    }

    for node in resolve_tree(&page.components, &registry) {
        print_node(&node, args.props);
    }
    Ok(())
}

fn print_node(resolved: &ResolvedNode<'_>, show_props: bool) {
    let indent = "  ".repeat(resolved.depth + 1);
    let node = resolved.node;

    match resolved.definition {
        Some(def) => println!("{}{} {}", indent, def.label, node.id.dimmed()),
        None => println!(
            "{}{} {} {}",
            indent,
            node.component_type,
            node.id.dimmed(),
            "(unknown type)".yellow()
        ),
    }

    if show_props {
        for (key, value) in &resolved.props {
            let inherited = node.prop(key) != Some(value.as_str());
            let marker = if inherited { " (inherited)" } else { "" };
            println!("{}  {}={}{}", indent, key.cyan(), value, marker.dimmed());
        }
    }

    for child in &resolved.children {
        print_node(child, show_props);
    }
}

use super::context::Context;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::Destination;

fn destination(parent: Option<String>) -> Destination {
    match parent {
        Some(id) => Destination::Node(id),
        None => Destination::Root,
    }
}

/// Parse `key=value`; the value may be empty or contain `=`
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(anyhow!("expected key=value, got '{}'", raw)),
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Component type, e.g. div or h1
    pub component_type: String,

    /// Parent node id (page root if omitted)
    #[arg(long)]
    pub parent: Option<String>,
}

pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let destination = destination(args.parent);
    let result = session.add_component(&args.component_type, destination.clone());

    let id = result.node_id.clone().unwrap_or_default();
    ctx.finish(
        &mut session,
        &result,
        &format!("Added {} {} to {}", args.component_type, id.bright_white(), destination),
    )?;
    Ok(())
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Node to move
    pub id: String,

    /// New parent id (page root if omitted)
    #[arg(long)]
    pub to: Option<String>,
}

pub fn move_node(args: MoveArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let destination = destination(args.to);
    let result = session.move_component(&args.id, destination.clone());

    ctx.finish(&mut session, &result, &format!("Moved {} to {}", args.id, destination))?;
    Ok(())
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Node to reposition among its siblings
    pub id: String,

    /// New position, clamped to the number of siblings
    pub index: usize,
}

pub fn reorder(args: ReorderArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let result = session.reorder_component(&args.id, args.index);

    ctx.finish(&mut session, &result, &format!("Moved {} to position {}", args.id, args.index))?;
    Ok(())
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Node to delete together with its children
    pub id: String,
}

pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let removed = session.find(&args.id).map(|n| n.subtree_size()).unwrap_or(0);
    let result = session.delete_component(&args.id);

    ctx.finish(
        &mut session,
        &result,
        &format!("Removed {} ({} node(s))", args.id, removed),
    )?;
    Ok(())
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Node to edit
    pub id: String,

    /// Properties as key=value
    #[arg(required = true)]
    pub assignments: Vec<String>,
}

pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let assignments = args
        .assignments
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;

    let mut session = ctx.open_session()?;
    let mut results = Vec::with_capacity(assignments.len());
    for (key, value) in &assignments {
        let result = session.set_prop(&args.id, key, value);
        let rejected = result.is_rejected();
        results.push(result);
        if rejected {
            break;
        }
    }

    ctx.finish_all(&mut session, &results, &format!("Updated {}", args.id))?;
    Ok(())
}

#[derive(Debug, Args)]
pub struct UnsetArgs {
    /// Node to edit
    pub id: String,

    /// Property keys to clear
    #[arg(required = true)]
    pub keys: Vec<String>,
}

pub fn unset(args: UnsetArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let mut results = Vec::with_capacity(args.keys.len());
    for key in &args.keys {
        let result = session.clear_prop(&args.id, key);
        let rejected = result.is_rejected();
        results.push(result);
        if rejected {
            break;
        }
    }

    ctx.finish_all(&mut session, &results, &format!("Cleared {} on {}", args.keys.join(", "), args.id))?;
    Ok(())
}

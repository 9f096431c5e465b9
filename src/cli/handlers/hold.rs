use crate::model::hold::parse_hold_date;
use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;

use super::CommandContext;

pub fn handle_hold(
    ctx: &CommandContext,
    project: String,
    task: String,
    until: String,
) -> Result<()> {
    let today = Local::now().date_naive();
    let Some(until_date) = parse_hold_date(&until, today) else {
        anyhow::bail!("Invalid hold date '{}'. Use MM/DD, MM/DD/YY or MM/DD/YYYY", until);
    };

    let mut sync = ctx.synchronizer()?;
    sync.fetch(&project)
        .with_context(|| format!("Failed to fetch project {}", project))?;
    let note = sync.add_hold(&task, until_date)?;

    println!(
        "{} {} until {}",
        "Held".yellow(),
        task.cyan(),
        until_date.format("%m/%d/%Y")
    );
    println!("  {}", note.text);
    Ok(())
}

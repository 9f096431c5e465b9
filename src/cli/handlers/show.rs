use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_freshness, print_task_line};

pub fn handle_show(ctx: &CommandContext, project: String, json: bool) -> Result<()> {
    let mut sync = ctx.synchronizer()?;
    let entry = sync
        .fetch(&project)
        .with_context(|| format!("Failed to fetch project {}", project))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let held = entry.project.held_count();
    let mut heading = format!(
        "{} {} ({})",
        entry.project.id.cyan().bold(),
        entry.project.name.bold(),
        entry.project.tasks.len()
    );
    if held > 0 {
        heading.push_str(&format!(" [{} on hold]", held));
    }
    println!("{}", heading);
    print_freshness(&entry);
    println!();

    if entry.project.tasks.is_empty() {
        println!("No tasks found.");
    }
    for task in &entry.project.tasks {
        print_task_line(task, true);
    }
    Ok(())
}

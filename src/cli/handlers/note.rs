use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;

pub fn handle_note(
    ctx: &CommandContext,
    project: String,
    task: String,
    text: Vec<String>,
    json: bool,
) -> Result<()> {
    let text = text.join(" ");
    let mut sync = ctx.synchronizer()?;
    sync.fetch(&project)
        .with_context(|| format!("Failed to fetch project {}", project))?;

    let note = sync.add_note(&task, &text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        let title = sync
            .cached(&project)
            .and_then(|p| p.task(&task))
            .map(|t| t.title.clone())
            .unwrap_or_default();
        println!("{} {} {}", "Noted".green(), task.cyan(), title);
        println!("  {}", note.text);
    }
    Ok(())
}

use crate::views;
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_freshness, print_task_line};

/// Above this many tasks, `--open` refuses rather than flooding the browser.
const MAX_OPEN_LINKS: usize = 10;

pub fn handle_view(
    ctx: &CommandContext,
    project: String,
    key: String,
    open: bool,
    json: bool,
) -> Result<()> {
    let all_views = &ctx.config.views;
    let Some(view) = views::find_view(all_views, &key) else {
        let keys: Vec<&str> = all_views.iter().map(|v| v.key.as_str()).collect();
        anyhow::bail!("Unknown view '{}'. Available views: {}", key, keys.join(", "));
    };

    let mut sync = ctx.synchronizer()?;
    let entry = sync
        .fetch(&project)
        .with_context(|| format!("Failed to fetch project {}", project))?;
    let selection = views::select(&entry.project.tasks, view, all_views);

    if json {
        let output = serde_json::json!({
            "view": view.key,
            "title": view.title,
            "held": selection.held,
            "stale": entry.stale,
            "tasks": selection.tasks,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", selection.heading(&view.title).bold());
        print_freshness(&entry);
        println!();

        if selection.tasks.is_empty() {
            println!("No tasks found.");
        }
        for task in &selection.tasks {
            print_task_line(task, view.catch_all);
        }
    }

    if open {
        if selection.tasks.len() > MAX_OPEN_LINKS {
            anyhow::bail!(
                "Refusing to open {} links (limit {})",
                selection.tasks.len(),
                MAX_OPEN_LINKS
            );
        }
        for task in &selection.tasks {
            if let Some(url) = &task.permalink_url {
                open::that(url).with_context(|| format!("Failed to open {}", url))?;
            }
        }
    }
    Ok(())
}

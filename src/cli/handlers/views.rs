use crate::views::{self, ViewKind};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::swatch;

pub fn handle_views(ctx: &CommandContext, all: bool, json: bool) -> Result<()> {
    let shown: Vec<_> = if all {
        ctx.config.views.iter().collect()
    } else {
        views::visible_views(&ctx.config.views, ctx.config.initials())
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    for view in shown {
        let swatches: String = view.colors.iter().map(|&c| swatch(c).to_string()).collect();
        let kinds: Vec<String> = view.kinds.iter().map(ViewKind::to_string).collect();
        let mut line = format!(
            "{:<18} {} {}",
            view.key.cyan(),
            view.title,
            format!("[{}]", kinds.join(", ")).dimmed()
        );
        if !swatches.is_empty() {
            line = format!("{} {}", line, swatches);
        }
        if view.catch_all {
            line.push_str(&format!(" {}", "(everything else)".dimmed()));
        }
        println!("{}", line);
    }
    Ok(())
}

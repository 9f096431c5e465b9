use crate::cli::ColorArg;
use crate::model::Color;
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::swatch;

pub fn handle_color(
    ctx: &CommandContext,
    project: String,
    task: String,
    color: ColorArg,
) -> Result<()> {
    let color: Color = color.into();
    let mut sync = ctx.synchronizer()?;
    sync.fetch(&project)
        .with_context(|| format!("Failed to fetch project {}", project))?;

    if sync.tag_color(&task, color)? {
        println!("{} {} {} {}", "Tagged".green(), task.cyan(), swatch(color), color);
    } else {
        println!("{} already tagged {}", task.cyan(), color);
    }
    Ok(())
}

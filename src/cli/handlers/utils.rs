use crate::cache::{CacheEntry, Origin, format_age};
use crate::model::{Color, Task};
use colored::{ColoredString, Colorize};
use std::time::Duration;

/// A colored dot for each of the task's colors.
pub fn color_swatches(task: &Task) -> String {
    task.colors
        .iter()
        .map(|&c| swatch(c).to_string())
        .collect::<Vec<_>>()
        .join("")
}

pub fn swatch(color: Color) -> ColoredString {
    let (r, g, b) = hex_to_rgb(color.hex());
    "●".truecolor(r, g, b)
}

/// Parse `#RRGGBB`. Malformed input renders as white.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(255)
    };
    (channel(0), channel(2), channel(4))
}

pub fn print_task_line(task: &Task, show_colors: bool) {
    let swatches = color_swatches(task);
    let hold = if task.hold {
        format!(" {}", "[hold]".yellow())
    } else {
        String::new()
    };
    let colors = if show_colors && !task.colors.is_empty() {
        let names: Vec<String> = task.colors.iter().map(Color::to_string).collect();
        format!(" ({})", names.join(", ").dimmed())
    } else {
        String::new()
    };

    println!(
        "{} {} {}{}{}",
        task.id.cyan(),
        if swatches.is_empty() { " ".to_string() } else { swatches },
        task.title,
        colors,
        hold
    );
    if let Some(url) = &task.permalink_url {
        println!("    {}", url.dimmed());
    }
}

/// Data-age line plus the out-of-date banner for stale entries.
pub fn print_freshness(entry: &CacheEntry) {
    let age = (chrono::Utc::now() - entry.project.synced_at)
        .to_std()
        .unwrap_or(Duration::ZERO);
    let source = match entry.origin {
        Origin::Cache => "cache",
        Origin::Remote => "Asana",
    };
    println!(
        "{}",
        format!("Data age: {} (from {})", format_age(age), source).dimmed()
    );
    if entry.stale {
        println!("{}", "Data is possibly out-of-date.".yellow().bold());
    }
}

/// Mask all but the last four characters of a secret.
pub fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

//! `ochat models` -- list the backend's models.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// Human-readable size, e.g. `3.6 GB`.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub async fn list_models(state: &AppState, json: bool) -> Result<()> {
    let models = state.chat.list_models().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    if models.is_empty() {
        println!();
        println!(
            "  {} The backend has no models. Pull one with: {}",
            style("i").blue().bold(),
            style("ollama pull llama2").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Size").fg(Color::White),
        Cell::new("Modified").fg(Color::White),
    ]);

    for model in &models {
        table.add_row(vec![
            Cell::new(model.name()).fg(Color::Cyan),
            Cell::new(model.size().map(format_size).unwrap_or_default()).fg(Color::White),
            Cell::new(model.modified_at().unwrap_or("")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

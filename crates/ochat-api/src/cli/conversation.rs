//! Conversation management CLI commands: list, show, new, rename, delete.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use ochat_types::conversation::{ConversationId, MessageRole};
use ochat_types::error::ChatError;

use crate::state::AppState;

/// Parse a conversation id given on the command line.
pub(crate) fn parse_id(raw: &str) -> Result<ConversationId> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a valid conversation id"))
}

/// Turn a missing conversation into a readable error.
fn not_found(id: &ConversationId) -> impl FnOnce(ChatError) -> anyhow::Error + '_ {
    move |e| match e {
        ChatError::NotFound => anyhow::anyhow!("Conversation '{id}' not found"),
        other => other.into(),
    }
}

/// List conversations, newest first.
///
/// # Examples
///
/// ```bash
/// ochat conversations
/// ochat ls --json
/// ```
pub async fn list_conversations(state: &AppState, json: bool) -> Result<()> {
    let conversations = state.conversation_service.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conversations)?);
        return Ok(());
    }

    if conversations.is_empty() {
        println!();
        println!(
            "  {} No conversations yet. Start one with: {}",
            style("i").blue().bold(),
            style("ochat chat --model <model> <message>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for conversation in &conversations {
        table.add_row(vec![
            Cell::new(conversation.id.to_string()).fg(Color::DarkGrey),
            Cell::new(&conversation.title).fg(Color::Cyan),
            Cell::new(conversation.created_at.format("%Y-%m-%d %H:%M").to_string())
                .fg(Color::White),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} conversation{}",
        style(conversations.len()).bold(),
        if conversations.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print a conversation transcript.
pub async fn show_conversation(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let full = state
        .conversation_service
        .get(&id)
        .await
        .map_err(not_found(&id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&full)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&full.conversation.title).cyan().bold());
    println!(
        "  {}",
        style(format!(
            "{} | {}",
            full.conversation.id,
            full.conversation.created_at.format("%Y-%m-%d %H:%M UTC")
        ))
        .dim()
    );
    println!();

    if full.messages.is_empty() {
        println!("  {}", style("(no messages)").dim());
        println!();
        return Ok(());
    }

    for msg in &full.messages {
        let label = match msg.role {
            MessageRole::User => style("You".to_string()).green().bold(),
            MessageRole::Assistant => style(msg.model.clone()).magenta().bold(),
        };
        println!("  {} {}", label, style(msg.created_at.format("%H:%M")).dim());
        for line in msg.content.lines() {
            println!("  {line}");
        }
        println!();
    }

    Ok(())
}

/// Create an empty conversation.
pub async fn new_conversation(state: &AppState, title: Option<&str>, json: bool) -> Result<()> {
    let conversation = state.conversation_service.create(title).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conversation)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Created '{}' ({})",
        style("✓").green().bold(),
        style(&conversation.title).cyan(),
        style(conversation.id).dim()
    );
    println!();

    Ok(())
}

/// Rename a conversation.
pub async fn rename_conversation(state: &AppState, id: &str, title: &str, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    state
        .conversation_service
        .rename(&id, Some(title))
        .await
        .map_err(not_found(&id))?;

    if json {
        println!("{}", serde_json::json!({ "success": true }));
        return Ok(());
    }

    println!();
    println!("  {} Conversation renamed", style("✓").green().bold());
    println!();

    Ok(())
}

/// Delete a conversation with confirmation.
pub async fn delete_conversation(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let conversation = state
        .conversation_service
        .get(&id)
        .await
        .map_err(not_found(&id))?
        .conversation;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete '{}' and all of its messages?",
                conversation.title
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state
        .conversation_service
        .delete(&id)
        .await
        .map_err(not_found(&id))?;

    if json {
        println!("{}", serde_json::json!({ "success": true }));
        return Ok(());
    }

    println!();
    println!(
        "  {} Deleted '{}'",
        style("✓").green().bold(),
        style(&conversation.title).cyan()
    );
    println!();

    Ok(())
}

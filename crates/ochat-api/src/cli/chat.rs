//! `ochat chat` -- run a single chat turn from the terminal.

use anyhow::Result;
use console::style;

use ochat_types::error::ChatError;

use super::conversation::parse_id;
use crate::state::AppState;

/// Send `message` to `model`, optionally continuing a conversation.
///
/// # Examples
///
/// ```bash
/// ochat chat --model llama2 Why is the sky blue?
/// ochat chat -m llama2 -c <conversation-id> And at sunset?
/// ```
pub async fn send_message(
    state: &AppState,
    model: &str,
    message: &str,
    conversation: Option<&str>,
    json: bool,
) -> Result<()> {
    let conversation_id = conversation.map(parse_id).transpose()?;

    let reply = match state.chat.submit_turn(model, message, conversation_id).await {
        Ok(reply) => reply,
        Err(ChatError::NotFound) => {
            anyhow::bail!(
                "Conversation '{}' not found",
                conversation.unwrap_or_default()
            )
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "response": reply.response,
                "model": reply.model,
                "conversation_id": reply.conversation_id,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  {}", style(&reply.model).magenta().bold());
    for line in reply.response.lines() {
        println!("  {line}");
    }
    println!();
    println!(
        "  {} {}",
        style("conversation").dim(),
        style(reply.conversation_id).dim()
    );
    println!();

    Ok(())
}

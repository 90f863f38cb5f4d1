use std::sync::Arc;

use rand::Rng;
use teloxide::{payloads::SendMessageSetters, prelude::*};
use tokio::sync::mpsc;

use crate::bot::{
    dispatcher::{HandlerResult, InboundMessage},
    processor::Kaomoji,
};

use super::constants::{
    COMMAND_START, COMMAND_TAGS, FULL_LIST_URL, GREETING_MESSAGE, PANIC_MESSAGE, TAGS_HEADER,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Greeting,
    Tags(String),
    Kaomoji(String),
    Panic,
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Greeting => GREETING_MESSAGE,
            Reply::Tags(text) | Reply::Kaomoji(text) => text,
            Reply::Panic => PANIC_MESSAGE,
        }
    }

    // The tag list links to the full dictionary, which should not be previewed.
    pub fn disables_link_preview(&self) -> bool {
        matches!(self, Reply::Tags(_))
    }
}

fn display_tags(tags: &[String]) -> String {
    format!(
        "{TAGS_HEADER}\n\n{}\n\nFull list of kaomojies: {FULL_LIST_URL} ",
        tags.join("\n")
    )
}

/* Decides the reply to a message text.
 * Commands must match exactly. Anything else is looked up as a kaomoji,
 * and answered with a random one of its siblings, or with panic if unknown.
 */
pub fn reply_to<R: Rng + ?Sized>(kaomoji: &Kaomoji, text: &str, rng: &mut R) -> Reply {
    match text {
        COMMAND_START => Reply::Greeting,
        COMMAND_TAGS => Reply::Tags(display_tags(kaomoji.tags())),
        _ => match kaomoji.random_sibling(text, rng) {
            Some(sibling) => Reply::Kaomoji(sibling.to_string()),
            None => Reply::Panic,
        },
    }
}

async fn answer_message(bot: &Bot, kaomoji: &Kaomoji, message: &InboundMessage) -> HandlerResult {
    let reply = {
        let mut rng = rand::thread_rng();
        reply_to(kaomoji, &message.text, &mut rng)
    };

    bot.send_message(message.chat, reply.text())
        .disable_web_page_preview(reply.disables_link_preview())
        .await?;
    Ok(())
}

/* Drains the message queue for the lifetime of the bot, one message at a time.
 * Every message gets exactly one reply. Failed sends are logged and not retried.
 */
pub async fn run_message_loop(
    bot: Bot,
    kaomoji: Arc<Kaomoji>,
    mut queue: mpsc::Receiver<InboundMessage>,
) {
    while let Some(message) = queue.recv().await {
        log::info!(
            "New message - From {} in chat {}, text: {}",
            message.sender,
            message.chat,
            message.text
        );

        if let Err(err) = answer_message(&bot, &kaomoji, &message).await {
            log::error!(
                "New message - Failed to reply in chat {}: {}",
                message.chat,
                err
            );
        }
    }

    log::info!("Message queue closed, no more messages will be answered.");
}

use std::sync::Arc;

use teloxide::{
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{InlineQuery, User},
    update_listeners::Polling,
    utils::command::BotCommands,
    RequestError,
};
use tokio::sync::mpsc;

use super::{
    config::DispatchSettings,
    handler::{run_message_loop, run_query_loop},
    processor::Kaomoji,
};

/* Dispatcher is the front door of the bot.
 * It polls Telegram for updates and sorts them into two queues, one for chat messages
 * and one for inline queries. Each queue is drained by its own long-running task,
 * so both kinds of update are answered concurrently, each strictly in arrival order.
 */

/* Types */
pub type HandlerResult = Result<(), BotError>;

#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("Request error: {0}")]
    RequestError(RequestError),
    #[error("Queue error: {0} queue is closed")]
    QueueClosed(&'static str),
}

impl From<RequestError> for BotError {
    fn from(request_error: RequestError) -> BotError {
        BotError::RequestError(request_error)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InboundMessage {
    pub sender: String,
    pub chat: ChatId,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InboundQuery {
    pub id: String,
    pub sender: String,
    pub text: String,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Say hello to o3o bot.")]
    Start,
    #[command(description = "List all kaomoji tags.")]
    Tags,
}

/* Utility functions */
fn describe_user(user: Option<&User>) -> String {
    match user {
        Some(user) => match &user.username {
            Some(username) => format!("@{} ({})", username, user.id),
            None => user.id.to_string(),
        },
        None => "unknown".to_string(),
    }
}

impl InboundMessage {
    // Messages without text, such as stickers, are treated as empty text.
    pub fn from_message(msg: &Message) -> InboundMessage {
        InboundMessage {
            sender: describe_user(msg.from()),
            chat: msg.chat.id,
            text: msg.text().unwrap_or_default().to_string(),
        }
    }
}

impl InboundQuery {
    pub fn from_query(query: &InlineQuery) -> InboundQuery {
        InboundQuery {
            id: query.id.clone(),
            sender: describe_user(Some(&query.from)),
            text: query.query.clone(),
        }
    }
}

/* Endpoint functions, which only hand updates over to the queues. */
async fn enqueue_message(msg: Message, queue: mpsc::Sender<InboundMessage>) -> HandlerResult {
    queue
        .send(InboundMessage::from_message(&msg))
        .await
        .map_err(|_| BotError::QueueClosed("Message"))
}

async fn enqueue_query(query: InlineQuery, queue: mpsc::Sender<InboundQuery>) -> HandlerResult {
    queue
        .send(InboundQuery::from_query(&query))
        .await
        .map_err(|_| BotError::QueueClosed("Query"))
}

/* Main Dispatch function */
pub async fn run_dispatcher(bot: Bot, kaomoji: Arc<Kaomoji>, settings: DispatchSettings) {
    let (message_sender, message_queue) = mpsc::channel(settings.queue_capacity);
    let (query_sender, query_queue) = mpsc::channel(settings.queue_capacity);

    tokio::spawn(run_message_loop(
        bot.clone(),
        Arc::clone(&kaomoji),
        message_queue,
    ));
    tokio::spawn(run_query_loop(
        bot.clone(),
        kaomoji,
        settings.result_limit,
        query_queue,
    ));

    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        log::error!("Failed to register bot commands: {}", err);
    }

    let schema = dptree::entry()
        .branch(Update::filter_message().endpoint(enqueue_message))
        .branch(Update::filter_inline_query().endpoint(enqueue_query));

    let listener = Polling::builder(bot.clone())
        .timeout(settings.polling_interval)
        .build();

    log::info!("Started.");

    Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![message_sender, query_sender])
        // A single worker keeps enqueueing in polling order.
        .distribution_function(|_| Some(()))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;
}

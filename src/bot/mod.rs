// bot/mod.rs

// Exported functions
pub use self::api::fetch_dictionary;
pub use self::dispatcher::run_dispatcher;
pub use self::handler::{make_article, reply_to, run_message_loop, run_query_loop};

// Exported structs and types
pub use self::api::{DictionaryError, KaomojiEntry, DICTIONARY_URL};
pub use self::config::{Config, ConfigError, DispatchSettings};
pub use self::dispatcher::{BotError, Command, HandlerResult, InboundMessage, InboundQuery};
pub use self::handler::Reply;
pub use self::processor::{content_hash, CandidateResult, Kaomoji};

// Declare submodules
mod api;
mod config;
mod dispatcher;
mod handler;
mod processor;

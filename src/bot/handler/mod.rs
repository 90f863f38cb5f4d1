// Exported functions
pub use self::message::{reply_to, run_message_loop, Reply};
pub use self::query::{make_article, run_query_loop};

// Submodules
mod constants;
mod message;
mod query;

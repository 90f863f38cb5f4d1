/* Fixed commands and texts the bot replies with. */

pub const COMMAND_START: &str = "/start";
pub const COMMAND_TAGS: &str = "/tags";

pub const GREETING_MESSAGE: &str = "Here is o3o bot.";
pub const TAGS_HEADER: &str = "List of kaomoji tags:";
pub const FULL_LIST_URL: &str = "https://github.com/guo-yu/o3o/blob/master/yan.json";
pub const PANIC_MESSAGE: &str = "o3o is in panic.";

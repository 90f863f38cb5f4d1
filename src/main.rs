use std::{process, sync::Arc};

use o3o::bot::{fetch_dictionary, run_dispatcher, Config, Kaomoji};

#[tokio::main]
pub async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting o3o bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    };

    log::info!("Updating kaomoji dictionary from {}...", config.dictionary_url);
    let entries = match fetch_dictionary(&config.dictionary_url).await {
        Ok(entries) => entries,
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    };

    let kaomoji = Kaomoji::build(entries);
    log::info!(
        "Kaomoji dictionary initialized with {} tags.",
        kaomoji.tags().len()
    );

    let bot = teloxide::Bot::new(config.token);

    run_dispatcher(bot, Arc::new(kaomoji), config.settings).await;
}

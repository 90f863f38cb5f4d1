use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InlineQueryResult, InlineQueryResultArticle, InputMessageContent, InputMessageContentText},
};
use tokio::sync::mpsc;

use crate::bot::{
    dispatcher::{HandlerResult, InboundQuery},
    processor::{CandidateResult, Kaomoji},
};

// Each result is an article which sends the kaomoji itself when picked.
pub fn make_article(result: CandidateResult) -> InlineQueryResult {
    InlineQueryResult::Article(
        InlineQueryResultArticle::new(
            result.id,
            result.title,
            InputMessageContent::Text(InputMessageContentText::new(result.text)),
        )
        .description(result.description),
    )
}

async fn answer_query(
    bot: &Bot,
    kaomoji: &Kaomoji,
    result_limit: usize,
    query: &InboundQuery,
) -> HandlerResult {
    let results = kaomoji.search(&query.text, result_limit);
    log::debug!(
        "New query - Query {} matched {} kaomoji.",
        query.id,
        results.len()
    );

    bot.answer_inline_query(&query.id, results.into_iter().map(make_article))
        .await?;
    Ok(())
}

/* Drains the inline query queue for the lifetime of the bot, one query at a time.
 * Results beyond the limit are dropped, there is no pagination.
 */
pub async fn run_query_loop(
    bot: Bot,
    kaomoji: Arc<Kaomoji>,
    result_limit: usize,
    mut queue: mpsc::Receiver<InboundQuery>,
) {
    while let Some(query) = queue.recv().await {
        log::info!("New query - From {}, text: {}", query.sender, query.text);

        if let Err(err) = answer_query(&bot, &kaomoji, result_limit, &query).await {
            log::error!("New query - Failed to answer query {}: {}", query.id, err);
        }
    }

    log::info!("Query queue closed, no more inline queries will be answered.");
}

#[cfg(test)]
mod tests {
    use crate::bot::{api::KaomojiEntry, processor::content_hash};

    use super::*;

    #[test]
    fn test_make_article() {
        let kaomoji = Kaomoji::build(vec![KaomojiEntry::new("happy", &["^_^", "^o^"])]);
        let articles: Vec<InlineQueryResult> = kaomoji
            .search("happy", 19)
            .into_iter()
            .map(make_article)
            .collect();

        assert_eq!(articles.len(), 2);
        match &articles[0] {
            InlineQueryResult::Article(article) => {
                assert_eq!(article.id, content_hash("^_^"));
                assert_eq!(article.title, "^_^");
                assert_eq!(article.description.as_deref(), Some("happy"));
                match &article.input_message_content {
                    InputMessageContent::Text(content) => assert_eq!(content.message_text, "^_^"),
                    other => panic!("Unexpected content: {:?}", other),
                }
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}

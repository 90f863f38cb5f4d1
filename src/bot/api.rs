use reqwest::header;
use serde::Deserialize;

/* API contains the logic for calling external APIs.
 * Links the bot's logic with anything it needs from the internet.
 * Here, that is the remote kaomoji dictionary, fetched once at startup.
 */

pub const DICTIONARY_URL: &str = "https://raw.githubusercontent.com/guo-yu/o3o/master/yan.json";

#[derive(thiserror::Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to fetch kaomoji dictionary: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Malformed kaomoji dictionary: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Kaomoji dictionary has no entries")]
    EmptyDictionary,
    #[error("Tag '{tag}' of kaomoji dictionary has no kaomoji")]
    EmptyVariants { tag: String },
}

/* One category of kaomoji under a human-readable tag. */
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct KaomojiEntry {
    pub tag: String,
    #[serde(rename = "yan")]
    pub variants: Vec<String>,
}

impl KaomojiEntry {
    pub fn new(tag: &str, variants: &[&str]) -> KaomojiEntry {
        KaomojiEntry {
            tag: tag.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

// Wire shape of the remote document: { "list": [ { "tag": ..., "yan": [...] } ] }
#[derive(Deserialize)]
struct DictionaryDocument {
    list: Vec<KaomojiEntry>,
}

// Rejects documents that would leave the bot with nothing sensible to serve.
fn validate_entries(entries: &[KaomojiEntry]) -> Result<(), DictionaryError> {
    if entries.is_empty() {
        return Err(DictionaryError::EmptyDictionary);
    }

    for entry in entries {
        if entry.variants.is_empty() {
            return Err(DictionaryError::EmptyVariants {
                tag: entry.tag.clone(),
            });
        }
    }

    Ok(())
}

/* Parses the dictionary document into its entries, in document order.
 * Both fields of every entry are required; unknown keys are ignored.
 */
pub fn parse_dictionary(body: &str) -> Result<Vec<KaomojiEntry>, DictionaryError> {
    let document: DictionaryDocument = serde_json::from_str(body)?;
    validate_entries(&document.list)?;
    Ok(document.list)
}

/* Fetches the kaomoji dictionary from the given URL.
 * Any transport failure, non-success status, or malformed body is an error.
 * There is no retry: the caller is expected to abort on failure.
 */
pub async fn fetch_dictionary(url: &str) -> Result<Vec<KaomojiEntry>, DictionaryError> {
    let mut h = header::HeaderMap::new();
    h.insert(
        "Accept",
        header::HeaderValue::from_static("application/json"),
    );

    let client = reqwest::Client::builder().default_headers(h).build()?;

    // The source is served as text/plain, so decode the body ourselves.
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_dictionary(&body)
}

use std::collections::{HashMap, HashSet};

use rand::{seq::SliceRandom, Rng};

use super::api::KaomojiEntry;

/* Processor is the overall logic center of the bot.
 * It holds the dictionary snapshot loaded at startup, together with the lookup
 * indexes derived from it, and answers every question the handlers ask of it.
 * It is built once before serving begins and only ever read afterwards,
 * so handlers share it behind an Arc without any locking.
 */

#[derive(Clone, Debug, PartialEq)]
pub struct CandidateResult {
    pub id: String,
    pub title: String,
    pub text: String,
    pub description: String,
}

#[derive(Debug)]
pub struct Kaomoji {
    entries: Vec<KaomojiEntry>,
    tags: Vec<String>,
    // Kaomoji -> index of the entry whose variants it replies with.
    siblings: HashMap<String, usize>,
}

/* Stable identifier for a kaomoji, used to deduplicate query results.
 * Lowercase hex MD5 digest, not meant for anything security related.
 */
pub fn content_hash(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

impl Kaomoji {
    /* Builds the tag list and sibling index from a dictionary snapshot.
     * A kaomoji appearing under several tags belongs to the last such entry.
     */
    pub fn build(entries: Vec<KaomojiEntry>) -> Kaomoji {
        let mut tags = Vec::with_capacity(entries.len());
        let mut siblings = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            tags.push(entry.tag.clone());
            for variant in &entry.variants {
                siblings.insert(variant.clone(), index);
            }
        }

        Kaomoji {
            entries,
            tags,
            siblings,
        }
    }

    pub fn entries(&self) -> &[KaomojiEntry] {
        &self.entries
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    // The full group of kaomoji the given one belongs to, if known.
    pub fn siblings(&self, kaomoji: &str) -> Option<&[String]> {
        self.siblings
            .get(kaomoji)
            .map(|&index| self.entries[index].variants.as_slice())
    }

    // Picks one kaomoji uniformly from the group of the given one, possibly itself.
    pub fn random_sibling<R: Rng + ?Sized>(&self, kaomoji: &str, rng: &mut R) -> Option<&str> {
        self.siblings(kaomoji)
            .and_then(|group| group.choose(rng))
            .map(String::as_str)
    }

    /* Searches for kaomoji whose tag matches the query.
     * A tag matches when " tag" contains " query", so matching starts at a word boundary,
     * and the empty query matches every tag.
     * Results follow dictionary order, skip repeated kaomoji, and stop at the limit.
     */
    pub fn search(&self, query: &str, limit: usize) -> Vec<CandidateResult> {
        let mut results: Vec<CandidateResult> = Vec::with_capacity(limit);
        let mut seen: HashSet<String> = HashSet::new();
        let needle = format!(" {query}");

        for entry in &self.entries {
            if results.len() >= limit {
                break;
            }
            if !format!(" {}", entry.tag).contains(&needle) {
                continue;
            }

            for variant in &entry.variants {
                if results.len() >= limit {
                    break;
                }

                let id = content_hash(variant);
                if seen.insert(id.clone()) {
                    results.push(CandidateResult {
                        id,
                        title: variant.clone(),
                        text: variant.clone(),
                        description: entry.tag.clone(),
                    });
                }
            }
        }

        results
    }
}

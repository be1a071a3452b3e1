//! Word catalog — the fixed set of tiles a board is created with.
//!
//! The catalog is plain content: ids are assigned by position when the board
//! is built, duplicates are distinct tiles. Operators can replace the built-in
//! list with a newline-separated file (see `WORDS_FILE`).

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {0} contains no words")]
    Empty(String),
}

/// Built-in word list.
pub const DEFAULT_WORDS: &[&str] = &[
    "'s", "'s", "'s", "'s", "'s", "'s", "'s", "'s", "&", ",", ",", ",", ",", ",", "?", "?", "?",
    "?", "?", "!", "!", "!", "!", "!", ";", ";", ";", ";", ";", "a", "a", "a", "a", "a", "abg",
    "above", "above", "above", "afraid", "alcohol", "alien", "all", "always", "amazing", "amazing",
    "am", "am", "an", "an", "an", "and", "and", "at", "at", "ask", "ass", "awesome", "awesome",
    "because", "belong", "below", "below", "below", "bitter", "bitch", "blobfish", "bloom", "blue",
    "breeze", "bird", "but", "but", "by", "by", "bye", "calm", "cat", "celebrate", "chaos",
    "child", "children", "cloud", "club", "cold", "coffee", "comet", "cosmos", "crazy", "crazy",
    "crescent", "cry", "curious", "cute", "damn", "dinosaur", "discover", "disco", "do", "do",
    "dream", "dream", "duck", "dusk", "dust", "dumb", "ed", "ed", "ed", "ed", "ed", "ed", "ed",
    "ed", "er", "er", "er", "er", "er", "er", "er", "er", "es", "es", "es", "es", "es", "es", "es",
    "es", "evening", "excited", "explore", "farewell", "father", "fear", "feel", "feel", "find",
    "found", "fish", "fluffy", "flower", "forever", "Freud", "from", "from", "from", "fuck",
    "fuzzy", "galaxy", "ghost", "giant", "giraffe", "go", "go", "god", "goodbye", "goose",
    "grapefruit", "green", "happy", "he", "he", "heaven", "hell", "herself", "herself", "himself",
    "himself", "hot", "how", "how", "hello", "hi", "huge", "huh", "huh", "hungry", "i", "i",
    "idiot", "if", "if", "in", "in", "in", "ing", "ing", "ing", "ing", "ing", "ing", "ing", "ing",
    "is", "is", "it", "it", "its", "its", "jellyfish", "juice", "k", "kazoo", "ketchup", "kitten",
    "lasagna", "lie", "life", "light", "like", "like", "listen", "listen", "love", "love",
    "lovely", "lovely", "ly", "ly", "magic", "me", "me", "meh", "meh", "midnight", "moon",
    "mother", "morning", "my", "myself", "myself", "near", "near", "near", "never", "night",
    "night", "Nietzsche", "now", "ocean", "Oedipus", "oh", "only", "or", "or", "out", "out", "out",
    "over", "over", "over", "p", "party", "party", "peace", "people", "pigeon", "pink", "platypus",
    "poo", "poop", "psycho", "purple", "r", "r", "rave", "rest", "robot", "s", "s", "s", "s", "s",
    "s", "s", "s", "sad", "said", "said", "say", "say", "see", "see", "shadow", "she", "she",
    "shiny", "shit", "shore", "shut", "sit", "sky", "sleepy", "sloth", "so", "so", "so", "soft",
    "sparkle", "sparkly", "spaghetti", "star", "starry", "strong", "stupid", "sun", "sweet", "t",
    "tea", "that", "that", "the", "the", "the", "the", "the", "them", "them", "they", "they",
    "think", "think", "time", "this", "this", "through", "through", "through", "tiny", "tired",
    "to", "to", "to", "today", "together", "tomorrow", "twilight", "under", "under", "under",
    "universe", "us", "us", "up", "universe", "was", "was", "wave", "we", "we", "weird", "weird",
    "what", "what", "when", "when", "where", "where", "who", "who", "why", "why", "wild", "wild",
    "wind", "with", "with", "with", "within", "within", "within", "wow", "wow", "y", "y", "yap",
    "yak", "ya", "yay", "yeah", "yellow", "yesterday", "yo-yo", "you", "you", "yourself",
    "yourself", "zucchini", "bella", "le",
];

/// The built-in catalog as owned strings.
#[must_use]
pub fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|w| (*w).to_owned()).collect()
}

/// Parse a newline-separated word list. Blank lines are skipped and
/// surrounding whitespace is trimmed.
#[must_use]
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Load the catalog from `path`, or the built-in list when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no words.
pub fn load(path: Option<&Path>) -> Result<Vec<String>, CatalogError> {
    let Some(path) = path else {
        return Ok(default_words());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Read { path: path.display().to_string(), source })?;
    let words = parse_words(&text);
    if words.is_empty() {
        return Err(CatalogError::Empty(path.display().to_string()));
    }
    Ok(words)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^((https?|ftp)://\S+|www\.\S+|[a-z0-9][a-z0-9.-]*\.(com|org|net|edu|gov|io|co|ly|me|tv|info|uk|de)(/\S*)?)$",
    )
    .unwrap()
});

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+([.,]\d+)*|\d*\.\d+|\d+/\d+)(st|nd|rd|th|%)?$").unwrap());

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion",
];

/// Marker tokenizers emit for retweets.
pub const RETWEET_MARKER: &str = "RT";
/// Leading character of a user mention.
pub const MENTION_SIGIL: char = '@';

/// Token categories that carry no comparable meaning for dedup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenFlags {
    pub is_punct: bool,
    pub is_space: bool,
    pub like_url: bool,
    pub is_digit: bool,
    pub like_num: bool,
    pub is_retweet_marker: bool,
    pub is_mention: bool,
}

impl TokenFlags {
    /// Derive flags from raw token text, for tokenizers that do not report them.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            is_punct: !text.is_empty()
                && text.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace()),
            is_space: !text.is_empty() && text.chars().all(char::is_whitespace),
            like_url: URL_LIKE.is_match(text),
            is_digit: !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()),
            like_num: NUMERIC.is_match(text) || NUMBER_WORDS.contains(&lower.as_str()),
            is_retweet_marker: text == RETWEET_MARKER,
            is_mention: text.starts_with(MENTION_SIGIL),
        }
    }

    pub fn any(&self) -> bool {
        self.is_punct
            || self.is_space
            || self.like_url
            || self.is_digit
            || self.like_num
            || self.is_retweet_marker
            || self.is_mention
    }
}

/// A token as produced by the external tokenize-and-vectorize service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Normalized form. Falls back to `text` when empty.
    #[serde(default)]
    pub lemma: String,
    /// Category flags reported by the tokenizer. Derived from `text` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<TokenFlags>,
    pub vector: Vec<f32>,
}

impl Token {
    pub fn new(text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self { text: text.into(), lemma: String::new(), flags: None, vector }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn normalized(&self) -> &str {
        if self.lemma.is_empty() { &self.text } else { &self.lemma }
    }

    pub fn effective_flags(&self) -> TokenFlags {
        self.flags.unwrap_or_else(|| TokenFlags::classify(&self.text))
    }

    /// True when the token must not contribute to a document vector.
    pub fn is_filtered(&self) -> bool {
        let norm = self.normalized();
        self.effective_flags().any() || norm == RETWEET_MARKER || norm.starts_with(MENTION_SIGIL)
    }
}

/// The tokenize-and-vectorize collaborator.
pub trait TokenVectorizer: Send + Sync {
    /// Split `text` into tokens, each carrying a fixed-dimension embedding.
    fn vectorize(&self, text: &str) -> Result<Vec<Token>>;

    fn vectorize_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Token>>> {
        texts.iter().map(|t| self.vectorize(t)).collect()
    }

    /// Embedding dimension produced by this vectorizer.
    fn dimension(&self) -> usize;
}

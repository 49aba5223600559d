use crate::error::{DedupError, Result};
use crate::types::{Token, TokenVectorizer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Author fields carried over from the raw archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: String,
    pub screen_name: String,
    pub name: String,
    pub verified: bool,
    pub followers_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// The retweeted post when this record is a retweet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetweetInfo {
    pub id: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub favorite_count: u64,
    pub retweet_count: u64,
    pub author_screen_name: Option<String>,
}

/// One flattened social-media post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub text: String,
    pub favorite_count: u64,
    pub retweet_count: u64,
    pub in_reply_to_screen_name: Option<String>,
    pub in_reply_to_status_id: Option<String>,
    pub in_reply_to_user_id: Option<String>,
    pub hashtags: Vec<String>,
    pub urls: Vec<String>,
    pub mention_ids: Vec<String>,
    pub mention_screen_names: Vec<String>,
    pub media_urls: Vec<String>,
    pub media_types: Vec<String>,
    pub author: Option<PostAuthor>,
    pub retweeted: Option<RetweetInfo>,
}

impl Post {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at,
            text: text.into(),
            favorite_count: 0,
            retweet_count: 0,
            in_reply_to_screen_name: None,
            in_reply_to_status_id: None,
            in_reply_to_user_id: None,
            hashtags: Vec::new(),
            urls: Vec::new(),
            mention_ids: Vec::new(),
            mention_screen_names: Vec::new(),
            media_urls: Vec::new(),
            media_types: Vec::new(),
            author: None,
            retweeted: None,
        }
    }

    pub fn is_retweet(&self) -> bool {
        self.retweeted.is_some()
    }
}

/// A post after tokenization: the unit the deduplicator works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub tokens: Vec<Token>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
        tokens: Vec<Token>,
    ) -> Self {
        Self { id: id.into(), text: text.into(), created_at, tokens }
    }

    /// Tokenize a post through the external vectorizer.
    pub fn from_post(post: &Post, vectorizer: &dyn TokenVectorizer) -> Result<Self> {
        let tokens = vectorizer.vectorize(&post.text)?;
        Ok(Self::new(post.id.clone(), post.text.clone(), post.created_at, tokens))
    }

    pub fn from_posts(posts: &[Post], vectorizer: &dyn TokenVectorizer) -> Result<Vec<Self>> {
        let texts: Vec<&str> = posts.iter().map(|p| p.text.as_str()).collect();
        let token_lists = vectorizer.vectorize_batch(&texts)?;
        if token_lists.len() != posts.len() {
            return Err(DedupError::BatchSizeMismatch { expected: posts.len(), got: token_lists.len() });
        }
        Ok(posts
            .iter()
            .zip(token_lists)
            .map(|(p, tokens)| Self::new(p.id.clone(), p.text.clone(), p.created_at, tokens))
            .collect())
    }
}

/// Check corpus-wide preconditions: unique ids and a single embedding dimension.
///
/// Returns the embedding dimension, or `None` when no document has any token.
pub fn validate_corpus(documents: &[Document]) -> Result<Option<usize>> {
    let mut seen = HashSet::with_capacity(documents.len());
    let mut dimension: Option<usize> = None;
    for doc in documents {
        if !seen.insert(doc.id.as_str()) {
            return Err(DedupError::DuplicateId(doc.id.clone()));
        }
        for token in &doc.tokens {
            match dimension {
                None => dimension = Some(token.vector.len()),
                Some(expected) if expected != token.vector.len() => {
                    return Err(DedupError::DimensionMismatch {
                        id: doc.id.clone(),
                        expected,
                        got: token.vector.len(),
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(dimension)
}

//! Ingestion of raw tweet archives and pre-tokenized document files.

use crate::document::{Document, Post, PostAuthor, RetweetInfo};
use crate::error::{DedupError, Result};
use crate::types::Token;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Timestamp layout used by the Twitter v1.1 API, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const TWITTER_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTweet {
    id_str: Option<String>,
    created_at: Option<String>,
    text: Option<String>,
    full_text: Option<String>,
    favorite_count: u64,
    retweet_count: u64,
    in_reply_to_screen_name: Option<String>,
    in_reply_to_status_id_str: Option<String>,
    in_reply_to_user_id_str: Option<String>,
    entities: Option<RawEntities>,
    extended_entities: Option<RawExtendedEntities>,
    user: Option<RawUser>,
    retweeted_status: Option<Box<RawTweet>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntities {
    hashtags: Vec<RawHashtag>,
    urls: Vec<RawUrl>,
    user_mentions: Vec<RawMention>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawExtendedEntities {
    media: Vec<RawMedia>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHashtag {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUrl {
    expanded_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMention {
    id_str: String,
    screen_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMedia {
    expanded_url: Option<String>,
    #[serde(rename = "type")]
    media_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUser {
    id_str: String,
    screen_name: String,
    name: String,
    verified: bool,
    followers_count: u64,
    created_at: Option<String>,
}

/// Parse a Twitter-style timestamp into UTC.
pub fn parse_twitter_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(value, TWITTER_TIME_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DedupError::InvalidTimestamp { value: value.to_string(), reason: e.to_string() })
}

fn strip_newlines(text: &str) -> String {
    text.replace(['\n', '\r'], "")
}

fn optional_time(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(|v| parse_twitter_time(v).ok())
}

fn flatten_tweet(raw: RawTweet, index: usize) -> Result<Post> {
    let id = raw.id_str.ok_or(DedupError::MissingField { field: "id_str", index })?;
    let created_raw = raw.created_at.ok_or(DedupError::MissingField { field: "created_at", index })?;
    let text = raw
        .full_text
        .or(raw.text)
        .ok_or(DedupError::MissingField { field: "text", index })?;
    let created_at = parse_twitter_time(&created_raw)?;

    let mut post = Post::new(id, created_at, strip_newlines(&text));
    post.favorite_count = raw.favorite_count;
    post.retweet_count = raw.retweet_count;
    post.in_reply_to_screen_name = raw.in_reply_to_screen_name;
    post.in_reply_to_status_id = raw.in_reply_to_status_id_str;
    post.in_reply_to_user_id = raw.in_reply_to_user_id_str;

    if let Some(entities) = raw.entities {
        post.hashtags = entities.hashtags.into_iter().map(|h| h.text).collect();
        post.urls = entities.urls.into_iter().filter_map(|u| u.expanded_url).collect();
        for mention in entities.user_mentions {
            post.mention_ids.push(mention.id_str);
            post.mention_screen_names.push(mention.screen_name);
        }
    }
    if let Some(extended) = raw.extended_entities {
        for media in extended.media {
            post.media_types.push(media.media_type);
            if let Some(url) = media.expanded_url {
                post.media_urls.push(url);
            }
        }
    }
    post.author = raw.user.map(|u| PostAuthor {
        id: u.id_str,
        screen_name: u.screen_name,
        name: u.name,
        verified: u.verified,
        followers_count: u.followers_count,
        created_at: optional_time(u.created_at.as_deref()),
    });
    post.retweeted = raw.retweeted_status.map(|rt| {
        let rt = *rt;
        RetweetInfo {
            id: rt.id_str.unwrap_or_default(),
            text: strip_newlines(rt.full_text.or(rt.text).as_deref().unwrap_or("")),
            created_at: optional_time(rt.created_at.as_deref()),
            favorite_count: rt.favorite_count,
            retweet_count: rt.retweet_count,
            author_screen_name: rt.user.map(|u| u.screen_name),
        }
    });
    Ok(post)
}

/// Flatten a JSON array of tweet objects into posts.
pub fn parse_tweets(json: &str) -> Result<Vec<Post>> {
    let raw: Vec<RawTweet> = serde_json::from_str(json)?;
    raw.into_iter().enumerate().map(|(i, t)| flatten_tweet(t, i)).collect()
}

pub fn load_archive(path: impl AsRef<Path>) -> Result<Vec<Post>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let posts = parse_tweets(&content)?;
    info!(path = %path.as_ref().display(), posts = posts.len(), "loaded tweet archive");
    Ok(posts)
}

/// Load every `*.json` archive in a directory, in file-name order.
pub fn load_archive_dir(dir: impl AsRef<Path>) -> Result<Vec<Post>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        } else {
            warn!(path = %path.display(), "skipping non-JSON entry");
        }
    }
    files.sort();

    let mut posts = Vec::new();
    for file in files {
        posts.extend(load_archive(&file)?);
    }
    Ok(posts)
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    id: Option<String>,
    #[serde(default)]
    text: String,
    created_at: Option<DateTime<Utc>>,
    tokens: Option<Vec<Token>>,
}

/// Parse pre-tokenized documents. `id`, `created_at` and `tokens` are required.
pub fn parse_documents(json: &str) -> Result<Vec<Document>> {
    let raw: Vec<RawDocument> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, r)| {
            let id = r.id.ok_or(DedupError::MissingField { field: "id", index })?;
            let created_at = r.created_at.ok_or(DedupError::MissingField { field: "created_at", index })?;
            let tokens = r.tokens.ok_or(DedupError::MissingField { field: "tokens", index })?;
            Ok(Document::new(id, r.text, created_at, tokens))
        })
        .collect()
}

pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let docs = parse_documents(&content)?;
    info!(path = %path.as_ref().display(), documents = docs.len(), "loaded documents");
    Ok(docs)
}

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::service::{ChatEntry, ChatRecord, ChatService};

static ACCESS_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AccessHash:(-*\d*)").expect("valid access hash regex"));

/// Scans the account's chats in server order and returns the first one whose
/// title equals `title` exactly.
///
/// Chats without a full representation are logged and skipped. Finding nothing
/// is not an error.
pub async fn find_chat<S: ChatService + ?Sized>(service: &S, title: &str) -> Result<Option<ChatRecord>> {
    let chats = match service.fetch_chats().await {
        Ok(chats) => chats,
        Err(error) => {
            tracing::error!(%error, "get all chats");
            return Err(error);
        }
    };

    for entry in chats {
        let chat = match expand(entry) {
            Ok(chat) => chat,
            Err(error) => {
                tracing::error!(%error, "chat as full");
                continue;
            }
        };
        tracing::info!(id = chat.id, name = %chat.title, "show chat");

        if chat.title == title {
            return Ok(Some(chat));
        }
    }

    Ok(None)
}

fn expand(entry: ChatEntry) -> Result<ChatRecord> {
    match entry {
        ChatEntry::Full(chat) => Ok(chat),
        ChatEntry::Unavailable { id, kind } => Err(Error::Representation {
            id,
            kind: kind.to_string(),
        }),
    }
}

/// The access hash needed to address `chat`. The typed field is used when the
/// service supplied one; the text form is only consulted as a fallback.
pub fn resolve_access_hash(chat: &ChatRecord) -> Result<i64> {
    match chat.access_hash {
        Some(access_hash) => Ok(access_hash),
        None => extract_access_hash(&chat.to_string()),
    }
}

/// Pulls the signed integer following `AccessHash:` out of a chat's text form.
pub fn extract_access_hash(text: &str) -> Result<i64> {
    let captured = ACCESS_HASH_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse(format!("no AccessHash field in {text:?}")))?;

    captured
        .parse::<i64>()
        .map_err(|err| Error::Parse(format!("invalid access hash {captured:?}: {err}")))
}

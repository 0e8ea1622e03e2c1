use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// The two remote calls the reporter needs, kept behind a trait so the scan and
/// report logic run against an in-memory service in tests.
#[async_trait(?Send)]
pub trait ChatService {
    /// Every chat visible to the signed-in account, in server order.
    async fn fetch_chats(&self) -> Result<Vec<ChatEntry>>;

    /// One page of the "recent" participants of a channel.
    async fn fetch_recent_participants(&self, chat_id: i64, access_hash: i64) -> Result<ParticipantsResponse>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatKind {
    Group,
    Channel,
}

impl ChatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatKind::Group => "Chat",
            ChatKind::Channel => "Channel",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    pub id: i64,
    pub title: String,
    pub access_hash: Option<i64>,
    pub kind: ChatKind,
}

impl fmt::Display for ChatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{ID:{} Title:{}", self.kind.as_str(), self.id, self.title)?;
        if let Some(access_hash) = self.access_hash {
            write!(f, " AccessHash:{access_hash}")?;
        }
        write!(f, "}}")
    }
}

/// A chat as listed by the service. Empty and forbidden chats carry no title
/// and cannot be addressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEntry {
    Full(ChatRecord),
    Unavailable { id: i64, kind: &'static str },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParticipantsResponse {
    Modified(Vec<UserRecord>),
    NotModified,
}

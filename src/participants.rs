use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::service::{ChatService, ParticipantsResponse, UserRecord};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Handle {
    Username(String),
    Phone(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub user_id: i64,
    #[serde(flatten)]
    pub handle: Handle,
}

impl ParticipantRecord {
    /// Username if the user has one, otherwise the phone number.
    pub fn from_user(user: &UserRecord) -> Option<Self> {
        let handle = match (&user.username, &user.phone) {
            (Some(username), _) => Handle::Username(username.clone()),
            (None, Some(phone)) => Handle::Phone(phone.clone()),
            (None, None) => return None,
        };
        Some(Self {
            user_id: user.id,
            handle,
        })
    }
}

impl fmt::Display for ParticipantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.handle {
            Handle::Username(username) => write!(f, "UserId: {} Username: {}", self.user_id, username),
            Handle::Phone(phone) => write!(f, "UserId: {} Phone: {}", self.user_id, phone),
        }
    }
}

/// Fetches the "recent" participants page of a channel.
pub async fn list_participants<S: ChatService + ?Sized>(
    service: &S,
    chat_id: i64,
    access_hash: i64,
) -> Result<Vec<UserRecord>> {
    let response = match service.fetch_recent_participants(chat_id, access_hash).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(%error, chat_id, "error while getting channel's participants");
            return Err(error);
        }
    };

    match response {
        ParticipantsResponse::Modified(users) => Ok(users),
        ParticipantsResponse::NotModified => {
            tracing::error!(chat_id, "error while mapping participants");
            Err(Error::DataShape(format!(
                "participants of chat {chat_id} came back as not modified"
            )))
        }
    }
}

/// Converts users into printable records, dropping (and logging) users that
/// expose neither a username nor a phone number.
pub fn report(users: &[UserRecord]) -> Vec<ParticipantRecord> {
    users
        .iter()
        .filter_map(|user| {
            let record = ParticipantRecord::from_user(user);
            if record.is_none() {
                tracing::error!(user_id = user.id, "cannot get user name or phone");
            }
            record
        })
        .collect()
}

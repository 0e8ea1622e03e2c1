use async_trait::async_trait;
use grammers_client::Client;
use grammers_client::types::Chat;
use grammers_tl_types as tl;

use crate::error::{Error, Result};
use crate::service::{ChatEntry, ChatKind, ChatRecord, ChatService, ParticipantsResponse, UserRecord};

/// Server default page size for `channels.getParticipants`.
const PARTICIPANT_PAGE_LIMIT: i32 = 200;

/// `ChatService` backed by a connected grammers client.
#[derive(Clone)]
pub struct TelegramService {
    client: Client,
}

impl TelegramService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl ChatService for TelegramService {
    async fn fetch_chats(&self) -> Result<Vec<ChatEntry>> {
        let mut dialogs = self.client.iter_dialogs();
        let mut chats = Vec::new();
        while let Some(dialog) = dialogs
            .next()
            .await
            .map_err(|err| Error::remote("messages.getDialogs", err))?
        {
            if let Some(entry) = dialog_entry(dialog.chat()) {
                chats.push(entry);
            }
        }
        Ok(chats)
    }

    async fn fetch_recent_participants(&self, chat_id: i64, access_hash: i64) -> Result<ParticipantsResponse> {
        let request = tl::functions::channels::GetParticipants {
            channel: tl::enums::InputChannel::Channel(tl::types::InputChannel {
                channel_id: chat_id,
                access_hash,
            }),
            filter: tl::enums::ChannelParticipantsFilter::ChannelParticipantsRecent,
            offset: 0,
            limit: PARTICIPANT_PAGE_LIMIT,
            hash: 0,
        };
        let response = self
            .client
            .invoke(&request)
            .await
            .map_err(|err| Error::remote("channels.getParticipants", err))?;

        match response {
            tl::enums::channels::ChannelParticipants::Participants(page) => {
                Ok(ParticipantsResponse::Modified(page.users.into_iter().map(user_record).collect()))
            }
            tl::enums::channels::ChannelParticipants::NotModified => Ok(ParticipantsResponse::NotModified),
        }
    }
}

/// Private conversations are not chats; groups and channels map through their raw form.
fn dialog_entry(chat: &Chat) -> Option<ChatEntry> {
    match chat {
        Chat::User(_) => None,
        Chat::Group(group) => Some(chat_entry(group.raw.clone())),
        Chat::Channel(channel) => Some(chat_entry(tl::enums::Chat::Channel(channel.raw.clone()))),
    }
}

fn chat_entry(chat: tl::enums::Chat) -> ChatEntry {
    match chat {
        tl::enums::Chat::Chat(chat) => ChatEntry::Full(ChatRecord {
            id: chat.id,
            title: chat.title,
            access_hash: None,
            kind: ChatKind::Group,
        }),
        tl::enums::Chat::Channel(channel) => ChatEntry::Full(ChatRecord {
            id: channel.id,
            title: channel.title,
            access_hash: channel.access_hash,
            kind: ChatKind::Channel,
        }),
        tl::enums::Chat::Empty(chat) => ChatEntry::Unavailable {
            id: chat.id,
            kind: "ChatEmpty",
        },
        tl::enums::Chat::Forbidden(chat) => ChatEntry::Unavailable {
            id: chat.id,
            kind: "ChatForbidden",
        },
        tl::enums::Chat::ChannelForbidden(channel) => ChatEntry::Unavailable {
            id: channel.id,
            kind: "ChannelForbidden",
        },
    }
}

fn user_record(user: tl::enums::User) -> UserRecord {
    match user {
        tl::enums::User::User(user) => UserRecord {
            id: user.id,
            username: user.username.filter(|name| !name.is_empty()),
            phone: user.phone.filter(|phone| !phone.is_empty()),
        },
        tl::enums::User::Empty(user) => UserRecord {
            id: user.id,
            ..UserRecord::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammers_client::types::User;

    fn raw_channel(id: i64, title: &str, access_hash: Option<i64>, broadcast: bool) -> tl::types::Channel {
        tl::types::Channel {
            creator: false,
            left: false,
            broadcast,
            verified: false,
            megagroup: !broadcast,
            restricted: false,
            signatures: false,
            min: false,
            scam: false,
            has_link: false,
            has_geo: false,
            slowmode_enabled: false,
            call_active: false,
            call_not_empty: false,
            fake: false,
            gigagroup: false,
            noforwards: false,
            join_to_send: false,
            join_request: false,
            forum: false,
            stories_hidden: false,
            stories_hidden_min: false,
            stories_unavailable: false,
            signature_profiles: false,
            id,
            access_hash,
            title: title.to_string(),
            username: None,
            photo: tl::enums::ChatPhoto::Empty,
            date: 0,
            restriction_reason: None,
            admin_rights: None,
            banned_rights: None,
            default_banned_rights: None,
            participants_count: None,
            usernames: None,
            stories_max_id: None,
            color: None,
            profile_color: None,
            emoji_status: None,
            level: None,
            subscription_until_date: None,
        }
    }

    fn raw_user(id: i64, username: Option<&str>, phone: Option<&str>) -> tl::types::User {
        tl::types::User {
            is_self: false,
            contact: false,
            mutual_contact: false,
            deleted: false,
            bot: false,
            bot_chat_history: false,
            bot_nochats: false,
            verified: false,
            restricted: false,
            min: false,
            bot_inline_geo: false,
            support: false,
            scam: false,
            apply_min_photo: false,
            fake: false,
            bot_attach_menu: false,
            premium: false,
            attach_menu_enabled: false,
            bot_can_edit: false,
            close_friend: false,
            stories_hidden: false,
            stories_unavailable: false,
            contact_require_premium: false,
            bot_business: false,
            bot_has_main_app: false,
            id,
            access_hash: None,
            first_name: None,
            last_name: None,
            username: username.map(str::to_string),
            phone: phone.map(str::to_string),
            photo: None,
            status: None,
            bot_info_version: None,
            restriction_reason: None,
            bot_inline_placeholder: None,
            lang_code: None,
            emoji_status: None,
            usernames: None,
            stories_max_id: None,
            color: None,
            profile_color: None,
            bot_active_users: None,
        }
    }

    #[test]
    fn broadcast_channel_keeps_access_hash() {
        let chat = Chat::from_raw(tl::enums::Chat::Channel(raw_channel(10, "news", Some(-31), true)));
        let entry = dialog_entry(&chat).expect("channel entry");
        assert_eq!(
            entry,
            ChatEntry::Full(ChatRecord {
                id: 10,
                title: "news".to_string(),
                access_hash: Some(-31),
                kind: ChatKind::Channel,
            })
        );
    }

    #[test]
    fn megagroup_maps_through_group() {
        let chat = Chat::from_raw(tl::enums::Chat::Channel(raw_channel(11, "team", Some(7), false)));
        assert!(matches!(chat, Chat::Group(_)));
        let Some(ChatEntry::Full(record)) = dialog_entry(&chat) else {
            panic!("expected full record");
        };
        assert_eq!(record.access_hash, Some(7));
        assert_eq!(record.kind, ChatKind::Channel);
    }

    #[test]
    fn forbidden_and_empty_chats_are_unavailable() {
        let forbidden = Chat::from_raw(tl::enums::Chat::Forbidden(tl::types::ChatForbidden {
            id: 1,
            title: "gone".to_string(),
        }));
        assert_eq!(
            dialog_entry(&forbidden),
            Some(ChatEntry::Unavailable { id: 1, kind: "ChatForbidden" })
        );

        let empty = Chat::from_raw(tl::enums::Chat::Empty(tl::types::ChatEmpty { id: 2 }));
        assert_eq!(dialog_entry(&empty), Some(ChatEntry::Unavailable { id: 2, kind: "ChatEmpty" }));

        let banned = tl::enums::Chat::ChannelForbidden(tl::types::ChannelForbidden {
            broadcast: false,
            megagroup: true,
            id: 3,
            access_hash: 99,
            title: "banned".to_string(),
            until_date: None,
        });
        assert_eq!(
            dialog_entry(&Chat::from_raw(banned)),
            Some(ChatEntry::Unavailable { id: 3, kind: "ChannelForbidden" })
        );
    }

    #[test]
    fn private_dialogs_are_not_chats() {
        let user = Chat::User(User::from_raw(tl::enums::User::User(raw_user(5, Some("alice"), None))));
        assert_eq!(dialog_entry(&user), None);
    }

    #[test]
    fn user_contact_fields_are_carried_over() {
        let record = user_record(tl::enums::User::User(raw_user(42, Some("alice"), Some("15551234567"))));
        assert_eq!(
            record,
            UserRecord {
                id: 42,
                username: Some("alice".to_string()),
                phone: Some("15551234567".to_string()),
            }
        );
    }

    #[test]
    fn empty_username_and_phone_are_dropped() {
        let record = user_record(tl::enums::User::User(raw_user(8, Some(""), Some(""))));
        assert_eq!(record, UserRecord { id: 8, ..UserRecord::default() });
    }

    #[test]
    fn empty_user_has_no_contact() {
        let record = user_record(tl::enums::User::Empty(tl::types::UserEmpty { id: 9 }));
        assert_eq!(record, UserRecord { id: 9, ..UserRecord::default() });
    }
}

//! Birthday entities - per-guild birthday records, list channel and list anchor

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{MonthDay, Snowflake};

/// One member's registered birthday.
///
/// The date is kept as the text that was stored so a record that no longer
/// parses can be detected and pruned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayEntry {
    pub user_id: Snowflake,
    pub birthday: String,
}

impl BirthdayEntry {
    pub fn new(user_id: Snowflake, date: MonthDay) -> Self {
        Self {
            user_id,
            birthday: date.to_string(),
        }
    }

    /// Re-parse the stored text
    pub fn date(&self) -> Option<MonthDay> {
        MonthDay::parse(&self.birthday).ok()
    }
}

/// Location of the live birthday list message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAnchor {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
}

/// All birthday state for a single guild
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildBirthdays {
    /// Records in registration order
    #[serde(default, deserialize_with = "deserialize_users")]
    pub users: Vec<BirthdayEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday_channel_id: Option<Snowflake>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_anchor"
    )]
    pub embed_info: Option<EmbedAnchor>,
}

// Accepts a list of records or a `{user_id: "MM/DD"}` map, in document order
fn deserialize_users<'de, D>(deserializer: D) -> Result<Vec<BirthdayEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UsersVisitor;

    impl<'de> Visitor<'de> for UsersVisitor {
        type Value = Vec<BirthdayEntry>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of birthday records or a map of user id to MM/DD")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut users = Vec::new();
            while let Some(entry) = seq.next_element::<BirthdayEntry>()? {
                users.push(entry);
            }
            Ok(users)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut users = Vec::new();
            while let Some((user_id, birthday)) = map.next_entry::<Snowflake, String>()? {
                users.push(BirthdayEntry { user_id, birthday });
            }
            Ok(users)
        }
    }

    deserializer.deserialize_any(UsersVisitor)
}

// An anchor with a null id is no anchor
fn deserialize_anchor<'de, D>(deserializer: D) -> Result<Option<EmbedAnchor>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct PartialAnchor {
        #[serde(default)]
        channel_id: Option<Snowflake>,
        #[serde(default)]
        message_id: Option<Snowflake>,
    }

    let partial = Option::<PartialAnchor>::deserialize(deserializer)?;
    Ok(partial.and_then(|p| {
        Some(EmbedAnchor {
            channel_id: p.channel_id?,
            message_id: p.message_id?,
        })
    }))
}

impl GuildBirthdays {
    /// Find a member's record
    pub fn get(&self, user_id: Snowflake) -> Option<&BirthdayEntry> {
        self.users.iter().find(|entry| entry.user_id == user_id)
    }

    /// Check whether a member already has a record
    pub fn contains(&self, user_id: Snowflake) -> bool {
        self.get(user_id).is_some()
    }

    /// Append a record. Returns false if the member already has one.
    pub fn insert(&mut self, entry: BirthdayEntry) -> bool {
        if self.contains(entry.user_id) {
            return false;
        }
        self.users.push(entry);
        true
    }

    /// Remove a member's record, returning whether one existed
    pub fn remove(&mut self, user_id: Snowflake) -> bool {
        let before = self.users.len();
        self.users.retain(|entry| entry.user_id != user_id);
        self.users.len() != before
    }

    /// Clear the list channel together with the anchor that lives in it
    pub fn clear_channel(&mut self) {
        self.birthday_channel_id = None;
        self.embed_info = None;
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.birthday_channel_id.is_none() && self.embed_info.is_none()
    }
}

//! Domain entities - core business objects

mod birthday;
mod guild;
mod message;
mod role_option;

pub use birthday::{BirthdayEntry, EmbedAnchor, GuildBirthdays};
pub use guild::{ChannelInfo, GuildInfo, MemberInfo, RoleInfo};
pub use message::{Embed, EmbedField, MessageContent, PostedMessage};
pub use role_option::RoleOption;

//! Data transfer objects for service inputs and outcomes

pub mod requests;
pub mod responses;

pub use requests::EditEmbedRequest;
pub use responses::{
    BirthdayRegistered, EmbedEdited, GuildTick, PreviousRole, PublishOutcome, RenderOutcome,
    ResolvedBirthday, SelectionOutcome, TickReport,
};

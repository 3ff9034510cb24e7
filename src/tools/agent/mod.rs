//! Agent tool group, registered for `thnv_a_` keys. Tool and parameter
//! names keep the camelCase/snake_case mix of the published surface.

pub mod chats;
pub mod events;
pub mod identity;
pub mod lifecycle;
pub mod messages;
pub mod participants;

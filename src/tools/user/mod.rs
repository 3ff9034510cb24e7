//! User-surface tools, registered when the server is configured with a
//! user API key. These operate on the authenticated user's own chats,
//! profile, and agents.

pub mod agents;
pub mod chats;
pub mod messages;
pub mod participants;
pub mod profile;

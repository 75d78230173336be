//! HTTP endpoint handlers.

pub mod http;

pub use http::{
    delete_message, edit_message, get_messages, get_participants, health_check, heartbeat,
    join_room, post_message,
};

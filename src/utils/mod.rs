//! Utility modules shared by the schema and loader.

pub mod date;
pub mod slug;

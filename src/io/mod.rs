//! Input chunking and manifest persistence

pub mod chunks;
pub mod manifest;

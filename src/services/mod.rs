//! Core services for scanning, classification, routing, and manifest assembly

pub mod classify;
pub mod manifest;
pub mod pipeline;
pub mod progress;
pub mod scanner;
pub mod sink;
pub mod slug;

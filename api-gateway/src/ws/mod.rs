//! WebSocket fan-out for the live market streams

pub mod handler;
pub mod message;

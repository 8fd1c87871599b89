//! Ports of the application layer.

pub mod outbound;

//! Wire formats spoken to remote endpoints.

pub mod chat;

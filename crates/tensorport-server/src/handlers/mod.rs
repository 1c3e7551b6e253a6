//! V2 protocol endpoint handlers.

pub mod health;
pub mod infer;
pub mod models;

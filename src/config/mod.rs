// src/config/mod.rs
pub mod server;

pub use server::{LogFormat, ServerConfig};

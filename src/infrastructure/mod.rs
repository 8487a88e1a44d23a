// src/infrastructure/mod.rs
pub mod config;
pub mod deck_store;
pub mod gemini;
pub mod kindle;

pub use config::Config;
pub use gemini::GeminiClient;
pub use kindle::KindleLookups;

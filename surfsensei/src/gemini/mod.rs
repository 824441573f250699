//! Gemini API interaction module.

mod client;
mod response;

pub use client::{GeminiClient, ModelClient};

//! Clients for the third-party services: Project Gutenberg and Groq

mod groq;
mod gutenberg;

pub use groq::{GroqClient, DEFAULT_GROQ_MODEL, DEFAULT_GROQ_URL};
pub use gutenberg::{parse_metadata, GutenbergClient, DEFAULT_GUTENBERG_URL};

//! tiyn-advisor: spending-advice prompt construction and the Ollama
//! text-generation client. The model's reply is treated as an opaque string;
//! nothing here parses it beyond trimming.

pub mod config;
pub mod ollama;
pub mod prompt;

pub use config::AdvisorConfig;
pub use ollama::{chat, generate};
pub use prompt::build_prompt;

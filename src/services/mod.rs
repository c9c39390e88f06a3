//! Business logic services and external service adapters.

pub mod google_docs;
pub mod openai;
pub mod prompts;

pub use google_docs::{ExternalDoc, GoogleDocsClient};
pub use openai::{Completion, OpenAiClient};

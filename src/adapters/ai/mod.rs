//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port used to draft the justification
//! paragraph.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat models (GPT-4 by default)

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, DEFAULT_MOCK_CONTENT};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};

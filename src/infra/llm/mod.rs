mod adapter;
pub mod anthropic;
pub mod gemini;
pub mod openai;
mod prompt_builder;
mod provider_registry;
mod response_parsing;
pub mod schema_validator;

pub use adapter::VendorAdapter;
pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;
pub use prompt_builder::PromptBuilder;
pub use provider_registry::{AdapterEndpoints, ProviderRegistry};

pub(crate) use response_parsing::extract_json_payload;

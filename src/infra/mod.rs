mod env;
pub mod llm;
pub mod settings;

mod errors;
mod note;
mod provider_config;
mod task;

pub use errors::{AiError, ErrorCategory};
pub use note::{HardWord, Note};
pub use provider_config::{ProviderConfig, ProviderSettings, Vendor};
pub use task::{Task, TaskKind, TaskResponse};

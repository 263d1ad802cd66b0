use tracing::{debug, warn};

use crate::domain::{AiError, ProviderConfig, Task, TaskResponse, Vendor};

use super::PromptBuilder;

pub trait VendorAdapter: Send + Sync {
    fn vendor(&self) -> Vendor;

    /// Sends one prompt and returns the first text completion. No retries.
    fn complete(&self, prompt: &str, config: &ProviderConfig) -> Result<String, AiError>;

    fn run(&self, task: &Task, config: &ProviderConfig) -> TaskResponse {
        self.execute(task, config).into()
    }

    fn execute(&self, task: &Task, config: &ProviderConfig) -> Result<String, AiError> {
        if config.vendor != self.vendor() {
            return Err(AiError::configuration(format!(
                "{} provider config cannot be used with the {} adapter",
                config.vendor.display_name(),
                self.vendor().display_name()
            )));
        }
        config.validate()?;

        let prompt = PromptBuilder::build(task);
        debug!(
            vendor = %self.vendor(),
            model = config.model.as_str(),
            task = task.kind().as_str(),
            prompt_chars = prompt.chars().count(),
            "sending vendor request"
        );

        let result = self.complete(&prompt, config);
        if let Err(error) = &result {
            warn!(
                vendor = %self.vendor(),
                task = task.kind().as_str(),
                %error,
                "vendor task failed"
            );
        }
        result
    }
}

use tracing::debug;

use crate::domain::{AiError, ProviderConfig, ProviderSettings, Task, TaskResponse};
use crate::infra::llm::ProviderRegistry;

/// Routes tasks to the adapter registered for the provider's vendor.
#[derive(Clone)]
pub struct AiService {
    registry: ProviderRegistry,
}

impl AiService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn dispatch(&self, task: &Task, config: &ProviderConfig) -> TaskResponse {
        self.execute(task, config).into()
    }

    pub fn dispatch_active(&self, task: &Task, settings: &ProviderSettings) -> TaskResponse {
        self.execute_active(task, settings).into()
    }

    /// Same routing as [`AiService::dispatch`], keeping the typed error.
    pub fn execute(&self, task: &Task, config: &ProviderConfig) -> Result<String, AiError> {
        let adapter = self.registry.resolve(config.vendor).inspect_err(|_| {
            debug!(vendor = %config.vendor, "no adapter registered for vendor");
        })?;
        adapter.execute(task, config)
    }

    pub fn execute_active(
        &self,
        task: &Task,
        settings: &ProviderSettings,
    ) -> Result<String, AiError> {
        self.execute(task, settings.active()?)
    }

    pub fn simplify(&self, text: &str, config: &ProviderConfig) -> TaskResponse {
        self.dispatch(&Task::simplify(text), config)
    }

    pub fn find_alternatives(
        &self,
        word: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> TaskResponse {
        self.dispatch(&Task::find_alternatives(word, context), config)
    }

    pub fn analyze_hard_words(&self, text: &str, config: &ProviderConfig) -> TaskResponse {
        self.dispatch(&Task::analyze_hard_words(text), config)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::AiService;
    use crate::domain::{AiError, ProviderConfig, ProviderSettings, Task, TaskResponse, Vendor};
    use crate::infra::llm::{ProviderRegistry, VendorAdapter};

    struct CountingAdapter {
        vendor: Vendor,
        calls: Arc<AtomicUsize>,
        last_prompt: Arc<Mutex<Option<String>>>,
        reply: Result<String, AiError>,
    }

    impl VendorAdapter for CountingAdapter {
        fn vendor(&self) -> Vendor {
            self.vendor
        }

        fn complete(&self, prompt: &str, _config: &ProviderConfig) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().expect("mutex poisoned") = Some(prompt.to_string());
            self.reply.clone()
        }
    }

    struct Harness {
        service: AiService,
        calls: Arc<AtomicUsize>,
        last_prompt: Arc<Mutex<Option<String>>>,
    }

    fn harness(vendor: Vendor, reply: Result<String, AiError>) -> Harness {
        let calls = Arc::new(AtomicUsize::new(0));
        let last_prompt = Arc::new(Mutex::new(None));
        let mut registry = ProviderRegistry::new();
        registry
            .register(CountingAdapter {
                vendor,
                calls: Arc::clone(&calls),
                last_prompt: Arc::clone(&last_prompt),
                reply,
            })
            .expect("adapter registration should succeed");

        Harness {
            service: AiService::new(registry),
            calls,
            last_prompt,
        }
    }

    fn config(vendor: Vendor) -> ProviderConfig {
        ProviderConfig::new(vendor, "test-key", vendor.default_model()).active()
    }

    #[test]
    fn dispatch_routes_to_matching_adapter() {
        let harness = harness(Vendor::Gemini, Ok("simple words".to_string()));

        let response = harness
            .service
            .simplify("The ubiquitous phenomenon", &config(Vendor::Gemini));

        assert_eq!(response, TaskResponse::ok("simple words"));
        assert_eq!(harness.calls.load(Ordering::SeqCst), 1);
        let prompt = harness
            .last_prompt
            .lock()
            .expect("mutex poisoned")
            .clone()
            .expect("prompt recorded");
        assert!(prompt.contains("The ubiquitous phenomenon"));
    }

    #[test]
    fn dispatch_reports_unsupported_provider_without_calling_adapter() {
        let harness = harness(Vendor::OpenAi, Ok("unused".to_string()));

        let response = harness
            .service
            .analyze_hard_words("text", &config(Vendor::Anthropic));

        assert_eq!(response, TaskResponse::failure("Provider not supported"));
        assert_eq!(harness.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dispatch_fails_fast_on_empty_api_key() {
        let harness = harness(Vendor::OpenAi, Ok("unused".to_string()));
        let mut config = config(Vendor::OpenAi);
        config.api_key = String::new();

        let response = harness
            .service
            .find_alternatives("big", "a big house", &config);

        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("configuration error: OpenAI API key must not be empty")
        );
        assert_eq!(harness.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dispatch_returns_adapter_failure_as_response() {
        let harness = harness(
            Vendor::Anthropic,
            Err(AiError::transport("connection refused")),
        );

        let response = harness
            .service
            .simplify("text", &config(Vendor::Anthropic));

        assert_eq!(response, TaskResponse::failure("connection refused"));
    }

    #[test]
    fn dispatch_active_uses_active_provider() {
        let harness = harness(Vendor::Gemini, Ok("ok".to_string()));
        let settings = ProviderSettings::new(vec![
            ProviderConfig::new(Vendor::OpenAi, "sk", "gpt-4o-mini"),
            config(Vendor::Gemini),
        ]);

        let response = harness
            .service
            .dispatch_active(&Task::simplify("text"), &settings);

        assert_eq!(response, TaskResponse::ok("ok"));
    }

    #[test]
    fn dispatch_active_reports_missing_active_provider() {
        let harness = harness(Vendor::Gemini, Ok("unused".to_string()));

        let response = harness
            .service
            .dispatch_active(&Task::simplify("text"), &ProviderSettings::default());

        assert_eq!(
            response,
            TaskResponse::failure("configuration error: no active provider configured")
        );
        assert_eq!(harness.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn execute_keeps_typed_errors() {
        let harness = harness(Vendor::OpenAi, Ok("unused".to_string()));

        let unsupported = harness
            .service
            .execute(&Task::simplify("text"), &config(Vendor::Gemini))
            .expect_err("unregistered vendor should fail");
        let missing = harness
            .service
            .execute_active(&Task::simplify("text"), &ProviderSettings::default())
            .expect_err("no active provider should fail");

        assert_eq!(unsupported, AiError::UnsupportedProvider);
        assert!(matches!(missing, AiError::Configuration { .. }));
    }

    #[test]
    fn repeated_dispatch_yields_identical_responses() {
        let harness = harness(Vendor::OpenAi, Ok("calm, quiet".to_string()));
        let task = Task::find_alternatives("serene", "a serene lake");
        let config = config(Vendor::OpenAi);

        let first = harness.service.dispatch(&task, &config);
        let second = harness.service.dispatch(&task, &config);

        assert_eq!(first, second);
        assert_eq!(harness.calls.load(Ordering::SeqCst), 2);
    }
}

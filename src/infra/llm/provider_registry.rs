use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{AiError, Vendor};

use super::{
    AnthropicAdapter, GeminiAdapter, OpenAiAdapter, VendorAdapter, anthropic, gemini, openai,
};

/// Base URLs and HTTP timeout used to build the standard adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterEndpoints {
    pub openai_base_url: String,
    pub gemini_base_url: String,
    pub anthropic_base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for AdapterEndpoints {
    fn default() -> Self {
        Self {
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            gemini_base_url: gemini::DEFAULT_BASE_URL.to_string(),
            anthropic_base_url: anthropic::DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    adapters: HashMap<Vendor, Arc<dyn VendorAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_adapters(endpoints: &AdapterEndpoints) -> Result<Self, AiError> {
        let mut registry = Self::new();
        registry.register(OpenAiAdapter::with_config(
            endpoints.openai_base_url.clone(),
            endpoints.timeout,
        )?)?;
        registry.register(GeminiAdapter::with_config(
            endpoints.gemini_base_url.clone(),
            endpoints.timeout,
        )?)?;
        registry.register(AnthropicAdapter::with_config(
            endpoints.anthropic_base_url.clone(),
            endpoints.timeout,
        )?)?;
        Ok(registry)
    }

    pub fn register<A>(&mut self, adapter: A) -> Result<(), AiError>
    where
        A: VendorAdapter + 'static,
    {
        self.register_shared(Arc::new(adapter))
    }

    pub fn register_shared(&mut self, adapter: Arc<dyn VendorAdapter>) -> Result<(), AiError> {
        let vendor = adapter.vendor();
        if self.adapters.contains_key(&vendor) {
            return Err(AiError::configuration(format!(
                "adapter for '{vendor}' is already registered"
            )));
        }

        self.adapters.insert(vendor, adapter);
        Ok(())
    }

    pub fn resolve(&self, vendor: Vendor) -> Result<Arc<dyn VendorAdapter>, AiError> {
        self.adapters
            .get(&vendor)
            .map(Arc::clone)
            .ok_or(AiError::UnsupportedProvider)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{AdapterEndpoints, ProviderRegistry};
    use crate::domain::{AiError, ProviderConfig, Vendor};
    use crate::infra::llm::VendorAdapter;

    struct EchoAdapter {
        vendor: Vendor,
    }

    impl VendorAdapter for EchoAdapter {
        fn vendor(&self) -> Vendor {
            self.vendor
        }

        fn complete(&self, prompt: &str, _config: &ProviderConfig) -> Result<String, AiError> {
            Ok(prompt.to_string())
        }
    }

    #[test]
    fn register_and_resolve_adapter_for_vendor() {
        let mut registry = ProviderRegistry::new();
        registry
            .register(EchoAdapter {
                vendor: Vendor::Gemini,
            })
            .expect("adapter registration should succeed");

        let adapter = registry
            .resolve(Vendor::Gemini)
            .expect("adapter should resolve");

        assert_eq!(adapter.vendor(), Vendor::Gemini);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn resolve_rejects_unregistered_vendor() {
        let registry = ProviderRegistry::new();

        let error = registry
            .resolve(Vendor::OpenAi)
            .err()
            .expect("unknown vendor should fail");

        assert_eq!(error, AiError::UnsupportedProvider);
        assert_eq!(error.to_string(), "Provider not supported");
    }

    #[test]
    fn register_rejects_duplicate_vendor() {
        let mut registry = ProviderRegistry::new();
        registry
            .register(EchoAdapter {
                vendor: Vendor::Anthropic,
            })
            .expect("first registration should succeed");

        let error = registry
            .register(EchoAdapter {
                vendor: Vendor::Anthropic,
            })
            .expect_err("duplicate registration should fail");

        assert!(matches!(
            error,
            AiError::Configuration { message }
            if message == "adapter for 'anthropic' is already registered"
        ));
    }

    #[test]
    fn with_default_adapters_registers_all_vendors() {
        let registry = ProviderRegistry::with_default_adapters(&AdapterEndpoints::default())
            .expect("default adapters should build");

        assert_eq!(registry.len(), 3);
        for vendor in Vendor::ALL {
            let adapter = registry.resolve(vendor).expect("vendor is registered");
            assert_eq!(adapter.vendor(), vendor);
        }
    }
}

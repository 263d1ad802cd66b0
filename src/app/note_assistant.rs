use std::collections::HashMap;
use std::sync::Mutex;

use tracing::info;

use crate::domain::{AiError, Note, ProviderSettings, Task};

use super::AiService;
use super::vocabulary::{parse_alternatives, parse_hard_words};

pub trait NoteStore: Send + Sync {
    fn save(&self, note: &Note) -> Result<(), AiError>;

    fn get_all(&self) -> Result<Vec<Note>, AiError>;

    fn delete(&self, id: &str) -> Result<bool, AiError>;
}

#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    notes: Mutex<HashMap<String, Note>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn save(&self, note: &Note) -> Result<(), AiError> {
        let mut notes = self
            .notes
            .lock()
            .map_err(|_| AiError::storage("note store lock poisoned"))?;
        notes.insert(note.id.clone(), note.clone());
        Ok(())
    }

    /// Most recently updated first.
    fn get_all(&self) -> Result<Vec<Note>, AiError> {
        let notes = self
            .notes
            .lock()
            .map_err(|_| AiError::storage("note store lock poisoned"))?;
        let mut all = notes.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }

    fn delete(&self, id: &str) -> Result<bool, AiError> {
        let mut notes = self
            .notes
            .lock()
            .map_err(|_| AiError::storage("note store lock poisoned"))?;
        Ok(notes.remove(id).is_some())
    }
}

/// Editor-facing helpers that run vocabulary tasks against a note.
pub struct NoteAssistant<S: NoteStore> {
    service: AiService,
    store: S,
}

impl<S: NoteStore> NoteAssistant<S> {
    pub fn new(service: AiService, store: S) -> Self {
        Self { service, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn analyze_note(
        &self,
        mut note: Note,
        settings: &ProviderSettings,
    ) -> Result<Note, AiError> {
        let data = self
            .service
            .execute_active(&Task::analyze_hard_words(note.content.as_str()), settings)?;
        let hard_words = parse_hard_words(&data)?;

        info!(
            note_id = note.id.as_str(),
            hard_words = hard_words.len(),
            "attached hard words to note"
        );
        note.hard_words = hard_words;
        note.touch();
        self.store.save(&note)?;
        Ok(note)
    }

    pub fn suggest_alternatives(
        &self,
        word: &str,
        note: &Note,
        settings: &ProviderSettings,
    ) -> Result<Vec<String>, AiError> {
        let data = self
            .service
            .execute_active(&Task::find_alternatives(word, note.content.as_str()), settings)?;
        Ok(parse_alternatives(&data))
    }

    pub fn simplify_note(
        &self,
        note: &Note,
        settings: &ProviderSettings,
    ) -> Result<String, AiError> {
        self.service
            .execute_active(&Task::simplify(note.content.as_str()), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryNoteStore, NoteAssistant, NoteStore};
    use crate::app::AiService;
    use crate::domain::{AiError, Note, ProviderConfig, ProviderSettings, Vendor};
    use crate::infra::llm::{ProviderRegistry, VendorAdapter};

    struct FixedReplyAdapter {
        reply: &'static str,
    }

    impl VendorAdapter for FixedReplyAdapter {
        fn vendor(&self) -> Vendor {
            Vendor::Anthropic
        }

        fn complete(&self, _prompt: &str, _config: &ProviderConfig) -> Result<String, AiError> {
            Ok(self.reply.to_string())
        }
    }

    fn assistant(reply: &'static str) -> NoteAssistant<InMemoryNoteStore> {
        let mut registry = ProviderRegistry::new();
        registry
            .register(FixedReplyAdapter { reply })
            .expect("adapter registration should succeed");
        NoteAssistant::new(AiService::new(registry), InMemoryNoteStore::new())
    }

    fn settings() -> ProviderSettings {
        ProviderSettings::new(vec![
            ProviderConfig::new(Vendor::Anthropic, "sk-ant", "claude-3-5-sonnet").active(),
        ])
    }

    #[test]
    fn analyze_note_attaches_and_saves_hard_words() {
        let assistant = assistant(
            r#"{"hardWords":[{"word":"perspicacious","alternatives":["sharp","clever"],"context":"a perspicacious reader"}]}"#,
        );
        let note = Note::new("Review", "A perspicacious reader notices.");

        let analyzed = assistant
            .analyze_note(note.clone(), &settings())
            .expect("analysis should succeed");

        assert_eq!(analyzed.id, note.id);
        assert_eq!(analyzed.hard_words.len(), 1);
        assert_eq!(analyzed.hard_words[0].alternatives, vec!["sharp", "clever"]);
        let stored = assistant.store().get_all().expect("store readable");
        assert_eq!(stored, vec![analyzed]);
    }

    #[test]
    fn analyze_note_leaves_store_untouched_on_parse_failure() {
        let assistant = assistant("Sorry, I cannot help with that.");
        let note = Note::new("Review", "text");

        let error = assistant
            .analyze_note(note, &settings())
            .expect_err("prose reply should fail");

        assert!(matches!(error, AiError::InvalidResponse { .. }));
        assert!(assistant.store().get_all().expect("store readable").is_empty());
    }

    #[test]
    fn suggest_alternatives_parses_comma_list() {
        let assistant = assistant("calm, quiet, peaceful");
        let note = Note::new("Lake", "The lake was serene.");

        let alternatives = assistant
            .suggest_alternatives("serene", &note, &settings())
            .expect("suggestions should parse");

        assert_eq!(alternatives, vec!["calm", "quiet", "peaceful"]);
    }

    #[test]
    fn simplify_note_surfaces_configuration_errors() {
        let assistant = assistant("unused");
        let note = Note::new("Lake", "text");

        let error = assistant
            .simplify_note(&note, &ProviderSettings::default())
            .expect_err("missing provider should fail");

        assert!(matches!(
            error,
            AiError::Configuration { message } if message == "no active provider configured"
        ));
    }

    #[test]
    fn in_memory_store_deletes_by_id() {
        let store = InMemoryNoteStore::new();
        let note = Note::new("Draft", "text");
        store.save(&note).expect("save succeeds");

        assert!(store.delete(&note.id).expect("delete succeeds"));
        assert!(!store.delete(&note.id).expect("delete succeeds"));
        assert!(store.get_all().expect("store readable").is_empty());
    }
}

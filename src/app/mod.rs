mod ai_service;
mod note_assistant;
pub mod vocabulary;

pub use ai_service::AiService;
pub use note_assistant::{InMemoryNoteStore, NoteAssistant, NoteStore};

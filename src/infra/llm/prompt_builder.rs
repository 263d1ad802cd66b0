use crate::domain::Task;

const HARD_WORDS_JSON_SHAPE: &str = r#"{"hardWords": [{"word": "difficult word", "alternatives": ["simpler1", "simpler2"], "context": "sentence where the word appears"}]}"#;

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(task: &Task) -> String {
        match task {
            Task::Simplify { text } => simplify_prompt(text),
            Task::FindAlternatives { word, context } => alternatives_prompt(word, context),
            Task::AnalyzeHardWords { text } => analyze_prompt(text),
        }
    }
}

fn simplify_prompt(text: &str) -> String {
    format!(
        "Simplify the following text by replacing difficult or uncommon words with simpler, everyday alternatives.
Keep the original meaning, tone, and structure. Return only the simplified text without any explanation.

Text:
{text}"
    )
}

fn alternatives_prompt(word: &str, context: &str) -> String {
    format!(
        "Suggest 3 to 5 simpler alternative words for \"{word}\" as it is used in this context:
\"{context}\"

Return only the alternatives as a comma-separated list, for example: calm, quiet, peaceful"
    )
}

fn analyze_prompt(text: &str) -> String {
    format!(
        "Analyze the following text and identify words that may be difficult for a general reader.
For each difficult word, provide 2 to 4 simpler alternatives and the sentence where it appears.

Return only a JSON object in exactly this format, with no markdown fences or extra text:
{HARD_WORDS_JSON_SHAPE}

If there are no difficult words, return {{\"hardWords\": []}}.

Text:
{text}"
    )
}

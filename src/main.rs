use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lexinote::{
    app::{
        AiService,
        vocabulary::{parse_alternatives, parse_hard_words},
    },
    domain::{AiError, Task, TaskResponse},
    infra::{
        llm::ProviderRegistry,
        settings::{ENV_SETTINGS_PATH, resolve_settings},
    },
};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "lexinote=info";

#[derive(Parser, Debug)]
#[command(
    name = "lexinote",
    version,
    about = "Simplify vocabulary in notes with an LLM provider"
)]
struct Cli {
    /// TOML settings file with [[providers]] entries
    #[arg(long, global = true, env = ENV_SETTINGS_PATH)]
    settings: Option<PathBuf>,

    /// Print the raw task response as JSON
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite text with simpler vocabulary
    Simplify { text: String },
    /// Suggest simpler alternatives for a word
    Alternatives {
        word: String,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// List difficult words with alternatives
    Analyze { text: String },
}

impl Command {
    fn task(&self) -> Task {
        match self {
            Self::Simplify { text } => Task::simplify(text.as_str()),
            Self::Alternatives { word, context } => {
                Task::find_alternatives(word.as_str(), context.as_str())
            }
            Self::Analyze { text } => Task::analyze_hard_words(text.as_str()),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("lexinote: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String, AiError> {
    let loaded = resolve_settings(cli.settings.as_deref())?;
    let registry = ProviderRegistry::with_default_adapters(&loaded.endpoints)?;
    let service = AiService::new(registry);

    let response = service.dispatch_active(&cli.command.task(), &loaded.settings);
    if cli.raw {
        return render_raw(&response);
    }

    let data = response.into_result()?;
    match &cli.command {
        Command::Simplify { .. } => Ok(data),
        Command::Alternatives { .. } => Ok(parse_alternatives(&data).join("\n")),
        Command::Analyze { .. } => {
            let hard_words = parse_hard_words(&data)?;
            serde_json::to_string_pretty(&hard_words).map_err(|err| {
                AiError::internal(format!("failed to render hard words: {err}"))
            })
        }
    }
}

fn render_raw(response: &TaskResponse) -> Result<String, AiError> {
    serde_json::to_string_pretty(response)
        .map_err(|err| AiError::internal(format!("failed to render task response: {err}")))
}

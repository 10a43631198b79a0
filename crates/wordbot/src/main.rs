// # wordbot - Vocabulary Posting Bot
//
// Thin entry point: everything with behaviour lives in wordbot-core and the
// provider/poster crates. This binary is responsible for:
//
// 1. Parsing the command line
// 2. Reading and validating configuration from environment variables
// 3. Initializing logging and the runtime
// 4. Registering providers and wiring the bot engine
// 5. Mapping the run outcome to an exit code
//
// ## Configuration
//
// ### Word provider
// - `GROQ_API_KEY`: Groq API key
// - `GEMINI_API_KEY`: Gemini API key
// - `WORDBOT_PROVIDER`: Force `groq` or `gemini` (default: first with a key)
// - `WORDBOT_GROQ_MODEL`, `WORDBOT_GEMINI_MODEL`: Model overrides
//
// ### X
// - `CONSUMER_KEY`, `CONSUMER_SECRET`, `ACCESS_TOKEN`, `ACCESS_TOKEN_SECRET`
//   (all four required; otherwise posts are only logged)
//
// ### History / logging
// - `WORDBOT_HISTORY_PATH`: History file (default: data/history.json)
// - `WORDBOT_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export GROQ_API_KEY=gsk_...
// wordbot --mode post --dry-run
// wordbot --mode reply --text "We should leverage our synergy"
// ```

mod settings;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;
use wordbot_core::config::PosterConfig;
use wordbot_core::content::format_post;
use wordbot_core::traits::WordProvider;
use wordbot_core::{
    BotEngine, ContentManager, FileHistoryStore, HistoryConfig, HistoryStore, MemoryHistoryStore,
    PostingClient, ProviderRegistry, ReplyEngine,
};

use settings::{Settings, X_CREDENTIAL_VARS, mask};

/// Exit codes for the two possible run results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BotExitCode {
    /// The run finished (including "nothing to do" and failed posts)
    Success = 0,
    /// Configuration error, word-generation failure or missing input
    Failure = 1,
}

impl From<BotExitCode> for ExitCode {
    fn from(code: BotExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl BotExitCode {
    fn from_fatal(fatal: bool) -> Self {
        if fatal {
            BotExitCode::Failure
        } else {
            BotExitCode::Success
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Generate and publish the word of the day
    Post,
    /// Suggest a plainer word for jargon in --text
    Reply,
    /// Show which credentials are configured and try one generation
    Doctor,
}

#[derive(Parser, Debug)]
#[command(name = "wordbot")]
#[command(version)]
#[command(about = "Posts a curated vocabulary word and replies to jargon")]
struct Cli {
    /// Run mode
    #[arg(long, value_enum)]
    mode: Mode,

    /// Text to analyze in reply mode
    #[arg(long)]
    text: Option<String>,

    /// Do everything except publishing (history is left untouched)
    #[arg(long)]
    dry_run: bool,

    /// Post ID to publish the reply to (reply mode)
    #[arg(long, value_name = "ID")]
    reply_to: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = Settings::from_env();

    if let Err(e) = settings.validate() {
        eprintln!("Configuration validation error: {}", e);
        return BotExitCode::Failure.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.level().unwrap_or(tracing::Level::INFO))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return BotExitCode::Failure.into();
    }

    // One invocation, strictly sequential: no worker threads needed
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return BotExitCode::Failure.into();
        }
    };

    let code = rt.block_on(async {
        match run(cli, settings).await {
            Ok(code) => code,
            Err(e) => {
                error!("Bot error: {}", e);
                BotExitCode::Failure
            }
        }
    });

    code.into()
}

/// Register every provider compiled into this binary
fn provider_registry() -> ProviderRegistry {
    #[allow(unused_mut)]
    let mut registry = ProviderRegistry::new();

    #[cfg(feature = "groq")]
    wordbot_provider_groq::register(&mut registry);

    #[cfg(feature = "gemini")]
    wordbot_provider_gemini::register(&mut registry);

    registry
}

/// Build the selected word provider, logging why none is available
fn build_provider(settings: &Settings) -> Option<Box<dyn WordProvider>> {
    let Some(config) = settings.provider_config() else {
        error!("No word provider configured. Set GROQ_API_KEY or GEMINI_API_KEY.");
        return None;
    };

    let registry = provider_registry();
    match registry.create_provider(&config) {
        Ok(provider) => {
            info!("Using {} provider ({:?})", provider.provider_name(), config);
            Some(provider)
        }
        Err(e) => {
            error!(
                "Failed to create {} provider: {}. Available: {:?}",
                config.type_name(),
                e,
                registry.list_providers()
            );
            None
        }
    }
}

/// Build the posting client; without complete credentials posts are only logged
fn build_posting_client(settings: &Settings) -> Result<PostingClient> {
    let Some(config) = settings.poster_config() else {
        settings.warn_about_poster();
        return Ok(PostingClient::dry_run());
    };

    x_posting_client(&config)
}

#[cfg(feature = "x")]
fn x_posting_client(config: &PosterConfig) -> Result<PostingClient> {
    let poster = wordbot_poster_x::XPoster::from_config(config)?;
    Ok(PostingClient::new(Box::new(poster)))
}

#[cfg(not(feature = "x"))]
fn x_posting_client(config: &PosterConfig) -> Result<PostingClient> {
    warn!(
        "X credentials are set but this binary was built without the `x` feature ({:?}).",
        config
    );
    Ok(PostingClient::dry_run())
}

/// Open the configured history store
async fn open_history(config: &HistoryConfig) -> Box<dyn HistoryStore> {
    match config {
        HistoryConfig::File { path } => Box::new(FileHistoryStore::open(path).await),
        HistoryConfig::Memory => Box::new(MemoryHistoryStore::new()),
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<BotExitCode> {
    match cli.mode {
        Mode::Post => run_post(&settings, cli.dry_run).await,
        Mode::Reply => {
            run_reply(
                &settings,
                cli.text.as_deref(),
                cli.reply_to.as_deref(),
                cli.dry_run,
            )
            .await
        }
        Mode::Doctor => Ok(run_doctor(&settings).await),
    }
}

async fn run_post(settings: &Settings, dry_run: bool) -> Result<BotExitCode> {
    let posting = build_posting_client(settings)?;
    if !posting.is_live() && !dry_run {
        info!("No X poster configured: the post will only be logged.");
    }

    let mut engine = BotEngine::new(ReplyEngine::new()?, posting);

    if let Some(provider) = build_provider(settings) {
        let history = open_history(&settings.history_config()).await;
        engine = engine.with_content(ContentManager::new(provider, history));
    }

    let outcome = engine.run_post(dry_run).await;
    Ok(BotExitCode::from_fatal(outcome.is_fatal()))
}

async fn run_reply(
    settings: &Settings,
    text: Option<&str>,
    reply_to: Option<&str>,
    dry_run: bool,
) -> Result<BotExitCode> {
    let posting = if reply_to.is_some() && !dry_run {
        build_posting_client(settings)?
    } else {
        PostingClient::dry_run()
    };

    let engine = BotEngine::new(ReplyEngine::new()?, posting);
    let outcome = engine.run_reply(text, reply_to, dry_run).await;
    Ok(BotExitCode::from_fatal(outcome.is_fatal()))
}

/// Report configuration and try one generation; never posts or writes history
async fn run_doctor(settings: &Settings) -> BotExitCode {
    info!("--- Credential check ---");
    for (name, value) in [
        ("GROQ_API_KEY", &settings.groq_api_key),
        ("GEMINI_API_KEY", &settings.gemini_api_key),
    ]
    .into_iter()
    .chain(X_CREDENTIAL_VARS.into_iter().zip(&settings.x_credentials))
    {
        match value {
            Some(secret) => info!("{}: set ({})", name, mask(secret)),
            None => warn!("{}: not set", name),
        }
    }

    if settings.poster_config().is_none() {
        settings.warn_about_poster();
    }

    let Some(provider) = build_provider(settings) else {
        return BotExitCode::Failure;
    };

    let history = open_history(&settings.history_config()).await;
    let snapshot = history.snapshot().await;
    info!(
        "History: {} word(s) in {}",
        snapshot.len(),
        settings.history_path.display()
    );

    info!("--- Generation check ({}) ---", provider.provider_name());
    match provider.generate_word(&snapshot).await {
        Some(record) => {
            info!("Generation OK. Post would read:\n{}", format_post(&record));
            BotExitCode::Success
        }
        None => {
            error!("Generation failed. Check the API key, model name and logs.");
            BotExitCode::Failure
        }
    }
}

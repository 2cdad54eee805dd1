//! Lexindex CLI - inspect and serve vocabulary indexes

use clap::{Parser, Subcommand};
use lexindex::config::{self, LexindexConfig};
use lexindex::output::{emit_success, is_quiet, OutputMode};
use lexindex::ui::{self, Icons};
use lexindex::{Diagnostic, Language, Lexicon, MemorySink};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lexindex")]
#[command(version)]
#[command(about = "Aggregate and index vocabulary sources for Ancient Greek, Hebrew and Latin")]
#[command(long_about = r#"
Lexindex loads vocabulary sources for a language, normalizes every record
and groups the words by category.

Data layout (local directory or HTTP base URL):
  <language>/catalog.json     source key -> display label
  <language>/<source>.json    group -> [records]

Example usage:
  lexindex sources --language hebrew
  lexindex index --language latin --source core --source dcc
  lexindex index --language greek --search logos --format json
  lexindex serve --bind 127.0.0.1:8080
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Local data directory (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Remote data base URL (overrides config and data directory)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sources available for a language
    Sources {
        /// Language name or alias (e.g. "Ancient Greek", greek, hebrew, latin)
        #[arg(short, long)]
        language: Language,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the raw records of one source
    Records {
        #[arg(short, long)]
        language: Language,

        /// Source key from the catalog
        #[arg(short, long)]
        source: String,
    },

    /// Build the grouped word index
    Index {
        #[arg(short, long)]
        language: Language,

        /// Source keys to include, in order (defaults to every catalog source)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Only show words matching this text
        #[arg(long)]
        search: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Serve the JSON API
    Serve {
        /// Listen address
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Write a config file with the current settings
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let settings = file_config.merged_with(LexindexConfig {
        data_dir: cli.data_dir.clone(),
        base_url: cli.base_url.clone(),
        ..Default::default()
    });

    match cli.command {
        Commands::Sources { language, format } => {
            let mode = OutputMode::from_format(&format)?;
            let sink = Arc::new(MemorySink::new());
            let lexicon = open_lexicon(&settings, sink.clone())?;

            let sources = lexicon.list_sources(language).await;

            if mode.is_human() {
                ui::header(&format!("Sources for {}", language));
                if sources.is_empty() {
                    println!("{} No sources available.", Icons::EMPTY);
                }
                for source in &sources {
                    ui::summary_row(&source.key, &source.display_value);
                }
                report_diagnostics(&sink.entries());
            } else {
                emit_success("sources", serde_json::json!({
                    "language": language,
                    "sources": sources,
                    "diagnostics": sink.entries(),
                }))?;
            }
        }

        Commands::Records { language, source } => {
            let sink = Arc::new(MemorySink::new());
            let lexicon = open_lexicon(&settings, sink.clone())?;

            let records = lexicon.load_records(language, &source).await;
            emit_success("records", serde_json::json!({
                "language": language,
                "source": source,
                "records": records,
                "diagnostics": sink.entries(),
            }))?;
        }

        Commands::Index { language, sources, search, format } => {
            let mode = OutputMode::from_format(&format)?;
            let sink = Arc::new(MemorySink::new());
            let lexicon = open_lexicon(&settings, sink.clone())?;

            let spinner = (mode.is_human() && !is_quiet())
                .then(|| ui::Spinner::new(&format!("Loading {} vocabulary...", language)));
            let groups = if sources.is_empty() {
                lexicon.build_full_index(language).await
            } else {
                lexicon.build_index(language, &sources).await
            };
            if let Some(spinner) = &spinner {
                spinner.finish_and_clear();
            }

            match (mode, search.as_deref()) {
                (OutputMode::Human, Some(text)) => {
                    let hits = groups.search(text);
                    println!("{} {} matches for '{}'", Icons::SEARCH, hits.len(), text);
                    for (group, word) in hits {
                        print!("{} ", ui::dim(&format!("[{}]", group)));
                        ui::word_line(word);
                    }
                    report_diagnostics(&sink.entries());
                }
                (OutputMode::Human, None) => {
                    if groups.is_empty() {
                        println!("{} No words indexed for {}.", Icons::EMPTY, language);
                    }
                    for (group, words) in groups.iter() {
                        ui::group_header(group, words.len());
                        for word in words {
                            ui::word_line(word);
                        }
                    }
                    ui::section(&format!("{} {}", Icons::STATS, language));
                    println!("{}", ui::stats_table(&groups.stats(), &groups.fingerprint()));
                    report_diagnostics(&sink.entries());
                }
                (OutputMode::Json, Some(text)) => {
                    let hits: Vec<_> = groups
                        .search(text)
                        .into_iter()
                        .map(|(group, word)| serde_json::json!({ "group": group, "word": word }))
                        .collect();
                    emit_success("search", serde_json::json!({
                        "language": language,
                        "query": text,
                        "hits": hits,
                        "diagnostics": sink.entries(),
                    }))?;
                }
                (OutputMode::Json, None) => {
                    emit_success("index", serde_json::json!({
                        "language": language,
                        "fingerprint": groups.fingerprint(),
                        "stats": groups.stats(),
                        "groups": groups,
                        "diagnostics": sink.entries(),
                    }))?;
                }
            }
        }

        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind().to_string());
            let addr: SocketAddr = bind.parse()
                .map_err(|e| anyhow::anyhow!("invalid bind address '{}': {}", bind, e))?;

            let store = settings.open_store()?;
            tracing::info!("Serving {} documents", store.name());
            let lexicon = Lexicon::new(store).with_max_concurrent(settings.max_concurrent_fetches());
            lexindex::server::start_server(addr, lexicon).await?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let to_write = LexindexConfig {
                data_dir: settings.data_dir.clone().or_else(|| Some(config::DEFAULT_DATA_DIR.to_string())),
                ..settings
            };
            config::write_config(&path, &to_write, force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn open_lexicon(settings: &LexindexConfig, sink: Arc<MemorySink>) -> anyhow::Result<Lexicon> {
    let store = settings.open_store()?;
    tracing::debug!("Using {} document store", store.name());
    Ok(Lexicon::new(store)
        .with_sink(sink)
        .with_max_concurrent(settings.max_concurrent_fetches()))
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!();
    ui::warn(&format!("{} problem(s) while loading:", diagnostics.len()));
    for diagnostic in diagnostics {
        ui::error(&diagnostic.to_string());
    }
}

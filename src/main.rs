mod autocomplete;
mod cli;
mod corpus;
mod handlers;
mod http;
mod importer;
mod init;
mod models;

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
    sync::{atomic::AtomicBool, Arc},
};

use clap::Parser;

use cli::Commands;
use corpus::Corpus;
use handlers::{Consts, Ctx};
use models::Config;

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Handle CLI commands.
    if let Some(cmd) = cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match init::generate_config(&path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            // Print completions for an input or for stdin lines.
            Commands::Complete { limit, input } => {
                let config = init::init_config(&cli.config);
                let path = corpus_path(&cli.corpus, &config);

                let corpus = Corpus::new();
                load_corpus(&path, &corpus, &config);

                if let Err(e) = print_completions(&corpus, input, limit) {
                    log::error!("error writing completions: {}", e);
                    std::process::exit(1);
                }
                return;
            }
        }
    }

    // Load config.
    let config = init::init_config(&cli.config);
    let path = corpus_path(&cli.corpus, &config);
    if !path.exists() {
        log::error!("corpus file '{}' not found", path.display());
        std::process::exit(1);
    }

    let ctx = Arc::new(Ctx {
        corpus: Arc::new(Corpus::new()),
        loaded: AtomicBool::new(false),
        consts: Consts {
            default_results: config.app.default_results,
            max_results: config.app.max_results,
        },
    });

    // Load the corpus in the background. Completion requests get a 503 until it's done.
    {
        let ctx = ctx.clone();
        let config = config.clone();
        tokio::task::spawn_blocking(move || {
            load_corpus(&path, &ctx.corpus, &config);
            ctx.set_loaded();
        });
    }

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = config.app.address;

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}

/// Corpus path from the --corpus flag, or the config.
fn corpus_path(flag: &Option<PathBuf>, config: &Config) -> PathBuf {
    flag.clone().unwrap_or_else(|| PathBuf::from(&config.app.corpus))
}

/// Import the corpus file and exit with an error message on failure.
fn load_corpus(path: &Path, corpus: &Corpus, config: &Config) {
    if let Err(e) = importer::import_file(path, corpus, config.import.batch_size) {
        log::error!("error loading corpus {}: {}", path.display(), e);
        std::process::exit(1);
    }

    if corpus.is_empty() {
        log::warn!("corpus {} has no phrases", path.display());
    }
}

/// Print completions for `input`, or for every non-blank stdin line if there's no input.
fn print_completions(
    corpus: &Corpus,
    input: Option<String>,
    limit: usize,
) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let limit = if limit == 0 { usize::MAX } else { limit };

    if let Some(input) = input {
        for c in autocomplete::complete(corpus, &input).iter().take(limit) {
            writeln!(out, "{}", c)?;
        }
        return Ok(());
    }

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let results = autocomplete::complete(corpus, &line);
        writeln!(out, "{}: {}", line, results.len())?;
        for c in results.iter().take(limit) {
            writeln!(out, "  {}", c)?;
        }
        out.flush()?;
    }

    Ok(())
}

use std::path::{Path, PathBuf};

use crate::{importer, models::Config};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

const DEFAULT_ADDRESS: &str = "127.0.0.1:9000";
const DEFAULT_CORPUS: &str = "words.txt";
const DEFAULT_RESULTS: usize = 10;
const MAX_RESULTS: usize = 50;

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge one or more config files. Missing files are skipped and
/// unset values fall back to defaults.
pub fn init_config(paths: &[PathBuf]) -> Config {
    let mut config = Config::default();

    for path in paths {
        if !path.exists() {
            log::warn!("config file {} not found, skipping", path.display());
            continue;
        }

        log::info!("loading config: {}", path.display());
        match read_config(path) {
            Ok(c) => merge_config(&mut config, c),
            Err(e) => {
                log::error!("error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    apply_defaults(&mut config);
    config
}

/// Load configuration from TOML file.
fn read_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Generate sample config file.
pub fn generate_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Merge the given src config into the dest config struct.
fn merge_config(dest: &mut Config, src: Config) {
    // Merge app config.
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.corpus.is_empty() {
        dest.app.corpus = src.app.corpus;
    }
    if src.app.default_results > 0 {
        dest.app.default_results = src.app.default_results;
    }
    if src.app.max_results > 0 {
        dest.app.max_results = src.app.max_results;
    }

    // Merge import config.
    if src.import.batch_size > 0 {
        dest.import.batch_size = src.import.batch_size;
    }
}

fn apply_defaults(cfg: &mut Config) {
    if cfg.app.address.is_empty() {
        cfg.app.address = DEFAULT_ADDRESS.to_string();
    }
    if cfg.app.corpus.is_empty() {
        cfg.app.corpus = DEFAULT_CORPUS.to_string();
    }
    if cfg.app.max_results == 0 {
        cfg.app.max_results = MAX_RESULTS;
    }
    if cfg.app.default_results == 0 {
        cfg.app.default_results = DEFAULT_RESULTS;
    }
    cfg.app.default_results = cfg.app.default_results.min(cfg.app.max_results);

    if cfg.import.batch_size == 0 {
        cfg.import.batch_size = importer::DEFAULT_BATCH_SIZE;
    }
}

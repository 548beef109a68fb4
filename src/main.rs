//! Entry point for the pictogram narration preview tool.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load configuration from `conf/config.toml`.
//! - Tokenize the input text and fetch its pictogram mapping.
//!
//! Narration needs an embedding host that provides a narration engine; on a
//! bare terminal it is reported unavailable once and the rest keeps working.

use anyhow::{Context, Result, anyhow};
use picto_reader::config::load_config;
use picto_reader::pictograms::{ArasaacClient, LookupBatcher};
use picto_reader::tokenizer;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let (text_path, locale_override) = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());

    let locale = locale_override.unwrap_or_else(|| config.locale.clone());
    info!(
        path = %text_path.display(),
        %locale,
        concurrency = config.lookup_concurrency,
        "Starting pictogram preview"
    );
    warn!("No narration engine on this host; playback features are disabled");

    let text = fs::read_to_string(&text_path)
        .with_context(|| format!("Reading text from {}", text_path.display()))?;
    let tokens = tokenizer::tokenize(&text);
    info!(tokens = tokens.len(), "Tokenized input");
    if tokens.is_empty() {
        warn!("Input contains no speakable tokens");
        return Ok(());
    }

    let client = ArasaacClient::new(
        config.arasaac_base_url.clone(),
        Duration::from_secs(config.lookup_timeout_secs),
    )?;
    let batcher =
        LookupBatcher::new(client, config.lookup_concurrency).with_word_cap(config.lookup_word_cap);

    let words: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
    let results = batcher.fetch(&words, &locale);

    let matched = results.values().filter(|entry| entry.is_some()).count();
    info!(attempted = results.len(), matched, "Pictogram lookup complete");
    for (word, entry) in &results {
        match entry {
            Some(found) => println!("{word} -> {}", found.image_url),
            None => println!("{word} -> (no match)"),
        }
    }
    Ok(())
}

fn parse_args() -> Result<(PathBuf, Option<String>)> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow!("Usage: picto-reader <path-to-text> [locale]"))?;

    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }
    Ok((path, args.next()))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

// Exclude entire file from coverage - binary entry point
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};

use yuedict_lib::commands::{
    add_translation_impl, init_db_impl, list_translations_impl, to_user_error, translate_impl,
    AddTranslationRequest, ListTranslationsRequest, TranslateRequest,
};
use yuedict_lib::config::{parse_limit, ConfigError};
use yuedict_lib::server::{self, AppState};
use yuedict_lib::{AppConfig, Direction, LookupEngine, TranslationSelection, TursoClient};

#[derive(Parser)]
#[command(name = "yuedict", version, about = "Chinese to Cantonese dictionary and translator")]
struct Cli {
    /// Directory holding the database (overrides YUEDICT_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Max exact matches per token (overrides YUEDICT_EXACT_LIMIT)
    #[arg(long, global = true, value_parser = limit_arg)]
    exact_limit: Option<usize>,

    /// Max substring matches per token (overrides YUEDICT_PARTIAL_LIMIT)
    #[arg(long, global = true, value_parser = limit_arg)]
    partial_limit: Option<usize>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API over HTTP
    Serve(ServeArgs),
    /// Create or migrate the database schema
    InitDb,
    /// Add a translation entry
    Add(AddArgs),
    /// List translation entries
    List(ListArgs),
    /// Translate text word by word
    Translate(TranslateArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:3000 (overrides YUEDICT_BIND)
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Args)]
struct AddArgs {
    chinese: String,
    cantonese: String,
}

#[derive(Args)]
struct ListArgs {
    /// Substring to match against either field
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value_t = 1)]
    page: u64,
    #[arg(long, default_value_t = 50)]
    limit: u64,
}

#[derive(Args)]
struct TranslateArgs {
    text: String,
    /// Source language: zh (Chinese) or en (Cantonese romanization)
    #[arg(long, default_value = "zh")]
    from: Direction,
    /// Choose a candidate, as TOKEN_INDEX:CANDIDATE_INDEX (repeatable)
    #[arg(long = "pick", value_name = "TOKEN:CANDIDATE")]
    picks: Vec<String>,
    /// Translate the composed result back in the opposite direction
    #[arg(long)]
    swap: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(&cli)?;

    let client = Arc::new(
        TursoClient::new(config.data_dir.clone())
            .await
            .context("Failed to open database")?,
    );
    log::debug!("Using database at {:?}", client.db_path());
    let engine = LookupEngine::new(client.clone(), config.limits);

    match cli.command {
        Commands::Serve(args) => {
            init_db_impl(&client)
                .await
                .map_err(|e| anyhow!(to_user_error(&e)))?;
            let bind = args.bind.unwrap_or(config.bind);
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            let router = server::build_router(AppState::new(client, engine));
            server::serve(listener, router).await?;
        }
        Commands::InitDb => {
            init_db_impl(&client)
                .await
                .map_err(|e| anyhow!(to_user_error(&e)))?;
            println!("Database initialized at {}", client.db_path().display());
        }
        Commands::Add(args) => {
            let entry = add_translation_impl(
                client.as_ref(),
                AddTranslationRequest {
                    chinese: Some(args.chinese),
                    cantonese: Some(args.cantonese),
                },
            )
            .await
            .map_err(|e| anyhow!(to_user_error(&e)))?;
            println!("{}\t{}\t{}", entry.id, entry.chinese, entry.cantonese);
        }
        Commands::List(args) => {
            let page = list_translations_impl(
                client.as_ref(),
                ListTranslationsRequest {
                    search: args.search,
                    page: args.page,
                    limit: args.limit,
                },
            )
            .await
            .map_err(|e| anyhow!(to_user_error(&e)))?;
            for entry in &page.translations {
                println!("{}\t{}\t{}", entry.id, entry.chinese, entry.cantonese);
            }
            println!(
                "-- page {} of {} ({} total)",
                args.page, page.total_pages, page.total
            );
        }
        Commands::Translate(args) => {
            let mut selection = translate_impl(
                &engine,
                TranslateRequest {
                    text: Some(args.text),
                    from_lang: Some(args.from),
                },
            )
            .await
            .map_err(|e| anyhow!(to_user_error(&e)))?;

            for pick in &args.picks {
                let (token, candidate) = parse_pick(pick)?;
                selection.select(token, candidate)?;
            }
            print_selection(&selection);

            if args.swap {
                let swapped = selection.swap_direction();
                let reverse = engine.translate(&swapped.text, swapped.direction).await;
                println!();
                print_selection(&reverse);
            }
        }
    }

    Ok(())
}

/// Environment configuration with command-line overrides applied
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(limit) = cli.exact_limit {
        config.limits.exact = limit;
    }
    if let Some(limit) = cli.partial_limit {
        config.limits.partial = limit;
    }
    Ok(config)
}

/// Clap value parser for the per-token row caps
fn limit_arg(value: &str) -> Result<usize, ConfigError> {
    parse_limit("limit", value)
}

fn parse_pick(pick: &str) -> Result<(usize, usize)> {
    let (token, candidate) = pick
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid pick '{}', expected TOKEN:CANDIDATE", pick))?;
    let token = token
        .trim()
        .parse()
        .with_context(|| format!("Invalid token index in '{}'", pick))?;
    let candidate = candidate
        .trim()
        .parse()
        .with_context(|| format!("Invalid candidate index in '{}'", pick))?;
    Ok((token, candidate))
}

fn print_selection(selection: &TranslationSelection) {
    for (index, set) in selection.candidate_sets().iter().enumerate() {
        let choices: Vec<String> = set
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, candidate)| {
                if i == set.selected_index() {
                    format!("[{}]", candidate)
                } else {
                    candidate.clone()
                }
            })
            .collect();
        println!("{}. {}: {}", index, set.original(), choices.join(" | "));
    }
    println!(
        "{} -> {}",
        selection.direction(),
        selection.compose_selection()
    );
}

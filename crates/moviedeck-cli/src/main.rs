//! moviedeck - terminal movie browser backed by TMDB.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use moviedeck_api::tmdb::LocalMovieApi;
use moviedeck_view::aggregator::load_detail;
use moviedeck_view::model::{MovieId, summaries};
use moviedeck_view::render::{Screen, render_card, render_detail};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{
    AppConfig, ClientSettings, TOKEN_ENV_VAR, resolve_config_path, resolve_log_path,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse popular movies in an interactive TUI.
    Browse,
    /// Load and print one movie's detail view.
    Detail(DetailArgs),
    /// Print the first page of popular movies.
    Popular,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Probe every image and report placeholder fallbacks.
    #[arg(long)]
    verify_images: bool,
}

/// Loads the config file and resolves client settings.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or no API token is available.
fn load_settings(dir: Option<&PathBuf>) -> Result<ClientSettings> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    config
        .client_settings(std::env::var(TOKEN_ENV_VAR).ok())
        .context("failed to resolve client settings")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build, the popular list cannot
/// be fetched, or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let settings = load_settings(dir)?;
    let client = settings.build_client()?;

    let list = client
        .popular_movies(&settings.language)
        .await
        .context("failed to fetch popular movies")?;
    let movies = summaries(&list);
    tracing::info!("Loaded {} popular movies. Launching TUI...", movies.len());

    crate::tui::run_browser(&client, &settings.language, &settings.images, movies)
        .await
        .context("movie browser TUI failed")
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the detail cannot be loaded.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let settings = load_settings(dir)?;
    let client = settings.build_client()?;

    let state = load_detail(&client, MovieId(args.id), &settings.language).await;
    let mut view = match render_detail(&state, &settings.images) {
        Screen::Ready(view) => view,
        Screen::Failed(panel) => bail!("{}: {}", panel.headline, panel.detail),
        Screen::Empty | Screen::Loading => bail!("movie {} did not load", args.id),
    };

    if args.verify_images {
        for slot in view.image_slots_mut() {
            slot.verify(&client).await;
        }
    }

    tracing::info!("{} ({})", view.title, view.movie_id);
    if let Some(tagline) = &view.tagline {
        tracing::info!("  {tagline}");
    }
    tracing::info!(
        "  Year: {}  Runtime: {}  Rating: {}",
        view.pills.year,
        view.pills.runtime,
        view.pills.rating
    );
    tracing::info!("  Genres: {}", view.genres.join(", "));
    if !view.directors.is_empty() {
        tracing::info!("  Directors: {}", view.directors.join(", "));
    }
    tracing::info!("  Overview: {}", view.overview);
    tracing::info!("  Backdrop: {}", view.backdrop.src());
    tracing::info!("  Poster: {}", view.poster.src());
    tracing::info!("  Cast:");
    for member in &view.cast {
        tracing::info!(
            "    {} as {}  [{}]",
            member.name,
            member.character.as_deref().unwrap_or("-"),
            member.headshot.src()
        );
    }
    tracing::info!("  Similar:");
    for tile in &view.similar {
        tracing::info!(
            "    {}\t{} ({})  [{}]",
            tile.movie_id,
            tile.title,
            tile.year,
            tile.poster.src()
        );
    }
    if let Some(url) = &view.trailer_url {
        tracing::info!("  Trailer: {url}");
    }
    tracing::info!("  TMDB: {}", view.page_url);

    Ok(())
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_popular(dir: Option<&PathBuf>) -> Result<()> {
    let settings = load_settings(dir)?;
    let client = settings.build_client()?;

    let list = client
        .popular_movies(&settings.language)
        .await
        .context("failed to fetch popular movies")?;
    let movies = summaries(&list);

    tracing::info!("ID\tRating\tYear\tLang\tTitle");
    for movie in &movies {
        let card = render_card(movie, true, &settings.images);
        let Some(overlay) = card.overlay else {
            continue;
        };
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            card.movie_id,
            overlay.rating,
            overlay.year,
            overlay.language,
            card.title
        );
    }
    tracing::info!("Total: {} movies", movies.len());

    Ok(())
}

/// Picks the log destination: a file next to the config while the TUI owns
/// the terminal, stdout otherwise. Returns the writer and whether ANSI
/// colors apply.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn log_writer(cli: &Cli) -> Result<(BoxMakeWriter, bool)> {
    if !matches!(cli.command, Commands::Browse) {
        return Ok((BoxMakeWriter::new(std::io::stdout), true));
    }

    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    let log_path = resolve_log_path(&config_path);
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;
    Ok((BoxMakeWriter::new(Mutex::new(file)), false))
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (writer, ansi) = log_writer(&cli)?;

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    match cli.command {
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::Detail(args) => run_detail(&args, cli.dir.as_ref()).await,
        Commands::Popular => run_popular(cli.dir.as_ref()).await,
    }
}

//! reelbox - terminal browser for the TMDB catalog.

/// Application configuration (TOML).
mod config;
/// Effect execution on the async runtime.
mod dispatch;
/// Screen state machines.
mod screens;
/// Client and store construction.
mod services;
/// Terminal UI.
mod tui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reelbox_api::tmdb::{CatalogApi, Category, Title, UNKNOWN_NAME, UNKNOWN_TITLE_NAME};
use reelbox_api::youtube::{TrailerApi, TrailerSuffix, trailer_query};
use reelbox_db::{DownloadStore, SavedTitle, resolve_data_dir};
use tokio::runtime::Handle;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::dispatch::Dispatcher;
use crate::screens::{Effect, SearchScreen, saved_display_name, to_new_saved_title};
use crate::services::{Services, build_tmdb_client, build_youtube_client, load_config};

/// Log file written while the TUI owns the terminal.
const LOG_FILE_NAME: &str = "reelbox.log";

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
    /// Query the TMDB catalog.
    Catalog(CatalogCommand),
    /// Look up a trailer on YouTube.
    Trailer(TrailerArgs),
    /// Manage saved titles.
    Downloads(DownloadsCommand),
    /// Browse the catalog interactively.
    Browse,
}

/// Arguments for the `catalog` subcommand.
#[derive(clap::Args)]
struct CatalogCommand {
    /// Catalog subcommand to run.
    #[command(subcommand)]
    command: CatalogSubcommands,
}

/// Available catalog subcommands.
#[derive(Subcommand)]
enum CatalogSubcommands {
    /// List one catalog category.
    List(CatalogListArgs),
    /// Search movies by text.
    Search(CatalogSearchArgs),
}

/// Catalog listing selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    /// Movies trending today.
    TrendingMovies,
    /// Shows trending today.
    TrendingTv,
    /// Popular movies.
    Popular,
    /// Upcoming movies.
    Upcoming,
    /// Top rated movies.
    TopRated,
    /// Discover, sorted by popularity.
    Discover,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::TrendingMovies => Self::TrendingMovies,
            CategoryArg::TrendingTv => Self::TrendingTv,
            CategoryArg::Popular => Self::Popular,
            CategoryArg::Upcoming => Self::Upcoming,
            CategoryArg::TopRated => Self::TopRated,
            CategoryArg::Discover => Self::Discover,
        }
    }
}

/// Arguments for the `catalog list` subcommand.
#[derive(clap::Args)]
struct CatalogListArgs {
    /// Category to list.
    #[arg(long, value_enum)]
    category: CategoryArg,
}

/// Arguments for the `catalog search` subcommand.
#[derive(clap::Args)]
struct CatalogSearchArgs {
    /// Search text (at least 3 characters after trimming).
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `trailer` subcommand.
#[derive(clap::Args)]
struct TrailerArgs {
    /// Title name to search for.
    #[arg(long, required = true)]
    name: String,
    /// Append the word "trailer" to the query.
    #[arg(long)]
    suffix: bool,
}

/// Arguments for the `downloads` subcommand.
#[derive(clap::Args)]
struct DownloadsCommand {
    /// Downloads subcommand to run.
    #[command(subcommand)]
    command: DownloadsSubcommands,
}

/// Available downloads subcommands.
#[derive(Subcommand)]
enum DownloadsSubcommands {
    /// List saved titles.
    List,
    /// Save a title from a catalog category.
    Save(DownloadsSaveArgs),
    /// Remove one saved title.
    Remove(DownloadsRemoveArgs),
}

/// Arguments for the `downloads save` subcommand.
#[derive(clap::Args)]
struct DownloadsSaveArgs {
    /// Category the title is listed in.
    #[arg(long, value_enum)]
    category: CategoryArg,
    /// TMDB ID of the title.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `downloads remove` subcommand.
#[derive(clap::Args)]
struct DownloadsRemoveArgs {
    /// Row ID shown by `downloads list`.
    #[arg(long, required = true)]
    row_id: i64,
}

/// Logs a title table.
fn log_titles(titles: &[Title], placeholder: &str) {
    tracing::info!("ID\tYear\tRating\tTitle");
    for title in titles {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}",
            title.id,
            title
                .release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            title.vote_average,
            title.display_name(placeholder),
        );
    }
    tracing::info!("Total: {} titles", titles.len());
}

/// Logs a saved title table.
fn log_saved_titles(saved: &[SavedTitle]) {
    tracing::info!("RowID\tID\tSavedAt\t\t\tTitle");
    for record in saved {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            record.row_id,
            record.id,
            record.saved_at,
            saved_display_name(record, UNKNOWN_TITLE_NAME),
        );
    }
    tracing::info!("Total: {} saved titles", saved.len());
}

/// Runs the `catalog list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_catalog_list(args: &CatalogListArgs, dir: Option<&Path>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let category = Category::from(args.category);

    let titles = client
        .fetch_category(category)
        .await
        .with_context(|| format!("failed to fetch {category}"))?;

    log_titles(&titles, UNKNOWN_TITLE_NAME);
    Ok(())
}

/// Runs the `catalog search` subcommand.
///
/// Short queries are ignored the same way the search screen ignores them.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_catalog_search(args: &CatalogSearchArgs, dir: Option<&Path>) -> Result<()> {
    let mut screen = SearchScreen::default();
    let Some(Effect::Search { query, .. }) = screen.set_query(&args.query) else {
        tracing::info!(
            "Query {:?} is shorter than {} characters; nothing searched.",
            args.query.trim(),
            screens::MIN_QUERY_LEN
        );
        return Ok(());
    };

    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let titles = client
        .search(&query)
        .await
        .context("TMDB search/movie request failed")?;

    log_titles(&titles, UNKNOWN_NAME);
    Ok(())
}

/// Runs the `trailer` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build, the request fails, or
/// no video matches.
#[instrument(skip_all)]
async fn run_trailer(args: &TrailerArgs, dir: Option<&Path>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_youtube_client(&config)?;
    let suffix = if args.suffix {
        TrailerSuffix::Append
    } else {
        TrailerSuffix::None
    };
    let query = trailer_query(&args.name, suffix);

    let trailer = client
        .find_trailer(&query)
        .await
        .with_context(|| format!("trailer lookup failed for {query:?}"))?;

    tracing::info!("Embed: {}", trailer.embed_url());
    tracing::info!("Watch: {}", trailer.watch_url());
    Ok(())
}

/// Runs the `downloads list` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read.
#[instrument(skip_all)]
fn run_downloads_list(dir: Option<&Path>) -> Result<()> {
    let store = DownloadStore::open(dir).context("failed to open database")?;
    let saved = store.list_all().context("failed to load saved titles")?;

    if saved.is_empty() {
        tracing::info!("No saved titles.");
        return Ok(());
    }
    log_saved_titles(&saved);
    Ok(())
}

/// Runs the `downloads save` subcommand.
///
/// # Errors
///
/// Returns an error if the fetch fails, the title is not listed in the
/// category, or the store write fails.
#[instrument(skip_all)]
async fn run_downloads_save(args: &DownloadsSaveArgs, dir: Option<&Path>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let category = Category::from(args.category);

    let titles = client
        .fetch_category(category)
        .await
        .with_context(|| format!("failed to fetch {category}"))?;
    let title = titles
        .iter()
        .find(|t| t.id == args.id)
        .with_context(|| format!("title {} is not listed in {category}", args.id))?;

    let store = DownloadStore::open(dir).context("failed to open database")?;
    let saved = store
        .save(&to_new_saved_title(title))
        .context("failed to save title")?;

    tracing::info!(
        "Saved {} (row {})",
        saved_display_name(&saved, UNKNOWN_TITLE_NAME),
        saved.row_id
    );
    Ok(())
}

/// Runs the `downloads remove` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, read or written.
#[instrument(skip_all)]
fn run_downloads_remove(args: &DownloadsRemoveArgs, dir: Option<&Path>) -> Result<()> {
    let store = DownloadStore::open(dir).context("failed to open database")?;
    let saved = store.list_all().context("failed to load saved titles")?;

    let Some(record) = saved.iter().find(|s| s.row_id == args.row_id) else {
        tracing::info!("No saved title with row {}.", args.row_id);
        return Ok(());
    };
    store.delete(record).context("failed to remove title")?;

    tracing::info!(
        "Removed {} (row {})",
        saved_display_name(record, UNKNOWN_TITLE_NAME),
        record.row_id
    );
    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if services fail to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&Path>) -> Result<()> {
    let config = load_config(dir)?;
    let services = Services::build(&config, dir)?;
    let (dispatcher, outcomes) = Dispatcher::new(
        services.catalog,
        services.trailers,
        services.store,
        Handle::current(),
    );

    tokio::task::spawn_blocking(move || tui::run_browser(&dispatcher, outcomes))
        .await
        .context("browser thread failed")?
        .context("browser TUI failed")
}

/// Opens the TUI log file under the data directory.
fn open_log_file(dir: Option<&Path>) -> Result<std::fs::File> {
    let data_dir = resolve_data_dir(dir).context("failed to resolve data directory")?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create directory {}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))
}

/// Installs the tracing subscriber.
///
/// Logs go to stdout, or to `log_file` while the TUI owns the terminal.
/// Colors are off for the log file and when `NO_COLOR` is set.
fn init_tracing(log_file: Option<std::fs::File>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = log_file.is_none() && std::env::var_os("NO_COLOR").is_none();
    let writer = log_file.map_or_else(
        || BoxMakeWriter::new(std::io::stdout),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "otel")]
    let registry = {
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
        registry.with(otel_layer)
    };

    registry.init();
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_deref();

    let log_file = match cli.command {
        Commands::Browse => Some(open_log_file(dir)?),
        Commands::Catalog(_) | Commands::Trailer(_) | Commands::Downloads(_) => None,
    };
    init_tracing(log_file);

    match &cli.command {
        Commands::Catalog(cmd) => match &cmd.command {
            CatalogSubcommands::List(args) => run_catalog_list(args, dir).await,
            CatalogSubcommands::Search(args) => run_catalog_search(args, dir).await,
        },
        Commands::Trailer(args) => run_trailer(args, dir).await,
        Commands::Downloads(cmd) => match &cmd.command {
            DownloadsSubcommands::List => run_downloads_list(dir),
            DownloadsSubcommands::Save(args) => run_downloads_save(args, dir).await,
            DownloadsSubcommands::Remove(args) => run_downloads_remove(args, dir),
        },
        Commands::Browse => run_browse(dir).await,
    }
}

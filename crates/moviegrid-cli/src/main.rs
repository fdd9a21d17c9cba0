//! moviegrid - TMDB movie catalog browser.

/// Application configuration (TOML).
mod config;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path};
use moviegrid_api::tmdb::TmdbClient;
use moviegrid_tui::browser::run_browser;
use moviegrid_tui::browser::state::BrowserState;
use moviegrid_tui::catalog::{CatalogController, CatalogView};
use moviegrid_tui::detail::{DetailController, DetailView};
use moviegrid_tui::format::DateStyle;
use moviegrid_tui::query::QueryState;
use moviegrid_tui::share::{Route, ShareLink};
use moviegrid_tui::source::CatalogSource;

/// Version string with the git revision.
const APP_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (rev:", env!("GIT_HASH"), ")");

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "moviegrid", about, version = APP_VERSION)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Response language (default: `tmdb.language` from config, "en-US").
    #[arg(long, global = true)]
    language: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively.
    Browse(BrowseArgs),
    /// Print one page of popular movies.
    Popular(PageArgs),
    /// Print one page of search results.
    Search(SearchArgs),
    /// Print the details of one movie.
    Movie(MovieArgs),
    /// Print a shareable link.
    Link(LinkArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Initial search text.
    #[arg(long)]
    search: Option<String>,
    /// Initial page.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Open a shareable link (overrides --search and --page).
    #[arg(long)]
    link: Option<String>,
}

/// Arguments for the `popular` subcommand.
#[derive(clap::Args)]
struct PageArgs {
    /// Page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text (e.g. "inception").
    #[arg(long, required = true)]
    query: String,
    /// Page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID (e.g. 27205).
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `link` subcommand.
#[derive(clap::Args)]
struct LinkArgs {
    /// Search text.
    #[arg(long, conflicts_with = "movie")]
    search: Option<String>,
    /// Page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Link to a movie instead of the catalog.
    #[arg(long)]
    movie: Option<u64>,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective config with secrets masked.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Loaded config plus command-line overrides.
struct Settings {
    config: AppConfig,
    language: String,
}

impl Settings {
    /// Loads the config file and applies `--language`.
    fn load(dir: Option<&Path>, language: Option<String>) -> Result<Self> {
        let path = resolve_config_path(dir)?;
        let config = AppConfig::load(&path)?;
        let language = language.unwrap_or_else(|| config.tmdb.language.clone());
        Ok(Self { config, language })
    }

    fn date_style(&self) -> DateStyle {
        DateStyle::for_language(&self.language)
    }

    fn share_link(&self) -> Result<ShareLink> {
        ShareLink::parse(&self.config.share.base_url)
    }

    fn source(&self) -> Result<CatalogSource<TmdbClient>> {
        let client = build_tmdb_client(&self.config.tmdb)?;
        Ok(CatalogSource::new(client, self.language.clone()))
    }
}

/// Builds the TMDB client. A missing credential is not an error here; every
/// request then fails before reaching the network.
///
/// # Errors
///
/// Returns an error if the base URL override is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(tmdb: &TmdbConfig) -> Result<TmdbClient> {
    let credential = tmdb.credential(
        std::env::var("TMDB_API_KEY").ok(),
        std::env::var("TMDB_API_TOKEN").ok(),
    );
    if credential.is_none() {
        tracing::debug!("no TMDB credential configured");
    }

    let mut builder = TmdbClient::builder()
        .credential(credential)
        .timeout(tmdb.timeout())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(base_url) = &tmdb.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid tmdb.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the link is invalid or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: BrowseArgs, settings: &Settings) -> Result<()> {
    let source = settings.source()?;
    let link = settings.share_link()?;
    let route = match &args.link {
        Some(raw) => link.route(raw)?,
        None => Route::Catalog {
            search: args.search.unwrap_or_default(),
            page: args.page,
        },
    };
    let (state, effects) = BrowserState::new(&route, link, settings.date_style());

    let handle = tokio::runtime::Handle::current();
    let state = tokio::task::spawn_blocking(move || run_browser(&handle, &source, state, effects))
        .await
        .context("browser thread failed")?
        .context("browser TUI failed")?;

    tracing::info!("{}", state.address.current());
    Ok(())
}

/// Runs one catalog cycle and prints the grid.
///
/// # Errors
///
/// Returns an error if the cycle ends in the error state.
#[instrument(skip_all)]
async fn run_catalog_page(query: QueryState, settings: &Settings) -> Result<()> {
    let source = settings.source()?;
    let link = settings.share_link()?;
    let mut controller = CatalogController::new(query);
    controller.refresh(&source).await;

    match CatalogView::from_controller(&controller, settings.date_style()) {
        CatalogView::Error(reason) => bail!("catalog request failed: {reason}"),
        CatalogView::Loading => bail!("catalog request did not complete"),
        CatalogView::Grid(grid) => {
            tracing::info!(
                "Page {}/{} ({} movies)",
                grid.page,
                grid.total_pages,
                grid.cards.len()
            );
            tracing::info!("ID\tRating\tReleased\tTitle");
            for card in &grid.cards {
                tracing::info!(
                    "{}\t{}\t{}\t{}",
                    card.id,
                    card.rating,
                    card.release_date,
                    card.title
                );
            }
            let query = controller.query();
            tracing::info!("Link: {}", link.catalog_url(query.search(), query.page()));
        }
    }
    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the cycle ends in the error state.
#[instrument(skip_all)]
async fn run_movie(args: &MovieArgs, settings: &Settings) -> Result<()> {
    let source = settings.source()?;
    let link = settings.share_link()?;
    let mut controller = DetailController::new();
    controller.refresh(&source, args.id).await;

    match DetailView::from_controller(&controller, settings.date_style()) {
        DetailView::Error(reason) => bail!("movie request failed: {reason}"),
        DetailView::Empty | DetailView::Loading => bail!("movie request did not complete"),
        DetailView::Movie(panel) => {
            tracing::info!("{} ({})", panel.title, panel.id);
            if let Some(tagline) = &panel.tagline {
                tracing::info!("  {tagline}");
            }
            tracing::info!("Rating:   {} ({})", panel.score, panel.rating);
            tracing::info!("Released: {}", panel.release_date);
            tracing::info!("Runtime:  {}", panel.runtime);
            tracing::info!("Genres:   {}", panel.genres);
            let poster = panel
                .poster
                .url()
                .map_or_else(|| panel.poster.label(), ToString::to_string);
            tracing::info!("Poster:   {poster}");
            tracing::info!("Overview: {}", panel.overview);
            tracing::info!("Link: {}", link.movie_url(panel.id)?);
        }
    }
    Ok(())
}

/// Runs the `link` subcommand.
///
/// # Errors
///
/// Returns an error if the share base URL is invalid.
fn run_link(args: &LinkArgs, settings: &Settings) -> Result<()> {
    let link = settings.share_link()?;
    let url = match args.movie {
        Some(movie_id) => link.movie_url(movie_id)?,
        None => link.catalog_url(args.search.as_deref().unwrap_or_default(), args.page),
    };
    tracing::info!("{url}");
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be serialized.
fn run_config_show(dir: Option<&Path>, settings: &Settings) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let shown =
        toml::to_string_pretty(&settings.config.redacted()).context("failed to render config")?;
    tracing::info!("# {}", path.display());
    for line in shown.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(dir: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Initializes the tracing subscriber.
fn init_tracing() {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

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
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        clap_complete::generate(
            args.shell,
            &mut Cli::command(),
            "moviegrid",
            &mut io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let dir = cli.dir.as_deref();
    if let Commands::Config(ConfigCommand {
        command: ConfigSubcommands::Init { force },
    }) = &cli.command
    {
        return run_config_init(dir, *force);
    }

    let settings = Settings::load(dir, cli.language)?;
    match cli.command {
        Commands::Browse(args) => run_browse(args, &settings).await,
        Commands::Popular(args) => {
            run_catalog_page(QueryState::new("", args.page), &settings).await
        }
        Commands::Search(args) => {
            run_catalog_page(QueryState::new(args.query, args.page), &settings).await
        }
        Commands::Movie(args) => run_movie(&args, &settings).await,
        Commands::Link(args) => run_link(&args, &settings),
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(dir, &settings),
            ConfigSubcommands::Init { force } => run_config_init(dir, force),
        },
        Commands::Completions(_) => Ok(()),
    }
}

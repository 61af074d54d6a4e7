use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use auth::TokenService;
use runtime::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// MediVault Server - healthcare appointments and medical document vault
#[derive(Parser)]
#[command(name = "medivault-server")]
#[command(about = "MediVault Server - healthcare appointments and medical document vault")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database and a stub object store
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging(&logging_config, Path::new("."));
    tracing::info!("MediVault Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Stub object store for `--mock` runs: hands out non-functional URLs so the
/// REST flow can be exercised without bucket credentials.
struct MockDocumentStore;

#[async_trait]
impl documents::domain::ports::DocumentStore for MockDocumentStore {
    async fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        _ttl: Duration,
    ) -> anyhow::Result<documents::domain::ports::PresignedUpload> {
        Ok(documents::domain::ports::PresignedUpload {
            url: format!("https://mock.storage.invalid/{key}"),
        })
    }
}

async fn connect_database(config: &AppConfig, args: &CliArgs) -> Result<DatabaseConnection> {
    let dsn = if args.mock {
        "sqlite::memory:".to_string()
    } else {
        let dsn = config.database.url.trim().to_string();
        if dsn.is_empty() {
            return Err(anyhow!("Database URL not configured"));
        }
        dsn
    };

    let mut opts = ConnectOptions::new(dsn.clone());
    if let Some(max_conns) = config.database.max_conns {
        opts.max_connections(max_conns);
    }
    opts.acquire_timeout(Duration::from_secs(5));

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts).await?;

    accounts::infra::storage::migrations::Migrator::up(&db, None).await?;
    appointments::infra::storage::migrations::Migrator::up(&db, None).await?;
    documents::infra::storage::migrations::Migrator::up(&db, None).await?;

    Ok(db)
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    if !args.mock && config.auth.secret == "dev-only-secret" {
        tracing::warn!("Running with the default signing secret; override auth.secret");
    }

    let db = connect_database(&config, &args).await?;

    let tokens = Arc::new(TokenService::new(
        config.auth.secret.as_bytes(),
        config.auth.access_ttl,
        config.auth.refresh_ttl,
    ));

    let accounts_svc = Arc::new(accounts::domain::service::Service::new(
        db.clone(),
        tokens.clone(),
        accounts::domain::service::ServiceConfig::default(),
    ));
    let accounts_client = Arc::new(accounts::gateways::local::AccountsLocalClient::new(
        accounts_svc.clone(),
    ));

    let appointments_svc = Arc::new(appointments::domain::service::Service::new(
        db.clone(),
        accounts_client.clone(),
    ));

    let store: Arc<dyn documents::domain::ports::DocumentStore> = if args.mock {
        tracing::warn!("Using stub object store; upload URLs are not functional");
        Arc::new(MockDocumentStore)
    } else {
        Arc::new(
            documents::infra::s3::S3DocumentStore::connect(
                &config.storage.bucket,
                &config.storage.region,
                config.storage.endpoint.as_deref(),
            )
            .await,
        )
    };
    let documents_svc = Arc::new(documents::domain::service::Service::new(
        db,
        store,
        accounts_client,
        documents::domain::service::ServiceConfig {
            upload_url_ttl: config.storage.upload_url_ttl,
        },
    ));

    let app = accounts::api::rest::routes::router(accounts_svc)
        .nest(
            "/appointments",
            appointments::api::rest::routes::router(appointments_svc),
        )
        .nest(
            "/documents",
            documents::api::rest::routes::router(documents_svc),
        )
        .layer(axum::Extension(tokens))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout_sec.max(1),
        )))
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}

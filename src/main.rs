//! Student records service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use student_records::api::{create_router, AppState};
use student_records::config::{Config, StorageBackend};
use student_records::metrics;
use student_records::seed::{seed_if_empty, SeedOutcome};
use student_records::store::{MemoryStore, MongoStore, StudentStore};
use student_records::utils::shutdown_signal;

/// CRUD HTTP service for student records.
#[derive(Parser, Debug)]
#[command(name = "student-records")]
#[command(about = "CRUD HTTP service for student records backed by MongoDB")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage backend: mongo or memory (overrides STORAGE).
    #[arg(long)]
    storage: Option<StorageBackend>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Storage backend: mongo or memory (overrides STORAGE).
        #[arg(long)]
        storage: Option<StorageBackend>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Connect to MongoDB, seed if empty, and exit.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("student_records=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Seed) => cmd_seed().await,
        Some(Command::Serve { port, storage }) => cmd_serve(port, storage).await,
        None => cmd_serve(args.port, args.storage).await,
    }
}

/// Load and validate configuration.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("STUDENT RECORDS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Storage: {}", config.storage);
    if config.storage == StorageBackend::Mongo {
        println!("  MongoDB URI: {}", config.mongodb_uri);
        println!("  Database: {}", config.database_name);
    }
    println!("  Seed on startup: {}", config.seed);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Connect to MongoDB and seed an empty collection.
async fn cmd_seed() -> anyhow::Result<()> {
    let config = load_config()?;
    let store = MongoStore::connect(&config.mongodb_uri, &config.database_name).await?;

    match seed_if_empty(&store).await? {
        SeedOutcome::Seeded(count) => println!("Seeded {} students", count),
        SeedOutcome::Skipped(existing) => {
            println!("Collection already holds {} students, nothing to do", existing)
        }
    }

    Ok(())
}

/// Open the configured store and run startup seeding.
///
/// A MongoDB connection failure is logged and the service still starts; its
/// requests then fail with storage errors.
async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn StudentStore>> {
    let (store, reachable) = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            let store: Arc<dyn StudentStore> = Arc::new(MemoryStore::new());
            (store, true)
        }
        StorageBackend::Mongo => {
            let mongo = MongoStore::open(&config.mongodb_uri, &config.database_name).await?;
            let reachable = match mongo.ping().await {
                Ok(()) => true,
                Err(e) => {
                    error!("MongoDB connection error: {}", e);
                    false
                }
            };
            let store: Arc<dyn StudentStore> = Arc::new(mongo);
            (store, reachable)
        }
    };

    if reachable && config.seed {
        if let Err(e) = seed_if_empty(store.as_ref()).await {
            error!("Error initializing database: {}", e);
        }
    } else if !reachable {
        warn!("Skipping sample data initialization");
    }

    Ok(store)
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(
    port_override: Option<u16>,
    storage_override: Option<StorageBackend>,
) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if let Some(storage) = storage_override {
        config.storage = storage;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Storage backend: {}", config.storage);

    // Initialize metrics
    let prometheus = PrometheusBuilder::new().install_recorder()?;
    metrics::init_metrics();

    let store = open_store(&config).await?;
    let app_state = AppState::new(store).with_metrics(prometheus);

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on port {}", config.port);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use clinic_api::infra::storage::migrations::Migrator;

mod http;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_TIMEOUT_SEC: u64 = 30;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Detect DB backend from URL scheme (sqlite/mysql).
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim().to_owned();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(&raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "mysql" | "mariadb" => Ok("mysql"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Clinic Server - clinic management backend
#[derive(Parser)]
#[command(name = "clinic-server")]
#[command(about = "Clinic Server - clinic management backend")]
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

    /// Use an in-memory database
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

    if let Some(path) = cli.config.as_deref() {
        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }
    }

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    match config.logging.as_ref() {
        Some(logging_config) => runtime::logging::init_logging_from_config(
            logging_config,
            Path::new(&config.server.home_dir),
        ),
        None => runtime::logging::init_default_logging(),
    }
    tracing::info!("Clinic Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config),
    }
}

async fn connect_database(config: &AppConfig, args: &CliArgs) -> Result<DatabaseConnection> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("No database configuration found"))?;

    let backend = if args.mock {
        "sqlite"
    } else {
        detect_from_dsn(&db_config)?
    };

    let config_dsn = db_config.url.trim().to_owned();
    let mut final_dsn = if args.mock {
        "sqlite::memory:".to_string()
    } else {
        config_dsn
    };

    // Absolutize sqlite DSNs to avoid cwd issues
    if final_dsn.starts_with("sqlite://") {
        let base_dir = PathBuf::from(&config.server.home_dir);
        final_dsn = absolutize_sqlite_dsn(&final_dsn, &base_dir, true)?;
    }

    tracing::info!("Connecting to database: {}", final_dsn);

    if backend == "sqlite" {
        return connect_sqlite(&final_dsn, &db_config).await;
    }

    let mut opts = ConnectOptions::new(final_dsn.clone());
    if let Some(max_conns) = db_config.max_conns {
        opts.max_connections(max_conns);
    }
    opts.acquire_timeout(Duration::from_secs(5));

    let db = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database: {}", final_dsn))?;

    Ok(db)
}

/// SQLite pools are built through sqlx directly so the busy timeout is set
/// per connection (PRAGMA busy_timeout is connection-local).
async fn connect_sqlite(dsn: &str, db_config: &DatabaseConfig) -> Result<DatabaseConnection> {
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    let mut opts = SqliteConnectOptions::from_str(dsn)
        .with_context(|| format!("Invalid sqlite DSN: {}", dsn))?
        .create_if_missing(true);
    if let Some(ms) = db_config.busy_timeout_ms {
        opts = opts.busy_timeout(Duration::from_millis(ms as u64));
    }

    let mut pool_opts = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
    if let Some(max_conns) = db_config.max_conns {
        pool_opts = pool_opts.max_connections(max_conns);
    }

    let pool = pool_opts
        .connect_with(opts)
        .await
        .with_context(|| format!("Failed to connect to database: {}", dsn))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let db = connect_database(&config, &args).await?;

    tracing::info!("Applying pending migrations");
    Migrator::up(&db, None)
        .await
        .context("Failed to apply database migrations")?;

    let services = clinic_api::build_services(db);
    let router = clinic_api::api::rest::routes::router(services);

    let timeout = match config.server.timeout_sec {
        0 => Duration::from_secs(DEFAULT_TIMEOUT_SEC),
        secs => Duration::from_secs(secs),
    };
    let app = http::apply_middleware(router, timeout);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Clinic Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db_config) = &config.database {
        detect_from_dsn(db_config)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_keeps_memory_dsn() {
        let out = absolutize_sqlite_dsn("sqlite::memory:", Path::new("/base"), false).unwrap();
        assert_eq!(out, "sqlite::memory:");

        let out = absolutize_sqlite_dsn("sqlite://:memory:", Path::new("/base"), false).unwrap();
        assert_eq!(out, "sqlite::memory:");
    }

    #[test]
    fn absolutize_joins_relative_paths() {
        let out = absolutize_sqlite_dsn("sqlite://clinic.db", Path::new("/base"), false).unwrap();
        assert_eq!(out, "sqlite:///base/clinic.db");
    }

    #[test]
    fn absolutize_preserves_query_string() {
        let out = absolutize_sqlite_dsn("sqlite://clinic.db?mode=rwc", Path::new("/base"), false)
            .unwrap();
        assert_eq!(out, "sqlite:///base/clinic.db?mode=rwc");
    }

    #[test]
    fn absolutize_rejects_other_schemes() {
        assert!(absolutize_sqlite_dsn("mysql://host/db", Path::new("/base"), false).is_err());
    }

    #[tokio::test]
    async fn sqlite_busy_timeout_is_applied_per_connection() {
        use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

        let cfg = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_conns: Some(1),
            busy_timeout_ms: Some(1234),
        };

        let db = connect_sqlite("sqlite::memory:", &cfg).await.unwrap();
        let row = db
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "PRAGMA busy_timeout".to_owned(),
            ))
            .await
            .unwrap()
            .expect("pragma row");

        let timeout: i64 = row.try_get("", "timeout").unwrap();
        assert_eq!(timeout, 1234);
    }

    #[test]
    fn detect_backend_from_dsn() {
        let cfg = |url: &str| DatabaseConfig {
            url: url.to_string(),
            max_conns: None,
            busy_timeout_ms: None,
        };

        assert_eq!(detect_from_dsn(&cfg("sqlite://clinic.db")).unwrap(), "sqlite");
        assert_eq!(detect_from_dsn(&cfg("mysql://u:p@h/db")).unwrap(), "mysql");
        assert!(detect_from_dsn(&cfg("postgres://h/db")).is_err());
        assert!(detect_from_dsn(&cfg("")).is_err());
    }
}

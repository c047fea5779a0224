use anyhow::Result;
use callcenter_sqlite::Db;
use clap::{Parser, Subcommand};
use commands::{ExportKind, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod pipeline;

#[derive(Debug, Parser)]
#[command(name = "callcenter-setup", about = "Provision the call-center demo database")]
struct Cli {
    /// YAML config file (defaults to ./callcenter.yaml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// SQLite database file (overrides the config file)
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,
    /// Without a subcommand the full setup runs
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Dashboard counters over the loaded data
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Per-user call count and average duration
    Analytics {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List stored call logs
    Calls {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check an email/password pair against the auth users table
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a login account; an existing email is refused
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Write call logs or per-user analytics to a CSV file
    Export {
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportKind::Calls)]
        kind: ExportKind,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Opens the provisioned store, runs `f` and closes the store again.
fn with_db<T>(database: &std::path::Path, f: impl FnOnce(&mut Db) -> Result<T>) -> Result<T> {
    let mut db = commands::open_initialised(database)?;
    let res = f(&mut db)?;
    db.close()?;
    Ok(res)
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let loaded_cfg = config::load_config(cli.config.as_deref())?;
    let settings = config::Settings::resolve(loaded_cfg, cli.db);
    let mut out = std::io::stdout();

    let Some(command) = cli.command else {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(pipeline::run_setup(&settings, &mut out))?;
        return Ok(ExitCode::SUCCESS);
    };

    let db_path = settings.database.as_path();
    let accepted = match command {
        Commands::Version => {
            println!("callcenter-setup {} (core {})", env!("CARGO_PKG_VERSION"), callcenter_core::version());
            true
        }
        Commands::Stats { format } => with_db(db_path, |db| commands::stats(db, format, &mut out).map(|_| true))?,
        Commands::Analytics { format } => {
            with_db(db_path, |db| commands::analytics(db, format, &mut out).map(|_| true))?
        }
        Commands::Calls { format } => with_db(db_path, |db| commands::calls(db, format, &mut out).map(|_| true))?,
        Commands::Login { email, password } => with_db(db_path, |db| commands::login(db, &email, &password, &mut out))?,
        Commands::Signup { name, email, password } => {
            with_db(db_path, |db| commands::signup(db, &name, &email, &password, &mut out))?
        }
        Commands::Export { out: path, kind } => {
            with_db(db_path, |db| commands::export(db, kind, &path, &mut out).map(|_| true))?
        }
    };
    Ok(if accepted { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

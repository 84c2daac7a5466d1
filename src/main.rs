use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use hrgate::api::permission::{AccessGate, PermissionStore};
use hrgate::api::service::{allowed_actions, check_path, visible_routes, RoleDirectory, RoleFixture};
use hrgate::api::session::StaticSessionProvider;
use hrgate::config::Config;
use hrgate::core::{
    Actor, ErrorCode, HrGateError, HrGateResult, Permission, PublicError, ToPublicError,
};
use hrgate::utils::logging;

#[derive(Parser)]
#[clap(version = "0.1.0", author = "HRGate Contributors")]
struct Cli {
    /// Path to the configuration file
    #[clap(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Write logs to the file configured in `[log]` instead of stderr
    #[clap(long, global = true)]
    log_file: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an access gate for an actor
    Check {
        #[clap(flatten)]
        session: SessionArgs,
        /// Require every listed permission instead of any one of them
        #[clap(long)]
        require_all: bool,
        /// Required permission tokens
        permissions: Vec<String>,
    },
    /// Print the actor's effective permission set
    Permissions {
        #[clap(flatten)]
        session: SessionArgs,
        /// Emit JSON instead of plain text
        #[clap(long)]
        json: bool,
    },
    /// Print the dashboard navigation visible to the actor
    Nav {
        #[clap(flatten)]
        session: SessionArgs,
        /// Also check whether the actor may open this path
        #[clap(long)]
        path: Option<String>,
    },
}

#[derive(Args)]
struct SessionArgs {
    /// Role fixture file (TOML)
    #[clap(short, long)]
    fixture: String,
    /// Signed-in actor id; omit for an anonymous session
    #[clap(short, long)]
    actor: Option<String>,
}

fn load_directory(path: impl AsRef<Path>) -> HrGateResult<RoleDirectory> {
    Ok(RoleFixture::load(path)?.into_directory()?)
}

async fn resolve_store(config: &Config, args: &SessionArgs) -> Result<PermissionStore> {
    let directory = load_directory(&args.fixture)
        .with_context(|| format!("Failed to load role fixture {}", args.fixture))?;

    let session = match &args.actor {
        Some(id) => StaticSessionProvider::signed_in(Actor::new(id.as_str())),
        None => StaticSessionProvider::anonymous(),
    };

    let store = PermissionStore::new(Arc::new(session), Arc::new(directory), &config.auth);
    store.initialize().await;
    Ok(store)
}

fn parse_permissions(tokens: &[String]) -> HrGateResult<Vec<Permission>> {
    tokens
        .iter()
        .map(|token| Permission::from_str(token).map_err(HrGateError::from))
        .collect()
}

fn init_logging(to_file: bool, config: &Config) -> Result<(), flexi_logger::FlexiLoggerError> {
    if to_file {
        logging::init(config)
    } else {
        logging::init_stderr(&config.log.level)
    }
}

async fn start(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)
        .map_err(HrGateError::from)
        .with_context(|| format!("Failed to load config {}", cli.config))?;
    init_logging(cli.log_file, &config).context("Failed to initialize logging")?;

    run(cli.command, &config).await
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Check {
            session,
            require_all,
            permissions,
        } => {
            let required = parse_permissions(&permissions).context("Invalid permission")?;
            let store = resolve_store(config, &session).await?;
            let gate = AccessGate::new(required, require_all);
            let decision = gate.evaluate(&store);
            println!("{}", decision.as_str().to_uppercase());
        }
        Command::Permissions { session, json } => {
            let store = resolve_store(config, &session).await?;
            let permissions = store.permissions();
            let quarantined = store.quarantined();

            if json {
                let output = serde_json::json!({
                    "actor": store.actor().map(|a| a.id.to_string()),
                    "outcome": store.outcome().map(|o| o.as_str()),
                    "permissions": permissions,
                    "quarantined": quarantined,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for permission in &permissions {
                    println!("{}", permission);
                }
                for token in &quarantined {
                    println!("quarantined: {}", token);
                }
            }
        }
        Command::Nav { session, path } => {
            let store = resolve_store(config, &session).await?;
            for route in visible_routes(&store) {
                println!("{:<12} {}", route.title, route.href);
            }
            for action in allowed_actions(&store) {
                println!("action: {}", action);
            }
            if let Some(path) = path {
                println!("{} -> {}", path, check_path(&store, &path));
            }
        }
    }

    Ok(())
}

/// 输出过滤后的错误并映射为退出码
fn report(err: &anyhow::Error) -> ExitCode {
    let public = err
        .downcast_ref::<HrGateError>()
        .map(ToPublicError::to_public_error)
        .unwrap_or_else(|| PublicError::with_default_message(ErrorCode::InternalError));

    log::error!("{:#}", err);
    eprintln!("Error: {}: {}", err, public);
    ExitCode::from(public.code.exit_code())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let code = match start(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    };
    logging::shutdown();

    code
}

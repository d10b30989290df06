use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use configs::AppConfig;
use dotenvy::dotenv;
use service::product::SeaOrmProductRepository;
use service::{ProductDetails, ProductId, ProductService};
use tracing::{error, info, warn};
use uuid::Uuid;

const USAGE: &str = "usage:
  products list
  products get <id>
  products create <name> <description> [price]
  products save <id> <name> <description> [price]
  products update <id> <name> <description> [price]
  products delete <id>";

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Get(ProductId),
    Create(ProductDetails),
    Save(ProductId, ProductDetails),
    Update(ProductId, ProductDetails),
    Delete(ProductId),
}

fn parse_id(raw: Option<&String>) -> anyhow::Result<ProductId> {
    let raw = raw.ok_or_else(|| anyhow!("missing <id>"))?;
    raw.parse::<ProductId>().with_context(|| format!("invalid id {raw:?}"))
}

fn parse_details(rest: &[String]) -> anyhow::Result<ProductDetails> {
    match rest {
        [name, description] => Ok(ProductDetails::new(name.as_str(), description.as_str(), None)),
        [name, description, price] => {
            let price = price.parse::<f64>().with_context(|| format!("invalid price {price:?}"))?;
            if !price.is_finite() {
                bail!("price must be a finite number");
            }
            Ok(ProductDetails::new(name.as_str(), description.as_str(), Some(price)))
        }
        _ => bail!("expected <name> <description> [price]"),
    }
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let (cmd, rest) = args.split_first().ok_or_else(|| anyhow!("missing command"))?;
    let cmd = match (cmd.as_str(), rest) {
        ("list", []) => Command::List,
        ("get", [_]) => Command::Get(parse_id(rest.first())?),
        ("delete", [_]) => Command::Delete(parse_id(rest.first())?),
        ("create", details) => Command::Create(parse_details(details)?),
        ("save", [_, details @ ..]) => Command::Save(parse_id(rest.first())?, parse_details(details)?),
        ("update", [_, details @ ..]) => Command::Update(parse_id(rest.first())?, parse_details(details)?),
        (other, _) => bail!("unrecognised arguments for {other:?}"),
    };
    Ok(cmd)
}

/// Config file first; without one, fall back to the environment.
fn load_config() -> anyhow::Result<(AppConfig, &'static str)> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok((cfg, "file")),
        Err(e) if e.downcast_ref::<std::io::Error>().is_some() => Ok((AppConfig::from_env()?, "env")),
        Err(e) => Err(e.context("invalid configuration file")),
    }
}

async fn run(cmd: Command, cfg: &AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::ensure_schema(&db).await?;
    let svc = ProductService::new(Arc::new(SeaOrmProductRepository::new(db)));

    let out = match cmd {
        Command::List => serde_json::to_string_pretty(&svc.list().await?)?,
        Command::Get(id) => serde_json::to_string_pretty(&svc.get(id).await?)?,
        Command::Create(details) => serde_json::to_string_pretty(&svc.save(None, details).await?)?,
        Command::Save(id, details) => serde_json::to_string_pretty(&svc.save(Some(id), details).await?)?,
        Command::Update(id, details) => serde_json::to_string_pretty(&svc.update(id, details).await?)?,
        Command::Delete(id) => {
            svc.delete(id).await?;
            serde_json::to_string_pretty(&serde_json::json!({ "deleted": id }))?
        }
    };
    println!("{}", out);
    Ok(())
}

fn main() -> ExitCode {
    // Load .env early so DATABASE_URL / RUST_LOG take effect
    dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmd = match parse_args(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let (cfg, source) = match load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_from_settings(cfg.logging.json, &cfg.logging.filter);

    let invocation_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "products", event = "panic", %invocation_id, message = %info, "unhandled panic occurred");
    }));

    info!(service = "products", event = "start", %invocation_id, version, config_source = source, command = ?cmd, "products command starting");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "products", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cmd, &cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<service::ServiceError>() {
                Some(se) if se.is_not_found() => warn!(service = "products", event = "not_found", %invocation_id, code = se.code(), "{se}"),
                _ => error!(service = "products", event = "run_failed", %invocation_id, error = %e, "command failed"),
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

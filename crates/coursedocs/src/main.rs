use anyhow::Result;
use clap::{Parser, Subcommand};
use coursedocs_core::{Error, MappingSource};
use coursedocs_local::load_resolver;
use coursedocs_local::remote::RemoteSource;
use coursedocs_local::seed::{topics_by_category, StaticSource};
use coursedocs_local::viewer::{view, ViewRequest};

#[derive(Parser, Debug)]
#[command(name = "coursedocs")]
#[command(about = "Course-material mapping/resolution plumbing (JSON output)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all mappings plus the topic roster grouped by category.
    List(ListCmd),
    /// Resolve a (topic, category) selection to its mapping and preview URL.
    Resolve(SelectCmd),
    /// Full pipeline: resolve, normalize, and emit the sandboxed embed info.
    View(SelectCmd),
    /// Diagnose configuration issues (json; no network, no secrets).
    Doctor(DoctorCmd),
    /// Print version info.
    Version,
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// Mapping source. Allowed: static, remote
    #[arg(long, default_value = "static")]
    source: String,
    /// Remote endpoint returning a JSON array of mappings
    /// (overrides COURSEDOCS_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ListCmd {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(clap::Args, Debug)]
struct SelectCmd {
    #[command(flatten)]
    source: SourceArgs,
    /// Topic name, matched exactly (case-sensitive).
    #[arg(long)]
    topic: String,
    /// Category tag, matched exactly (e.g. theory, practical).
    #[arg(long)]
    category: String,
}

#[derive(clap::Args, Debug)]
struct DoctorCmd {
    /// Endpoint to validate instead of COURSEDOCS_ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug)]
enum ErrorCode {
    InvalidParams,
    InvalidUrl,
    InvalidMapping,
    DuplicateMapping,
    SourceFailed,
    NotConfigured,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidParams => "invalid_params",
            ErrorCode::InvalidUrl => "invalid_url",
            ErrorCode::InvalidMapping => "invalid_mapping",
            ErrorCode::DuplicateMapping => "duplicate_mapping",
            ErrorCode::SourceFailed => "source_failed",
            ErrorCode::NotConfigured => "not_configured",
        }
    }
}

type CmdResult = std::result::Result<serde_json::Value, (ErrorCode, String)>;

fn from_core(e: Error) -> (ErrorCode, String) {
    let code = match &e {
        Error::InvalidUrl(_) => ErrorCode::InvalidUrl,
        Error::InvalidMapping(_) => ErrorCode::InvalidMapping,
        Error::DuplicateMapping(_) => ErrorCode::DuplicateMapping,
        Error::Source(_) => ErrorCode::SourceFailed,
        Error::NotConfigured(_) => ErrorCode::NotConfigured,
    };
    (code, e.to_string())
}

impl SourceArgs {
    fn build(&self) -> std::result::Result<Box<dyn MappingSource>, (ErrorCode, String)> {
        match self.source.trim() {
            "static" => Ok(Box::new(StaticSource)),
            "remote" => {
                let src = match &self.endpoint {
                    Some(e) => RemoteSource::new(e.clone()),
                    None => RemoteSource::from_env(),
                }
                .map_err(from_core)?;
                Ok(Box::new(src))
            }
            other => Err((
                ErrorCode::InvalidParams,
                format!("unknown source: {other} (allowed: static, remote)"),
            )),
        }
    }
}

async fn run_list(cmd: &ListCmd) -> CmdResult {
    let source = cmd.source.build()?;
    let resolver = load_resolver(source.as_ref()).await.map_err(from_core)?;
    Ok(serde_json::json!({
        "schema_version": 1,
        "ok": true,
        "source": source.name(),
        "count": resolver.len(),
        "topics_by_category": topics_by_category(resolver.mappings()),
        "mappings": resolver.mappings(),
    }))
}

async fn run_resolve(cmd: &SelectCmd) -> CmdResult {
    let source = cmd.source.build()?;
    let resolver = load_resolver(source.as_ref()).await.map_err(from_core)?;
    let request = serde_json::json!({ "topic": cmd.topic, "category": cmd.category });
    // Absence is a normal outcome, not an error: found=false with ok=true.
    match resolver.lookup(Some(&cmd.topic), Some(&cmd.category)) {
        Some(mapping) => Ok(serde_json::json!({
            "schema_version": 1,
            "ok": true,
            "source": source.name(),
            "request": request,
            "found": true,
            "mapping": mapping,
            "preview_url": coursedocs_local::drive::normalize_document_url(&mapping.source_url),
        })),
        None => Ok(serde_json::json!({
            "schema_version": 1,
            "ok": true,
            "source": source.name(),
            "request": request,
            "found": false,
        })),
    }
}

async fn run_view(cmd: &SelectCmd) -> CmdResult {
    let source = cmd.source.build()?;
    let resolver = load_resolver(source.as_ref()).await.map_err(from_core)?;
    let req = ViewRequest::new(cmd.topic.clone(), cmd.category.clone());
    let outcome = view(&resolver, &req);
    Ok(serde_json::json!({
        "schema_version": 1,
        "ok": true,
        "source": source.name(),
        "request": { "topic": cmd.topic, "category": cmd.category },
        "view": outcome,
    }))
}

async fn run_doctor(cmd: &DoctorCmd) -> CmdResult {
    let t0 = std::time::Instant::now();
    let endpoint = cmd
        .endpoint
        .clone()
        .or_else(|| std::env::var("COURSEDOCS_ENDPOINT").ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let endpoint_check = match &endpoint {
        Some(e) => match RemoteSource::new(e.clone()) {
            Ok(_) => serde_json::json!({
                "name": "endpoint_url_valid", "ok": true, "skipped": false, "error": null,
            }),
            Err(err) => serde_json::json!({
                "name": "endpoint_url_valid", "ok": false, "skipped": false,
                "error": err.to_string(),
            }),
        },
        None => serde_json::json!({
            "name": "endpoint_url_valid", "ok": true, "skipped": true, "error": null,
        }),
    };

    // The compiled-in seed must always assemble into a valid collection.
    let seed_check = match load_resolver(&StaticSource).await {
        Ok(r) => serde_json::json!({
            "name": "seed_resolver", "ok": true, "skipped": false,
            "count": r.len(), "error": null,
        }),
        Err(err) => serde_json::json!({
            "name": "seed_resolver", "ok": false, "skipped": false,
            "count": 0, "error": err.to_string(),
        }),
    };

    Ok(serde_json::json!({
        "schema_version": 1,
        "name": "coursedocs",
        "version": env!("CARGO_PKG_VERSION"),
        "elapsed_ms": t0.elapsed().as_millis() as u64,
        "default_source": "static",
        "configured": { "endpoint": endpoint.is_some() },
        "checks": [endpoint_check, seed_check],
    }))
}

fn run_version() -> CmdResult {
    Ok(serde_json::json!({
        "schema_version": 1,
        "name": "coursedocs",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // Diagnostics go to stderr so stdout stays a single JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let out = match &cli.command {
        Commands::List(cmd) => run_list(cmd).await,
        Commands::Resolve(cmd) => run_resolve(cmd).await,
        Commands::View(cmd) => run_view(cmd).await,
        Commands::Doctor(cmd) => run_doctor(cmd).await,
        Commands::Version => run_version(),
    };

    match out {
        Ok(v) => {
            println!("{}", serde_json::to_string_pretty(&v)?);
            Ok(())
        }
        Err((code, message)) => {
            let v = serde_json::json!({
                "schema_version": 1,
                "ok": false,
                "error": { "code": code.as_str(), "message": message },
            });
            println!("{}", serde_json::to_string_pretty(&v)?);
            std::process::exit(1);
        }
    }
}

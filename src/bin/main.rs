//! relnav CLI - Navigate schema relationships and preview nested records
//!
//! Usage:
//!   relnav objects [query] --schema <schema.json>
//!   relnav fields <object> [--mode <mode>] [--search <text>]
//!   relnav resolve <root> [--hop <field>]... --leaf <field>
//!   relnav preview <object> --path <dotted.path>... --records <records.json>
//!
//! Examples:
//!   relnav fields Account --mode parents
//!   relnav resolve Account --hop OwnerId --hop ManagerId --leaf Email
//!   relnav preview Account --path Name --path Contacts.Email

use clap::{Parser, Subcommand, ValueEnum};
use relnav::config::Settings;
use relnav::metadata::{SchemaMetadataProvider, StaticMetadataProvider};
use relnav::navigator::{ExpandOutcome, FilterMode, NavigatorController, PanelStack};
use relnav::path::DottedPath;
use relnav::preview::run_preview;
use relnav::query::StaticQueryExecutor;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "relnav")]
#[command(about = "relnav - Navigate schema relationships and build dotted field paths")]
#[command(version)]
struct Cli {
    /// Path to a relnav.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON schema document (overrides config)
    #[arg(short, long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List objects in the schema, optionally filtered by name
    Objects {
        /// Case-insensitive search text
        query: Option<String>,
    },

    /// Show the fields of an object as the navigator would
    Fields {
        /// Object API name
        object: String,

        /// Which kinds of fields to show
        #[arg(short, long, default_value = "all")]
        mode: ModeArg,

        /// Only show fields whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Walk relationships from a root object and print the resulting path
    Resolve {
        /// Root object API name
        root: String,

        /// Relationship field to expand, in order (repeatable)
        #[arg(long = "hop")]
        hops: Vec<String>,

        /// Field to select on the last panel
        #[arg(long)]
        leaf: String,

        /// Print navigator events as JSON lines
        #[arg(long)]
        events: bool,
    },

    /// Preview records for an object along one or more dotted paths
    Preview {
        /// Object API name
        object: String,

        /// Dotted path to show as a column (repeatable)
        #[arg(short, long = "path", required = true)]
        paths: Vec<String>,

        /// Path to the JSON records document (overrides config)
        #[arg(short, long)]
        records: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Plain fields and lookups
    All,
    /// Lookups only
    Parents,
    /// Child relationships only
    Children,
}

impl From<ModeArg> for FilterMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::All => FilterMode::All,
            ModeArg::Parents => FilterMode::ParentsOnly,
            ModeArg::Children => FilterMode::ChildrenOnly,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relnav=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Objects { query } => {
            let Some(provider) = load_provider(cli.schema, &settings) else {
                return ExitCode::FAILURE;
            };
            cmd_objects(&provider, query).await
        }
        Commands::Fields {
            object,
            mode,
            search,
        } => {
            let Some(provider) = load_provider(cli.schema, &settings) else {
                return ExitCode::FAILURE;
            };
            cmd_fields(&provider, &object, mode, search).await
        }
        Commands::Resolve {
            root,
            hops,
            leaf,
            events,
        } => {
            let Some(provider) = load_provider(cli.schema, &settings) else {
                return ExitCode::FAILURE;
            };
            cmd_resolve(provider, &settings, &root, &hops, &leaf, events).await
        }
        Commands::Preview {
            object,
            paths,
            records,
        } => cmd_preview(&settings, &object, &paths, records).await,
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, relnav::config::SettingsError> {
    match path {
        Some(p) => Settings::from_file(p),
        None => Settings::load(),
    }
}

fn load_provider(cli_path: Option<PathBuf>, settings: &Settings) -> Option<StaticMetadataProvider> {
    let path = match cli_path {
        Some(p) => p,
        None => match settings.schema_path() {
            Ok(Some(p)) => p,
            Ok(None) => {
                eprintln!("No schema document: pass --schema or set metadata.schema_path");
                return None;
            }
            Err(e) => {
                eprintln!("Config error: {}", e);
                return None;
            }
        },
    };

    match StaticMetadataProvider::from_file(&path) {
        Ok(provider) => Some(provider),
        Err(e) => {
            eprintln!("Error loading schema '{}': {}", path.display(), e);
            None
        }
    }
}

async fn cmd_objects(provider: &StaticMetadataProvider, query: Option<String>) -> ExitCode {
    let result = match &query {
        Some(q) => provider.search_objects(q).await,
        None => provider.list_objects().await,
    };

    match result {
        Ok(objects) => {
            if objects.is_empty() {
                println!("No objects found.");
            }
            for obj in objects {
                println!("  - {} ({})", obj.name, obj.label);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Metadata error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_fields(
    provider: &StaticMetadataProvider,
    object: &str,
    mode: ModeArg,
    search: Option<String>,
) -> ExitCode {
    let mut stack = PanelStack::new();
    if let Err(e) = stack.open(provider, object).await {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let applied = stack.set_filter_mode(0, mode.into()).and_then(|_| match &search {
        Some(text) => stack.set_search_text(0, text),
        None => Ok(()),
    });
    if let Err(e) = applied {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let fields = match stack.visible_fields(0) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Object: {}", object);
    println!();
    if fields.is_empty() {
        println!("No fields match.");
    }
    for field in fields {
        match field.target_object() {
            Some(target) => println!("  - {} -> {} [{:?}]", field.name, target, field.kind),
            None => println!("  - {}", field.name),
        }
    }

    ExitCode::SUCCESS
}

async fn cmd_resolve(
    provider: StaticMetadataProvider,
    settings: &Settings,
    root: &str,
    hops: &[String],
    leaf: &str,
    print_events: bool,
) -> ExitCode {
    let (nav, mut events) =
        NavigatorController::with_max_depth(Arc::new(provider), settings.navigator.max_depth);

    let result = walk(&nav, root, hops, leaf).await;

    if print_events {
        while let Ok(event) = events.try_recv() {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => eprintln!("Error encoding event: {}", e),
            }
        }
    }

    match result {
        Ok(path) => {
            if !print_events {
                println!("{}", path);
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn walk(
    nav: &NavigatorController<StaticMetadataProvider>,
    root: &str,
    hops: &[String],
    leaf: &str,
) -> Result<DottedPath, String> {
    nav.open(root).await.map_err(|e| e.to_string())?;

    for (depth, hop) in hops.iter().enumerate() {
        match nav.expand(depth, hop).await.map_err(|e| e.to_string())? {
            ExpandOutcome::Expanded { .. } => {}
            ExpandOutcome::NotNavigable => {
                return Err(format!("field '{}' is not a relationship", hop));
            }
            ExpandOutcome::Stale => {
                return Err(format!("expanding '{}' was superseded", hop));
            }
        }
    }

    nav.select(hops.len(), leaf).await.map_err(|e| e.to_string())
}

async fn cmd_preview(
    settings: &Settings,
    object: &str,
    raw_paths: &[String],
    records: Option<PathBuf>,
) -> ExitCode {
    let paths = match raw_paths
        .iter()
        .map(|p| DottedPath::parse(p))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid path: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let records_path = match records {
        Some(p) => p,
        None => match settings.records_path() {
            Ok(Some(p)) => p,
            Ok(None) => {
                eprintln!("No records document: pass --records or set preview.records_path");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("Config error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let executor = match StaticQueryExecutor::from_file(&records_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error loading records '{}': {}", records_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match run_preview(&executor, object, &paths, &settings.preview_options()).await {
        Ok(table) => {
            if table.is_empty() {
                println!("No records.");
            } else {
                print!("{}", table);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Query error: {}", e);
            ExitCode::FAILURE
        }
    }
}

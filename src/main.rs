use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Map, Value};
use shotbuddy::{AssetKind, Config, Workspace};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shotbuddy",
    version,
    about = "Versioned shot assets for creative production projects"
)]
struct Cli {
    /// Directory holding projects.json (current project, recent list, settings)
    #[arg(long, global = true, env = "SHOTBUDDY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Shared thumbnail cache directory
    #[arg(long, global = true, env = "SHOTBUDDY_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project folder and make it current
    CreateProject { parent: PathBuf, name: String },

    /// Open an existing project (or a bare folder with shots/) and make it current
    Open { path: PathBuf },

    /// Show the current project
    Current,

    /// List recently opened projects
    Recent,

    /// List shots of the current project with their latest versions
    Shots,

    /// List the versions of one shot and asset type
    Versions { shot: String, kind: AssetKind },

    /// Create a shot. Without a name the next free number is used.
    NewShot {
        name: Option<String>,

        /// Insert after this shot instead of appending (use "" for the start)
        #[arg(long, conflicts_with = "name")]
        after: Option<String>,
    },

    /// Copy a file in as the next version of a shot
    Ingest {
        shot: String,
        kind: AssetKind,
        file: PathBuf,
    },

    /// Rename a shot and all of its files
    Rename { old: String, new: String },

    /// Delete one version of a shot
    DeleteVersion {
        shot: String,
        kind: AssetKind,
        version: u32,
    },

    /// Rebuild latest copies from the versioned files
    Reconcile,

    /// Remove cached thumbnails
    ClearCache {
        /// Only remove entries of this project name
        #[arg(long)]
        project: Option<String>,
    },

    /// Show settings, or merge KEY=JSON pairs into them
    Settings { pairs: Vec<String> },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            // Bad input gets its own exit code so scripts can tell it apart
            let user_error = err
                .downcast_ref::<shotbuddy::Error>()
                .is_some_and(shotbuddy::Error::is_user_error);
            if user_error {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.data_dir, cli.cache_dir);
    let workspace = Workspace::new(&config).context("failed to initialize workspace")?;

    match cli.cmd {
        Commands::CreateProject { parent, name } => print(&workspace.create_project(&parent, &name)?),
        Commands::Open { path } => print(&workspace.open_project(&path)?),
        Commands::Current => print(&workspace.current_project()?),
        Commands::Recent => print(&workspace.recent_projects()),
        Commands::Shots => print(&*workspace.shot_manager()?.get_shots()),
        Commands::Versions { shot, kind } => {
            print(&workspace.shot_manager()?.get_asset_versions(&shot, kind)?)
        }
        Commands::NewShot { name, after } => {
            let manager = workspace.shot_manager()?;
            let shot = match (name, after) {
                (Some(name), _) => manager.create_shot_structure(&name)?,
                (None, Some(after)) if after.trim().is_empty() => manager.create_shot_after(None)?,
                (None, Some(after)) => manager.create_shot_after(Some(&after))?,
                (None, None) => manager.create_next_shot()?,
            };
            print(&json!({ "name": shot }))
        }
        Commands::Ingest { shot, kind, file } => {
            let ingested = workspace.shot_manager()?.ingest_new_version(&shot, kind, &file)?;
            if !ingested.latest_synced {
                tracing::warn!("latest copy not updated, run `shotbuddy reconcile` to repair it");
            }
            print(&json!({
                "shot": ingested.shot,
                "kind": ingested.kind,
                "version": ingested.version,
                "path": ingested.path,
                "latest_synced": ingested.latest_synced,
            }))
        }
        Commands::Rename { old, new } => {
            let name = workspace.shot_manager()?.rename_shot(&old, &new)?;
            print(&json!({ "name": name }))
        }
        Commands::DeleteVersion { shot, kind, version } => {
            print(&workspace.shot_manager()?.delete_version(&shot, kind, version)?)
        }
        Commands::Reconcile => {
            let report: Vec<Value> = workspace
                .shot_manager()?
                .reconcile_all()?
                .into_iter()
                .map(|(shot, kind, outcome)| {
                    json!({ "shot": shot, "kind": kind, "outcome": format!("{outcome:?}") })
                })
                .collect();
            print(&report)
        }
        Commands::ClearCache { project } => {
            let removed = workspace.clear_thumbnails(project.as_deref())?;
            print(&json!({ "removed": removed }))
        }
        Commands::Settings { pairs } => {
            if pairs.is_empty() {
                print(&workspace.settings())
            } else {
                print(&workspace.update_settings(parse_pairs(&pairs)?)?)
            }
        }
    }
}

/// `key=value` where value is JSON, or a plain string when it isn't
fn parse_pairs(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut changes = Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("expected KEY=VALUE, got '{pair}'");
        };
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        changes.insert(key.trim().to_string(), value);
    }
    Ok(changes)
}

fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

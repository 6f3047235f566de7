//! `orgtree` — command-line editor for the organization chart.
//!
//! # Usage
//!
//! ```
//! orgtree --url http://localhost:8069 show
//! orgtree add root-1
//! orgtree edit node-1717171717171-1a2b3c4d --name "Dana Reyes" --position "Warehouse Lead"
//! orgtree remove node-1717171717171-1a2b3c4d
//! orgtree --config ~/.config/orgtree/config.toml import chart.json
//! ```

mod client;
mod editor;
mod outline;
mod sync;


use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use editor::{Editor, NodePatch, Removal};
use orgtree_core::OrgNode;
use serde::Deserialize;
use sync::SyncAdapter;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_URL: &str = "http://localhost:8069";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "orgtree", about = "Edit the organization chart")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the orgtree server (default: http://localhost:8069).
  #[arg(long, env = "ORGTREE_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "ORGTREE_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "ORGTREE_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the chart.
  Show {
    /// Print the raw JSON tree instead of an outline.
    #[arg(long)]
    json: bool,
  },
  /// Add a placeholder member under PARENT_ID and print its id.
  Add { parent_id: String },
  /// Change a member's details.
  Edit {
    id:          String,
    #[arg(long)]
    name:        Option<String>,
    #[arg(long)]
    position:    Option<String>,
    #[arg(long)]
    email:       Option<String>,
    #[arg(long)]
    phone:       Option<String>,
    #[arg(long)]
    user_id:     Option<i64>,
    #[arg(long)]
    position_id: Option<i64>,
  },
  /// Remove a member and everyone reporting to them. The root is reset
  /// instead.
  Remove { id: String },
  /// Replace the whole chart with the JSON tree in FILE.
  Import { file: PathBuf },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

/// CLI flags override config file, which overrides defaults.
fn resolve_config(args: &Args, file_cfg: &ConfigFile) -> ApiConfig {
  let pick = |flag: &Option<String>, file: &str| {
    flag
      .clone()
      .or_else(|| (!file.is_empty()).then(|| file.to_owned()))
  };
  ApiConfig {
    base_url: pick(&args.url, &file_cfg.url).unwrap_or_else(|| DEFAULT_URL.to_owned()),
    username: pick(&args.user, &file_cfg.username).unwrap_or_default(),
    password: pick(&args.password, &file_cfg.password).unwrap_or_default(),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let client = ApiClient::new(resolve_config(&args, &file_cfg))?;
  let mut editor = Editor::new(SyncAdapter::new(client));
  editor.load().await;

  match args.command {
    Command::Show { json } => {
      let tree = editor.tree();
      if json {
        println!("{}", serde_json::to_string_pretty(tree.as_ref())?);
      } else {
        print!("{}", outline::render(&tree));
      }
    }
    Command::Add { parent_id } => {
      let id = editor.add_member(&parent_id)?;
      save(&mut editor).await?;
      println!("{id}");
    }
    Command::Edit { id, name, position, email, phone, user_id, position_id } => {
      let patch = NodePatch { name, position, email, phone, user_id, position_id };
      if patch.is_empty() {
        bail!("nothing to change; pass at least one field flag");
      }
      editor.edit_member(&id, &patch)?;
      save(&mut editor).await?;
    }
    Command::Remove { id } => {
      if editor.remove_member(&id)? == Removal::RootReset {
        eprintln!("{id} is the root; its details were reset instead of removing it");
      }
      save(&mut editor).await?;
    }
    Command::Import { file } => {
      let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
      let tree: OrgNode = serde_json::from_str(&raw).context("parsing chart JSON")?;
      editor.replace_tree(tree)?;
      save(&mut editor).await?;
    }
  }

  Ok(())
}

async fn save(editor: &mut Editor) -> Result<()> {
  let outcome = editor.save().await;
  if !outcome.success {
    bail!(
      "{}",
      editor.notification().unwrap_or(sync::SAVE_FAILED)
    );
  }
  if let Some(message) = editor.notification() {
    eprintln!("{message}");
  }
  Ok(())
}

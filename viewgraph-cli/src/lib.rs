//! Argument handling and the load → freeze → render pipeline behind the
//! `viewgraph` binary.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use viewgraph_model::EntityGraph;
use viewgraph_render::project;
use viewgraph_schema::{AbsentPolicy, FrozenRegistry, SchemaDocument};

#[derive(Parser, Debug, Clone)]
#[command(name = "viewgraph")]
#[command(about = "Render entities through validated projection types")]
pub struct Args {
    /// Schema document (.toml or .json)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Entity graph document (.json)
    #[arg(short, long, required_unless_present = "check")]
    pub entities: Option<PathBuf>,

    /// Key of the entity to render
    #[arg(short, long, required_unless_present = "check")]
    pub root: Option<String>,

    /// Projection type to render it as
    #[arg(long, required_unless_present = "check")]
    pub view: Option<String>,

    /// Leave absent fields out instead of writing null
    #[arg(long)]
    pub omit_absent: bool,

    /// Indented output
    #[arg(long)]
    pub pretty: bool,

    /// Only validate the schema and list each type's depth
    #[arg(long)]
    pub check: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Loads and freezes the schema, applying command-line overrides.
pub fn load_registry(args: &Args) -> Result<FrozenRegistry> {
    let text = fs::read_to_string(&args.schema)
        .with_context(|| format!("reading schema {}", args.schema.display()))?;
    let mut doc = if is_json(&args.schema) {
        SchemaDocument::from_json(&text)?
    } else {
        SchemaDocument::from_toml(&text)?
    };
    if args.omit_absent {
        doc.render.absent = AbsentPolicy::Omit;
    }
    if args.pretty {
        doc.render.pretty = true;
    }
    let registry = doc
        .into_registry()
        .freeze()
        .context("projection schema is invalid")?;
    info!(types = registry.len(), "schema loaded");
    Ok(registry)
}

/// Runs the command and returns what it should print.
pub fn run(args: &Args) -> Result<String> {
    let registry = load_registry(args)?;
    if args.check {
        return Ok(describe(&registry));
    }

    let (Some(entities), Some(root), Some(view)) = (&args.entities, &args.root, &args.view)
    else {
        bail!("--entities, --root and --view are required unless --check is given");
    };
    let json = fs::read_to_string(entities)
        .with_context(|| format!("reading entities {}", entities.display()))?;
    let loaded = EntityGraph::from_json(&json)?;
    let handle = loaded
        .handle(root)
        .with_context(|| format!("no entity with key '{root}'"))?;

    info!(root = %root, view = %view, entities = loaded.graph.len(), "rendering");
    Ok(project(&registry, &loaded.graph, handle, view)?)
}

fn describe(registry: &FrozenRegistry) -> String {
    registry
        .type_names()
        .map(|name| format!("{name}\tdepth {}", registry.depth(name).unwrap_or(0)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

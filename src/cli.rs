use crate::config::{Config, load_config};
use crate::document::{DocumentMeta, convert_fused, convert_tree};
use crate::fusion::generate_fused_trees;
use crate::id::IdAllocator;
use crate::input::read_edges;
use crate::ir::{CrossTreeEdge, Direction, TreeDocument};
use crate::package::{
    DEPENDENCE_SUFFIX, TREE_SUFFIX, gmind_path_for, read_json_document, root_name_for,
    tree_path_for, write_gmind, write_tree_document,
};
use crate::tree::generate_tree;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "depmind",
    version,
    about = "Dependency edges to mind-map trees and GitMind documents"
)]
pub struct Args {
    /// Config JSON file (theme, layout offsets, document metadata)
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    /// Directory that receives every generated file
    #[arg(short = 'o', long = "out-dir", default_value = "./data", global = true)]
    pub out_dir: PathBuf,

    /// Seed for ids and document tokens; same seed and input, same output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log debug events to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build tree documents from one `*_dependence.json` file, or from two
    /// trees plus a fusion edge list
    Tree {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Render one `*_tree.json` file, or two trees plus their cross-tree
    /// edges, into `.gmind` containers
    Gmind {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Side the standalone maps fan out to (right or left)
        #[arg(short = 'd', long, default_value = "right", value_parser = parse_direction)]
        direction: Direction,
    },
}

fn parse_direction(token: &str) -> std::result::Result<Direction, String> {
    Direction::from_token(token).ok_or_else(|| format!("unknown direction '{token}'"))
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let config = load_config(args.config.as_deref())?;
    let mut ids = match args.seed {
        Some(seed) => IdAllocator::with_seed(seed),
        None => IdAllocator::new(),
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create {}", args.out_dir.display()))?;

    match &args.command {
        Command::Tree { files } => run_tree(files, &args.out_dir, &config, &mut ids),
        Command::Gmind { files, direction } => {
            run_gmind(files, *direction, &args.out_dir, &config, &mut ids)
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn check_inputs(files: &[PathBuf], suffix: &str) -> Result<()> {
    if !matches!(files.len(), 1 | 3) {
        bail!("only 1 or 3 input files are supported, got {}", files.len());
    }
    for (idx, path) in files.iter().enumerate() {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !name.ends_with(suffix) {
            bail!("arg {idx}: {} should end with '{suffix}'", path.display());
        }
        if !path.exists() {
            bail!("arg {idx}: file {} doesn't exist", path.display());
        }
    }
    Ok(())
}

fn run_tree(
    files: &[PathBuf],
    out_dir: &Path,
    config: &Config,
    ids: &mut IdAllocator,
) -> Result<()> {
    check_inputs(files, DEPENDENCE_SUFFIX)?;
    let edge_lists = files
        .iter()
        .map(|path| read_edges(path).with_context(|| format!("reading {}", path.display())))
        .collect::<Result<Vec<_>>>()?;
    let root_name = |path: &Path| {
        root_name_for(path).unwrap_or_else(|| config.tree.default_root_label.clone())
    };

    if let [edges] = edge_lists.as_slice() {
        let path = &files[0];
        let doc = generate_tree(edges, &root_name(path), ids)
            .with_context(|| format!("building tree from {}", path.display()))?;
        return write_tree(path, out_dir, &doc);
    }

    let [primary, secondary, fusion] = edge_lists.as_slice() else {
        bail!("expected three edge lists");
    };
    let primary_root = root_name(&files[0]);
    let secondary_root = root_name(&files[1]);
    let trees = generate_fused_trees(
        (primary, &primary_root),
        (secondary, &secondary_root),
        fusion,
        ids,
    )?;
    write_tree(&files[0], out_dir, &trees.primary)?;
    write_tree(&files[1], out_dir, &trees.secondary)?;
    write_tree(&files[2], out_dir, &trees.cross_edges)
}

fn write_tree(input: &Path, out_dir: &Path, doc: &impl serde::Serialize) -> Result<()> {
    let output = tree_path_for(input, out_dir)
        .with_context(|| format!("cannot derive output name from {}", input.display()))?;
    write_tree_document(&output, doc)?;
    info!(path = %output.display(), "wrote tree document");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    read_json_document(path).with_context(|| format!("reading {}", path.display()))
}

fn run_gmind(
    files: &[PathBuf],
    direction: Direction,
    out_dir: &Path,
    config: &Config,
    ids: &mut IdAllocator,
) -> Result<()> {
    check_inputs(files, TREE_SUFFIX)?;
    let tree_count = if files.len() == 1 { 1 } else { 2 };
    let trees = files[..tree_count]
        .iter()
        .map(|path| read_json::<TreeDocument>(path))
        .collect::<Result<Vec<_>>>()?;

    for (path, tree) in files.iter().zip(&trees) {
        let doc = convert_tree(tree, direction, DocumentMeta::generate(ids), config)
            .with_context(|| format!("laying out {}", path.display()))?;
        write_container(path, out_dir, &doc)?;
    }

    let [primary, secondary] = trees.as_slice() else {
        return Ok(());
    };
    let cross_edges: Vec<CrossTreeEdge> = read_json(&files[2])?;
    let composed = convert_fused(
        primary,
        secondary,
        &cross_edges,
        DocumentMeta::generate(ids),
        config,
    )?;
    write_container(&files[2], out_dir, &composed)
}

fn write_container(
    input: &Path,
    out_dir: &Path,
    doc: &crate::document::GitMindDocument,
) -> Result<()> {
    let output = gmind_path_for(input, out_dir)
        .with_context(|| format!("cannot derive output name from {}", input.display()))?;
    write_gmind(&output, doc)?;
    info!(path = %output.display(), "wrote gmind container");
    Ok(())
}

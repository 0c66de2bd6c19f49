#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod fusion;
pub mod graph;
pub mod id;
pub mod input;
pub mod ir;
pub mod layout;
pub mod package;
pub mod theme;
pub mod tree;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use document::{DocumentMeta, GitMindDocument, compose_documents, convert_fused, convert_tree};
pub use error::{DepmindError, Result};
pub use fusion::{FusedTrees, classify_cross_edges, generate_fused_trees};
pub use graph::DependencyGraph;
pub use id::IdAllocator;
pub use input::{parse_edges, read_edges};
pub use ir::{
    AdditionalEdge, CrossTreeEdge, DependencyEdge, Direction, NodeEntry, TreeDocument, TreeNode,
};
pub use layout::{MindmapLayout, compute_layout};
pub use theme::Theme;
pub use tree::{Extraction, Tree, VerticalOrder, extract_tree, generate_tree};

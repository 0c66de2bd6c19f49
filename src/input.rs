use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DepmindError, Result};
use crate::ir::DependencyEdge;

static FENCED_JSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[ \t]*(?:json5?|JSON5?)?[ \t]*\r?\n(.*?)```").unwrap()
});

/// Returns the body of the first fenced code block, or the whole text when
/// there is none. Model output usually wraps the payload in ```json.
pub fn extract_json_block(text: &str) -> &str {
    FENCED_JSON_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
        .unwrap_or(text)
}

/// Decodes an edge list. Accepts JSON5 (trailing commas, comments) and
/// rejects records with a blank endpoint.
pub fn parse_edges(text: &str) -> Result<Vec<DependencyEdge>> {
    let body = extract_json_block(text);
    let edges: Vec<DependencyEdge> =
        json5::from_str(body).map_err(|err| DepmindError::InvalidEdges(err.to_string()))?;
    if edges.is_empty() {
        return Err(DepmindError::EmptyEdgeList);
    }
    for (idx, edge) in edges.iter().enumerate() {
        if edge.source.trim().is_empty() || edge.target.trim().is_empty() {
            return Err(DepmindError::InvalidEdges(format!(
                "edge {idx} has an empty source or target"
            )));
        }
    }
    Ok(edges)
}

pub fn read_edges(path: &Path) -> Result<Vec<DependencyEdge>> {
    let contents = std::fs::read_to_string(path)?;
    parse_edges(&contents)
}

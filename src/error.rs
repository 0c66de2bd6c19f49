use thiserror::Error;

pub type Result<T> = std::result::Result<T, DepmindError>;

#[derive(Debug, Error)]
pub enum DepmindError {
    /// Every node has a predecessor, so there is no entry point to start from.
    #[error("can't find root in directed graph: every node has an incoming edge")]
    NoRoot,

    #[error("ids are not at the same tree level: '{first}' and '{second}'")]
    LevelMismatch { first: String, second: String },

    #[error("edge list is empty")]
    EmptyEdgeList,

    #[error("invalid edge list: {0}")]
    InvalidEdges(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to package document: {0}")]
    Package(String),
}

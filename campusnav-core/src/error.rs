use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Corridor graph has no nodes")]
    EmptyGraph,
    #[error("Invalid node index: {0}")]
    InvalidNodeIndex(usize),
    #[error("Invalid coordinate: lat {lat}, lng {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("Path contains no nodes")]
    EmptyPath,
    #[error("No edge between nodes {from} and {to}")]
    MissingEdge { from: usize, to: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Search budget exhausted after {expansions} node expansions")]
    SearchBudgetExhausted { expansions: usize },
}

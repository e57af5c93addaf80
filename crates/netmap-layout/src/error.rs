#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("alpha shape needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },
    #[error("no polygon encloses the {count} given points")]
    Degenerate { count: usize },
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Graph(#[from] GraphBuildError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("spreadsheet has no worksheet or no header row")]
    EmptyWorkbook,

    #[error("spreadsheet is missing the `{column}` column")]
    MissingColumn { column: &'static str },

    #[error("row {row}: `{column}` value {value:?} is not a valid {expected}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Row numbers are spreadsheet rows: the header is row 1, the first record row 2.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphBuildError {
    #[error("the table has no records")]
    Empty,

    #[error("duplicate ID {id:?} in rows {first_row} and {row}")]
    DuplicateId {
        id: String,
        first_row: usize,
        row: usize,
    },

    #[error("row {row}: parent {parent:?} of {id:?} is not an ID in the table")]
    UnknownParent {
        id: String,
        parent: String,
        row: usize,
    },

    #[error("row {row}: {id:?} is its own parent")]
    SelfParent { id: String, row: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

#![forbid(unsafe_code)]

//! Input side of `netmap`: loads the parent/child spreadsheet, normalizes it into
//! [`Record`]s and builds the undirected [`Network`] the renderer lays out.

pub mod config;
pub mod error;
pub mod loader;
pub mod network;
pub mod record;

pub use config::{FooterLink, LayoutAlgorithm, LevelPolicy, NetmapConfig};
pub use error::{ConfigError, Error, GraphBuildError, LoadError, Result};
pub use loader::{LoadOptions, RawTable, SheetSource, load_records, records_from_table};
pub use network::{Network, build_network};
pub use record::{Record, RecordIndex};

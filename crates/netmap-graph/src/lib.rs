#![forbid(unsafe_code)]

//! Graph container and community detection used by `netmap`.
//!
//! The container is small: undirected, simple (no parallel edges), string node
//! ids, insertion-ordered iteration. Layout and rendering live in other crates.

pub mod community;
mod graph;

pub use community::{Louvain, Partition, modularity};
pub use graph::{EdgeKey, Graph};

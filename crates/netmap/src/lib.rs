#![forbid(unsafe_code)]

//! `netmap` draws a hierarchical parent/child table as an interactive network map.
//!
//! The pipeline loads the spreadsheet, builds the undirected graph, lays it out, detects
//! communities and writes a standalone Plotly HTML page. Each stage lives in its own crate and
//! is re-exported here.

pub use netmap_core::*;

pub mod graph {
    pub use netmap_graph::{EdgeKey, Graph, Louvain, Partition, modularity};
}

pub mod layout {
    pub use netmap_layout::{
        Algorithm, CircularOptions, GeometryError, LayoutResult, Point, Polygon, SpringOptions,
        alpha_shape, convex_hull,
    };
}

pub mod render {
    pub use netmap_render::figure::{Figure, Scatter, Shape};
    pub use netmap_render::{
        RenderOptions, build_figure, layout_algorithm, layout_network, render_html, write_html,
    };
}

use netmap_layout::LayoutResult;
use netmap_render::{Figure, RenderOptions};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] netmap_core::Error),
    #[error(transparent)]
    Render(#[from] netmap_render::Error),
}

impl From<LoadError> for Error {
    fn from(value: LoadError) -> Self {
        Self::Core(value.into())
    }
}

impl From<GraphBuildError> for Error {
    fn from(value: GraphBuildError) -> Self {
        Self::Core(value.into())
    }
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        Self::Core(value.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Everything one run produces, kept for callers that want more than the HTML.
#[derive(Debug, Clone)]
pub struct NetworkMap {
    pub network: Network,
    pub layout: LayoutResult,
    pub figure: Figure,
    pub html: String,
}

/// Loads the configured spreadsheet and renders it. Nothing is written to disk.
pub fn render_network_map(cfg: &NetmapConfig) -> Result<NetworkMap> {
    cfg.validate()?;
    let source = cfg.sheet_source()?;
    let records = load_records(&source, &cfg.load_options())?;
    render_records(records, cfg)
}

/// Renders already loaded records with the layout and figure settings of `cfg`.
pub fn render_records(records: Vec<Record>, cfg: &NetmapConfig) -> Result<NetworkMap> {
    let network = build_network(records)?;
    let layout = netmap_render::layout_network(&network, netmap_render::layout_algorithm(cfg))?;
    tracing::debug!(
        algorithm = ?cfg.layout.algorithm,
        positions = layout.positions.len(),
        "layout finished"
    );
    let opts = RenderOptions::from_config(cfg);
    let figure = netmap_render::build_figure(&network, &layout, &opts)?;
    let html = netmap_render::render_html(&figure, &opts.plotly_cdn)?;
    tracing::debug!(bytes = html.len(), "page rendered");
    Ok(NetworkMap {
        network,
        layout,
        figure,
        html,
    })
}

/// Renders the map and writes it to `cfg.output.path`. The file is only touched once the whole
/// page has been built.
pub fn write_network_map(cfg: &NetmapConfig) -> Result<NetworkMap> {
    let map = render_network_map(cfg)?;
    netmap_render::write_html(&cfg.output.path, &map.html)?;
    tracing::info!(
        path = %cfg.output.path.display(),
        bytes = map.html.len(),
        "html written"
    );
    Ok(map)
}

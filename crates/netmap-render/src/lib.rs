#![forbid(unsafe_code)]

//! Turns a laid-out [`Network`] into a Plotly figure: edge lines, sized node markers,
//! per-level boundary outlines and toggleable community rectangles, serialized into a
//! standalone HTML page.

pub mod figure;
pub mod html;
pub mod overlay;
pub mod palette;
pub mod traces;

use chrono::{DateTime, Local};
use netmap_core::{FooterLink, LayoutAlgorithm, LevelPolicy, NetmapConfig, Network};
use netmap_graph::Louvain;
use netmap_layout::{
    Algorithm, CircularOptions, Edge, GeometryError, LayoutResult, Node, SpringOptions,
};

pub use figure::Figure;
pub use html::{render_html, write_html};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("level {level} boundary: {source}")]
    Geometry {
        level: i64,
        #[source]
        source: GeometryError,
    },
    #[error("node {id:?} has no layout position")]
    MissingPosition { id: String },
    #[error(transparent)]
    Layout(#[from] netmap_layout::Error),
    #[error("figure JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    /// Node drawn with `highlight_color` instead of `border_color`.
    pub highlight_node: Option<String>,
    pub highlight_color: String,
    pub border_color: String,
    /// Level boundary tightness; `0` draws convex hulls.
    pub alpha: f64,
    pub level_policy: LevelPolicy,
    pub footer_links: Vec<FooterLink>,
    pub community: Louvain,
    /// Timestamp shown in the footer. `None` uses the current local time.
    pub generated_at: Option<DateTime<Local>>,
    pub plotly_cdn: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&NetmapConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(cfg: &NetmapConfig) -> Self {
        let fig = &cfg.figure;
        Self {
            title: fig.title.clone(),
            highlight_node: fig.highlight_node.clone(),
            highlight_color: fig.highlight_color.clone(),
            border_color: fig.border_color.clone(),
            alpha: fig.alpha,
            level_policy: fig.on_degenerate_level,
            footer_links: fig.footer_links.clone(),
            community: Louvain {
                resolution: cfg.community.resolution,
                seed: cfg.community.seed,
            },
            generated_at: None,
            plotly_cdn: cfg.output.plotly_cdn.clone(),
        }
    }
}

/// Layout algorithm described by `cfg.layout`.
pub fn layout_algorithm(cfg: &NetmapConfig) -> Algorithm {
    match cfg.layout.algorithm {
        LayoutAlgorithm::Spring => Algorithm::Spring(SpringOptions {
            iterations: cfg.layout.iterations,
            k: cfg.layout.k,
            seed: cfg.layout.seed,
            ..Default::default()
        }),
        LayoutAlgorithm::Circular => Algorithm::Circular(CircularOptions::default()),
    }
}

/// Positions every node of `network`.
pub fn layout_network(network: &Network, algorithm: Algorithm) -> Result<LayoutResult> {
    let graph = netmap_layout::Graph {
        nodes: network.graph.nodes().map(Node::new).collect(),
        edges: network
            .graph
            .edges()
            .map(|e| Edge {
                id: format!("{}--{}", e.v, e.w),
                source: e.v.clone(),
                target: e.w.clone(),
            })
            .collect(),
    };
    Ok(netmap_layout::layout(&graph, algorithm)?)
}

/// Assembles the full figure for an already laid-out network.
pub fn build_figure(
    network: &Network,
    layout: &LayoutResult,
    opts: &RenderOptions,
) -> Result<Figure> {
    let edges = traces::edge_trace(&network.graph, layout)?;
    let nodes = traces::node_trace(network, layout, opts)?;
    let levels = traces::level_trace(network, layout, opts.alpha, opts.level_policy)?;

    let partition = opts.community.partition(&network.graph);
    tracing::info!(
        communities = partition.community_count(),
        "community partition computed"
    );
    let margin = overlay::margin(&nodes.sizes);
    let shapes = overlay::community_shapes(&partition, layout, margin)?;

    let generated_at = opts.generated_at.unwrap_or_else(Local::now);
    Ok(figure::assemble(
        [edges, nodes.trace, levels],
        shapes,
        &opts.title,
        &figure::footer_text(generated_at, &opts.footer_links),
    )?)
}

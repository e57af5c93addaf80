use crate::figure::{Color, ColorBar, ColorBarTitle, Line, Marker, Scatter};
use crate::{Error, RenderOptions, Result};
use netmap_core::{LevelPolicy, Network, Record};
use netmap_graph::Graph;
use netmap_layout::{LayoutResult, Point, alpha_shape};

pub struct NodeTrace {
    pub trace: Scatter,
    /// Marker size per node, in node order.
    pub sizes: Vec<f64>,
}

/// `round((value_num + 1) ^ 1.5)`, rounding half to even. Weights below `-1` size as zero.
pub fn marker_size(value_num: f64) -> f64 {
    (value_num + 1.0).max(0.0).powf(1.5).round_ties_even()
}

pub fn hover_text(record: &Record) -> String {
    format!("{} ({})<br>Level {}", record.id, record.value, record.level)
}

fn position(layout: &LayoutResult, id: &str) -> Result<Point> {
    layout
        .position(id)
        .ok_or_else(|| Error::MissingPosition { id: id.to_string() })
}

/// One `[start, end, gap]` triple per edge.
pub fn edge_trace(graph: &Graph, layout: &LayoutResult) -> Result<Scatter> {
    let mut x = Vec::with_capacity(graph.edge_count() * 3);
    let mut y = Vec::with_capacity(graph.edge_count() * 3);
    for edge in graph.edges() {
        let a = position(layout, &edge.v)?;
        let b = position(layout, &edge.w)?;
        x.extend([Some(a.x), Some(b.x), None]);
        y.extend([Some(a.y), Some(b.y), None]);
    }
    Ok(Scatter::lines(x, y, Line::new(1.5, "#888")))
}

pub fn node_trace(
    network: &Network,
    layout: &LayoutResult,
    opts: &RenderOptions,
) -> Result<NodeTrace> {
    let n = network.index.len();
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut sizes = Vec::with_capacity(n);
    let mut borders = Vec::with_capacity(n);
    let mut text = Vec::with_capacity(n);

    // Records are indexed in row order, which is also graph node order.
    for record in network.index.iter() {
        let p = position(layout, &record.id)?;
        x.push(Some(p.x));
        y.push(Some(p.y));
        sizes.push(marker_size(record.value_num));
        let highlighted = opts.highlight_node.as_deref() == Some(record.id.as_str());
        borders.push(if highlighted {
            opts.highlight_color.clone()
        } else {
            opts.border_color.clone()
        });
        text.push(hover_text(record));
    }

    let marker = Marker {
        showscale: true,
        colorscale: "YlGnBu",
        reversescale: true,
        color: sizes.clone(),
        size: sizes.clone(),
        colorbar: ColorBar {
            thickness: 15.0,
            title: ColorBarTitle {
                text: "node_size".to_string(),
                side: "right",
            },
            xanchor: "left",
        },
        line: Line {
            width: 2.0,
            color: Color::Each(borders),
        },
    };
    let trace = Scatter {
        kind: "scatter",
        x,
        y,
        mode: "markers",
        hoverinfo: "text",
        marker: Some(marker),
        text: Some(text),
        ..Default::default()
    };
    Ok(NodeTrace { trace, sizes })
}

/// Outlines every level from 1 up to, but not including, the deepest level.
pub fn level_trace(
    network: &Network,
    layout: &LayoutResult,
    alpha: f64,
    policy: LevelPolicy,
) -> Result<Scatter> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let max_level = network.index.max_level().unwrap_or(0);

    for level in 1..max_level {
        let points = network
            .index
            .ids_at_level(level)
            .map(|id| position(layout, id))
            .collect::<Result<Vec<Point>>>()?;
        let polygon = match alpha_shape(&points, alpha) {
            Ok(polygon) => polygon,
            Err(source) if policy == LevelPolicy::Skip => {
                tracing::warn!(level, error = %source, "skipping level boundary");
                continue;
            }
            Err(source) => return Err(Error::Geometry { level, source }),
        };
        for (a, b) in polygon.segments() {
            x.extend([Some(a.x), Some(b.x), None]);
            y.extend([Some(a.y), Some(b.y), None]);
        }
    }

    let mut trace = Scatter::lines(x, y, Line::new(0.5, "red"));
    trace.opacity = Some(0.4);
    Ok(trace)
}

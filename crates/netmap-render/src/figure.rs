//! Plotly figure model. Only the attributes the network map sets are modelled; everything
//! else is left to Plotly's defaults.

use chrono::{DateTime, Local};
use netmap_core::FooterLink;
use serde::Serialize;
use serde_json::json;

/// Trace order matters: the level toggle buttons restyle by index.
pub const EDGE_TRACE: usize = 0;
pub const NODE_TRACE: usize = 1;
pub const LEVEL_TRACE: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Scatter>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Scatter {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `None` breaks a line between segments.
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub mode: &'static str,
    pub hoverinfo: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Scatter {
    pub fn lines(x: Vec<Option<f64>>, y: Vec<Option<f64>>, line: Line) -> Self {
        Self {
            kind: "scatter",
            x,
            y,
            mode: "lines",
            hoverinfo: "none",
            line: Some(line),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Color {
    One(String),
    Each(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub width: f64,
    pub color: Color,
}

impl Line {
    pub fn new(width: f64, color: impl Into<String>) -> Self {
        Self {
            width,
            color: Color::One(color.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub showscale: bool,
    pub colorscale: &'static str,
    pub reversescale: bool,
    pub color: Vec<f64>,
    pub size: Vec<f64>,
    pub colorbar: ColorBar,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub thickness: f64,
    pub title: ColorBarTitle,
    pub xanchor: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBarTitle {
    pub text: String,
    pub side: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub showlegend: bool,
    pub hovermode: &'static str,
    pub margin: Margin,
    pub annotations: Vec<Annotation>,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub shapes: Vec<Shape>,
    pub updatemenus: Vec<UpdateMenu>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub b: f64,
    pub l: f64,
    pub r: f64,
    pub t: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
}

/// Bare plotting area: no grid, zero line or tick labels.
#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub showgrid: bool,
    pub zeroline: bool,
    pub showticklabels: bool,
}

impl Axis {
    fn hidden() -> Self {
        Self {
            showgrid: false,
            zeroline: false,
            showticklabels: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub fillcolor: String,
    pub line: Line,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMenu {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub showactive: bool,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Button {
    pub label: String,
    pub method: &'static str,
    pub args: Vec<serde_json::Value>,
}

/// `Generated on DD-MM-YYYY HH:MM:SS` followed by one ` | <a>` per link.
pub fn footer_text(generated_at: DateTime<Local>, links: &[FooterLink]) -> String {
    let mut text = format!("Generated on {}", generated_at.format("%d-%m-%Y %H:%M:%S"));
    for link in links {
        text.push_str(&format!(
            " | <a href='{}'> {}</a>",
            link.href, link.label
        ));
    }
    text
}

/// Builds the toggle buttons. Community rectangles start hidden and level lines visible.
pub fn buttons(shapes: &[Shape]) -> Result<Vec<Button>, serde_json::Error> {
    let shapes = serde_json::to_value(shapes)?;
    let all_visible = vec![true; LEVEL_TRACE + 1];
    let mut levels_hidden = all_visible.clone();
    levels_hidden[LEVEL_TRACE] = false;

    Ok(vec![
        Button {
            label: "Estimate community OFF".to_string(),
            method: "relayout",
            args: vec![json!({ "shapes": [] })],
        },
        Button {
            label: "Estimate community ON".to_string(),
            method: "relayout",
            args: vec![json!({ "shapes": shapes })],
        },
        Button {
            label: "Toggle level line OFF".to_string(),
            method: "restyle",
            args: vec![json!("visible"), json!(levels_hidden)],
        },
        Button {
            label: "Toggle level line ON".to_string(),
            method: "restyle",
            args: vec![json!("visible"), json!(all_visible)],
        },
    ])
}

pub fn assemble(
    traces: [Scatter; 3],
    shapes: Vec<Shape>,
    title: &str,
    footer: &str,
) -> Result<Figure, serde_json::Error> {
    let layout = Layout {
        title: Title {
            text: title.to_string(),
            font: Font { size: 16.0 },
        },
        showlegend: false,
        hovermode: "closest",
        margin: Margin {
            b: 20.0,
            l: 5.0,
            r: 5.0,
            t: 40.0,
        },
        annotations: vec![Annotation {
            text: footer.to_string(),
            showarrow: false,
            xref: "paper",
            yref: "paper",
            x: 0.005,
            y: -0.002,
        }],
        xaxis: Axis::hidden(),
        yaxis: Axis::hidden(),
        shapes: Vec::new(),
        updatemenus: vec![UpdateMenu {
            kind: "buttons",
            showactive: true,
            buttons: buttons(&shapes)?,
        }],
    };
    Ok(Figure {
        data: traces.into(),
        layout,
    })
}

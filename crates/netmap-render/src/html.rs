use crate::Result;
use crate::figure::Figure;
use std::path::Path;

/// Serializes `fig` into a standalone HTML page that pulls plotly.js from `plotly_cdn`.
pub fn render_html(fig: &Figure, plotly_cdn: &str) -> Result<String> {
    let data = script_json(&serde_json::to_string(&fig.data)?);
    let layout = script_json(&serde_json::to_string(&fig.layout)?);
    let div_id = uuid::Uuid::new_v4().to_string();

    let out = format!(
        r#"<html>
<head><meta charset="utf-8" /></head>
<body>
    <div>
        <script type="text/javascript">window.PlotlyConfig = {{MathJaxConfig: 'local'}};</script>
        <script charset="utf-8" src="{cdn}"></script>
        <div id="{div_id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
        <script type="text/javascript">
            window.PLOTLYENV = window.PLOTLYENV || {{}};
            if (document.getElementById("{div_id}")) {{
                Plotly.newPlot("{div_id}", {data}, {layout}, {{"responsive": true}});
            }}
        </script>
    </div>
</body>
</html>
"#,
        cdn = escape_attr(plotly_cdn),
    );
    Ok(out)
}

/// Writes the page in one go; nothing is created when rendering fails earlier.
pub fn write_html(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html)?;
    tracing::info!(path = %path.display(), bytes = html.len(), "wrote network map");
    Ok(())
}

/// JSON inside `<script>` must not be able to close the tag or open a comment.
fn script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

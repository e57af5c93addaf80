//! YAML run configuration. Every field has a default, so an empty file (or no file at all)
//! reproduces the stock network map.

use crate::error::ConfigError;
use crate::loader::{LoadOptions, SheetSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTiwummYiOCTzagxsbho_ZAFxTpluojPuF6Ynaxjtato5r965ppSx0ST_XPQuwzxSpP_BcF51VMuprM/pub?output=xlsx";
pub const DEFAULT_PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetmapConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
    pub community: CommunityConfig,
    pub figure: FigureConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub url: Option<String>,
    /// Local workbook; takes precedence over `url`.
    pub path: Option<PathBuf>,
    pub sheet: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_SOURCE_URL.to_string()),
            path: None,
            sheet: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub plotly_cdn: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("index.html"),
            plotly_cdn: DEFAULT_PLOTLY_CDN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlgorithm {
    #[default]
    Spring,
    Circular,
}

impl std::str::FromStr for LayoutAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "circular" => Ok(Self::Circular),
            other => Err(ConfigError::Invalid {
                message: format!("unknown layout algorithm `{other}` (expected spring|circular)"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub algorithm: LayoutAlgorithm,
    pub iterations: usize,
    pub k: Option<f64>,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::Spring,
            iterations: 1000,
            k: Some(0.7),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommunityConfig {
    pub resolution: f64,
    pub seed: Option<u64>,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            seed: None,
        }
    }
}

/// What to do with a level whose nodes do not enclose an area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelPolicy {
    #[default]
    Fail,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureConfig {
    pub title: String,
    pub highlight_node: Option<String>,
    pub highlight_color: String,
    pub border_color: String,
    /// Level boundary tightness; `0` draws convex hulls.
    pub alpha: f64,
    pub on_degenerate_level: LevelPolicy,
    pub footer_links: Vec<FooterLink>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            title: "Network map - Elf".to_string(),
            highlight_node: Some("Elves".to_string()),
            highlight_color: "red".to_string(),
            border_color: "black".to_string(),
            alpha: 0.0,
            on_degenerate_level: LevelPolicy::Fail,
            footer_links: vec![FooterLink {
                label: "Sunburst".to_string(),
                href: "https://tmt1611.github.io/sunburst".to_string(),
            }],
        }
    }
}

impl NetmapConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as `null`, not as an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });

        if self.source.path.is_none() && self.source.url.is_none() {
            return invalid("source needs either `url` or `path`".to_string());
        }
        if self.source.path.is_none() {
            self.sheet_source()?;
        }
        if self.source.timeout_secs == 0 {
            return invalid("source.timeout_secs must be positive".to_string());
        }
        if self.layout.iterations == 0 {
            return invalid("layout.iterations must be positive".to_string());
        }
        if let Some(k) = self.layout.k {
            if !(k.is_finite() && k > 0.0) {
                return invalid(format!("layout.k must be a positive number, got {k}"));
            }
        }
        if !(self.community.resolution.is_finite() && self.community.resolution > 0.0) {
            return invalid(format!(
                "community.resolution must be a positive number, got {}",
                self.community.resolution
            ));
        }
        if !(self.figure.alpha.is_finite() && self.figure.alpha >= 0.0) {
            return invalid(format!(
                "figure.alpha must be zero or positive, got {}",
                self.figure.alpha
            ));
        }
        Ok(())
    }

    pub fn sheet_source(&self) -> Result<SheetSource, ConfigError> {
        if let Some(path) = &self.source.path {
            return Ok(SheetSource::Path(path.clone()));
        }
        let raw = self.source.url.as_deref().unwrap_or(DEFAULT_SOURCE_URL);
        let url = Url::parse(raw).map_err(|err| ConfigError::Invalid {
            message: format!("source.url {raw:?} is not a valid URL: {err}"),
        })?;
        Ok(SheetSource::Url(url))
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            sheet: self.source.sheet.clone(),
            timeout: Duration::from_secs(self.source.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let cfg = NetmapConfig::from_yaml_str("").unwrap();
        assert_eq!(cfg, NetmapConfig::default());
        assert_eq!(cfg.figure.title, "Network map - Elf");
        assert_eq!(cfg.output.path, PathBuf::from("index.html"));
        assert!(matches!(cfg.sheet_source().unwrap(), SheetSource::Url(_)));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg = NetmapConfig::from_yaml_str(
            "layout:\n  algorithm: circular\n  seed: 7\nfigure:\n  on_degenerate_level: skip\n",
        )
        .unwrap();
        assert_eq!(cfg.layout.algorithm, LayoutAlgorithm::Circular);
        assert_eq!(cfg.layout.seed, Some(7));
        assert_eq!(cfg.layout.iterations, 1000);
        assert_eq!(cfg.figure.on_degenerate_level, LevelPolicy::Skip);
        assert_eq!(cfg.figure.highlight_node.as_deref(), Some("Elves"));
    }

    #[test]
    fn path_wins_over_url() {
        let cfg = NetmapConfig::from_yaml_str("source:\n  path: data/net.xlsx\n").unwrap();
        assert_eq!(
            cfg.sheet_source().unwrap(),
            SheetSource::Path(PathBuf::from("data/net.xlsx"))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = NetmapConfig::from_yaml_str("layout:\n  iterashuns: 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn bad_values_are_rejected() {
        for text in [
            "layout:\n  iterations: 0\n",
            "layout:\n  k: -1.0\n",
            "community:\n  resolution: 0.0\n",
            "figure:\n  alpha: -0.5\n",
            "source:\n  url: not a url\n",
        ] {
            let err = NetmapConfig::from_yaml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{text}: {err}");
        }
    }

    #[test]
    fn layout_algorithm_parses_case_insensitively() {
        assert_eq!(
            "Circular".parse::<LayoutAlgorithm>().unwrap(),
            LayoutAlgorithm::Circular
        );
        assert!("radial".parse::<LayoutAlgorithm>().is_err());
    }
}

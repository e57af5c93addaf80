use clap::{ArgAction, Parser};
use netmap::{ConfigError, LayoutAlgorithm, LevelPolicy, NetmapConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "netmap-cli",
    version,
    about = "Render a parent/child spreadsheet as an interactive network map (HTML)"
)]
struct Cli {
    /// YAML config file; flags below override its values
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Spreadsheet URL (xlsx/xls/ods)
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,

    /// Local spreadsheet file
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output HTML path
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Seed for the layout and community detection
    #[arg(long)]
    seed: Option<u64>,

    /// Node ID drawn with the highlight border
    #[arg(long)]
    highlight: Option<String>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Layout algorithm
    #[arg(long, value_parser = parse_layout)]
    layout: Option<LayoutAlgorithm>,

    /// Skip levels whose nodes do not enclose an area instead of failing
    #[arg(long)]
    skip_degenerate_levels: bool,

    /// plotly.js script URL
    #[arg(long)]
    plotly_cdn: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace); `RUST_LOG` wins when set
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

fn parse_layout(raw: &str) -> Result<LayoutAlgorithm, String> {
    raw.parse().map_err(|e: ConfigError| e.to_string())
}

impl Cli {
    fn into_config(self) -> Result<NetmapConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => NetmapConfig::from_yaml_path(path)?,
            None => NetmapConfig::default(),
        };

        if let Some(url) = self.url {
            cfg.source.url = Some(url);
            cfg.source.path = None;
        }
        if let Some(input) = self.input {
            cfg.source.path = Some(input);
        }
        if let Some(out) = self.out {
            cfg.output.path = out;
        }
        if let Some(seed) = self.seed {
            cfg.layout.seed = Some(seed);
            cfg.community.seed = Some(seed);
        }
        if let Some(id) = self.highlight {
            cfg.figure.highlight_node = Some(id);
        }
        if let Some(title) = self.title {
            cfg.figure.title = title;
        }
        if let Some(layout) = self.layout {
            cfg.layout.algorithm = layout;
        }
        if self.skip_degenerate_levels {
            cfg.figure.on_degenerate_level = LevelPolicy::Skip;
        }
        if let Some(cdn) = self.plotly_cdn {
            cfg.output.plotly_cdn = cdn;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> netmap::Result<()> {
    let cfg = cli.into_config()?;
    let map = netmap::write_network_map(&cfg)?;
    tracing::info!(
        path = %cfg.output.path.display(),
        nodes = map.network.node_count(),
        edges = map.network.edge_count(),
        "network map written"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("netmap-cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_keep_the_stock_settings() {
        let cfg = parse(&[]).into_config().unwrap();
        assert_eq!(cfg, NetmapConfig::default());
    }

    #[test]
    fn flags_override_config_values() {
        let cfg = parse(&[
            "--input",
            "net.xlsx",
            "--seed",
            "9",
            "--layout",
            "circular",
            "--title",
            "Workshop",
            "--skip-degenerate-levels",
        ])
        .into_config()
        .unwrap();
        assert_eq!(cfg.source.path, Some(PathBuf::from("net.xlsx")));
        assert_eq!(cfg.layout.seed, Some(9));
        assert_eq!(cfg.community.seed, Some(9));
        assert_eq!(cfg.layout.algorithm, LayoutAlgorithm::Circular);
        assert_eq!(cfg.figure.title, "Workshop");
        assert_eq!(cfg.figure.on_degenerate_level, LevelPolicy::Skip);
    }

    #[test]
    fn url_and_input_conflict() {
        let res = Cli::try_parse_from(["netmap-cli", "--url", "https://x", "--input", "a.xlsx"]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_layout_is_a_usage_error() {
        assert!(Cli::try_parse_from(["netmap-cli", "--layout", "radial"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }
}

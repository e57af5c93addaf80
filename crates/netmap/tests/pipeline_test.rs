use netmap::{Error, LayoutAlgorithm, LevelPolicy, NetmapConfig, Record, render_records};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/network")
        .join(name)
}

fn config(input: &str, out: PathBuf) -> NetmapConfig {
    let mut cfg = NetmapConfig::default();
    cfg.source.path = Some(fixture(input));
    cfg.output.path = out;
    cfg.layout.seed = Some(1);
    cfg.community.seed = Some(1);
    cfg
}

#[test]
fn writes_the_page_for_a_fixture_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.html");
    let map = netmap::write_network_map(&config("basic.xlsx", out.clone())).unwrap();

    assert_eq!(map.network.node_count(), 11);
    assert_eq!(map.network.edge_count(), 10);
    assert_eq!(map.layout.positions.len(), 11);
    let html = std::fs::read_to_string(&out).unwrap();
    assert_eq!(html, map.html);
    assert_eq!(html.matches("Plotly.newPlot(").count(), 1);
}

#[test]
fn degenerate_level_leaves_no_output_behind() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.html");
    let err = netmap::write_network_map(&config("degenerate.xlsx", out.clone())).unwrap_err();

    match err {
        Error::Render(e) => assert!(e.to_string().starts_with("level 1 boundary"), "{e}"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists());
}

#[test]
fn graph_errors_surface_through_the_facade() {
    let dir = tempfile::tempdir().unwrap();
    let err = netmap::write_network_map(&config("unknown_parent.xlsx", dir.path().join("x.html")))
        .unwrap_err();
    assert!(err.to_string().contains("Nobody"), "{err}");
}

#[test]
fn circular_layout_with_skipped_levels_renders_in_memory() {
    let mut cfg = NetmapConfig::default();
    cfg.layout.algorithm = LayoutAlgorithm::Circular;
    cfg.figure.on_degenerate_level = LevelPolicy::Skip;
    cfg.figure.highlight_node = None;
    let records = vec![
        Record::new("A", "", "root", 3.0, 0),
        Record::new("B", "A", "b", 1.0, 1),
        Record::new("C", "A", "c", 1.0, 1),
        Record::new("D", "B", "d", 0.0, 2),
    ];

    let map = render_records(records, &cfg).unwrap();
    let a = map.layout.positions["A"];
    assert!((a.x - 1.0).abs() < 1e-9 && a.y.abs() < 1e-9);
    assert!(!map.html.contains("\"red\",\"black\""));
}

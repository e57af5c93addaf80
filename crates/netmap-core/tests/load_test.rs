use netmap_core::{
    GraphBuildError, LoadError, LoadOptions, NetmapConfig, SheetSource, build_network,
    load_records,
};
use std::path::PathBuf;
use std::time::Duration;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/network")
        .join(name)
}

fn load(name: &str) -> Vec<netmap_core::Record> {
    load_records(&SheetSource::Path(fixture(name)), &LoadOptions::default()).unwrap()
}

#[test]
fn basic_workbook_loads_and_fills_blanks() {
    let records = load("basic.xlsx");
    assert_eq!(records.len(), 11);

    assert_eq!(records[0].id, "North Pole");
    assert!(records[0].is_root());
    assert_eq!(records[0].value_num, 10.0);

    // Parent filled from the row above.
    assert_eq!(records[2].id, "Reindeer");
    assert_eq!(records[2].parent, "North Pole");

    // Line breaks flattened in both ID and parent.
    assert_eq!(records[3].id, "Santa Workshop");
    assert_eq!(records[4].parent, "Santa Workshop");

    // Value and level filled from the row above.
    assert_eq!(records[5].id, "Wrapping");
    assert_eq!(records[5].value, "Toys");
    assert_eq!(records[5].level, 2);
}

#[test]
fn basic_workbook_builds_a_tree() {
    let net = build_network(load("basic.xlsx")).unwrap();
    assert_eq!(net.node_count(), 11);
    assert_eq!(net.edge_count(), 10);
    assert!(net.graph.has_edge("Santa Workshop", "Toys"));
    assert!(net.graph.has_edge("Wrapping", "Bows"));
    assert_eq!(net.index.max_level(), Some(3));
    assert_eq!(net.index.ids_at_level(1).count(), 3);
}

#[test]
fn unknown_parent_fails_the_build() {
    let err = build_network(load("unknown_parent.xlsx")).unwrap_err();
    assert_eq!(
        err,
        GraphBuildError::UnknownParent {
            id: "C".to_string(),
            parent: "Nobody".to_string(),
            row: 4,
        }
    );
}

#[test]
fn named_sheet_is_honored() {
    let opts = LoadOptions {
        sheet: Some("network".to_string()),
        ..Default::default()
    };
    let records = load_records(&SheetSource::Path(fixture("degenerate.xlsx")), &opts).unwrap();
    assert_eq!(records.len(), 4);

    let opts = LoadOptions {
        sheet: Some("missing".to_string()),
        ..Default::default()
    };
    let err = load_records(&SheetSource::Path(fixture("degenerate.xlsx")), &opts).unwrap_err();
    assert!(matches!(err, LoadError::Spreadsheet(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.xlsx");
    let err = load_records(&SheetSource::Path(path.clone()), &LoadOptions::default()).unwrap_err();
    match err {
        LoadError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_workbook_bytes_are_a_spreadsheet_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.xlsx");
    std::fs::write(&path, b"definitely not a zip archive").unwrap();
    let err = load_records(&SheetSource::Path(path), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Spreadsheet(_)));
}

#[test]
fn config_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("netmap.yaml");
    std::fs::write(
        &path,
        format!(
            "source:\n  path: {}\noutput:\n  path: out.html\nlayout:\n  seed: 3\n",
            fixture("basic.xlsx").display()
        ),
    )
    .unwrap();

    let cfg = NetmapConfig::from_yaml_path(&path).unwrap();
    assert_eq!(cfg.layout.seed, Some(3));
    let records = load_records(&cfg.sheet_source().unwrap(), &cfg.load_options()).unwrap();
    assert_eq!(records.len(), 11);
}

#[test]
fn unreachable_url_is_a_fetch_error() {
    let url = url::Url::parse("http://127.0.0.1:9/sheet.xlsx").unwrap();
    let opts = LoadOptions {
        timeout: Duration::from_secs(2),
        ..LoadOptions::default()
    };
    let err = load_records(&SheetSource::Url(url), &opts).unwrap_err();
    match err {
        LoadError::Fetch { url, .. } => assert_eq!(url, "http://127.0.0.1:9/sheet.xlsx"),
        other => panic!("expected a fetch error, got {other:?}"),
    }
}

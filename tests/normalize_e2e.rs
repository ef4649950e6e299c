// tests/normalize_e2e.rs
use std::fs;
use std::path::PathBuf;

use infobox_norm::config::{Delim, IdentifierOptions, NormalizeOptions};
use infobox_norm::csv::parse_rows;
use infobox_norm::error::NormError;
use infobox_norm::progress::Progress;
use infobox_norm::runner::normalize;
use infobox_norm::store::{load_dataset, save_dataset, DataSet};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("infobox_norm_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[derive(Default)]
struct Recorder {
    total: Option<usize>,
    done: Vec<String>,
    lines: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn column_done(&mut self, column: &str, _resolved: usize, _rows: usize) {
        self.done.push(column.to_string());
    }
    fn finish(&mut self) { self.finished = true; }
}

fn fleet() -> DataSet {
    DataSet::new(
        row(&[
            "Name", "Launched", "Length", "Length_2", "Displacement", "Speed",
            "Identification", "vessel_url", "Fate",
        ]),
        vec![
            row(&[
                "USS Wiltsie.mw-parser-output .hlist{margin:0}",
                "31 August 1945",
                "390 ft 6 in",
                "119 m",
                "2,616 long tons",
                "34 knots",
                "Hull symbol: DD-716",
                "https://en.wikipedia.org/wiki/USS_Wiltsie",
                "Struck 1 May 1970; scrapped 4 Nov 1975",
            ]),
            row(&[
                "USS Example",
                "31 Feb 1942",
                "N/A",
                "nope",
                "45000",
                "38 mph",
                "",
                "https://en.wikipedia.org/wiki/USS_Example_(CV-47)",
                "N/A",
            ]),
            row(&["USS Short", "Spring 1944"]),
        ],
    )
}

fn fleet_options() -> NormalizeOptions {
    let mut opts = NormalizeOptions::empty();
    opts.dates = row(&["Launched", "Fate"]);
    opts.lengths = row(&["Length", "Beam"]);
    opts.weights = row(&["Displacement"]);
    opts.speeds = row(&["Speed"]);
    opts.identifiers = Some(IdentifierOptions::default());
    opts.date_prefixes.push(("Fate".to_string(), "scrapped".to_string()));
    opts.strip_artifacts = true;
    opts
}

#[test]
fn dataset_is_rewritten_in_place() {
    let mut ds = fleet();
    let mut progress = Recorder::default();
    let summary = normalize(&mut ds, &fleet_options(), Some(&mut progress)).unwrap();

    assert_eq!(
        ds.headers.as_deref().unwrap().last().map(String::as_str),
        Some("number")
    );
    assert_eq!(
        ds.rows[0],
        row(&[
            "USS Wiltsie", "1945-08-31", "119.024", "119", "2658", "34", "Hull symbol: DD-716",
            "https://en.wikipedia.org/wiki/USS_Wiltsie", "1975-11-04", "DD", "716",
        ])
    );
    assert_eq!(
        ds.rows[1],
        row(&[
            "USS Example", "", "", "", "45722", "33.021", "",
            "https://en.wikipedia.org/wiki/USS_Example_(CV-47)", "", "CV", "47",
        ])
    );
    assert_eq!(
        ds.rows[2],
        row(&["USS Short", "1944-04-01", "", "", "", "", "", "", "", "", ""])
    );

    assert_eq!(summary.missing, vec!["Beam".to_string()]);
    assert_eq!(summary.identified, Some(2));

    let launched = summary.report("Launched").unwrap();
    assert_eq!((launched.resolved, launched.unresolved()), (2, 1));
    let length = summary.report("Length").unwrap();
    assert_eq!((length.resolved, length.not_applicable, length.unresolved()), (1, 2, 0));
    let length_2 = summary.report("Length_2").unwrap();
    assert_eq!(length_2.canonical, "Length");
    assert_eq!((length_2.resolved, length_2.unresolved()), (1, 1));

    assert_eq!(progress.total, Some(7));
    assert_eq!(
        progress.done,
        row(&["Launched", "Fate", "Length", "Length_2", "Displacement", "Speed"])
    );
    assert_eq!(progress.lines, vec!["2 of 3 rows identified".to_string()]);
    assert!(progress.finished);
}

#[test]
fn artifacts_survive_when_stripping_is_off() {
    let mut ds = fleet();
    let mut opts = fleet_options();
    opts.strip_artifacts = false;
    opts.identifiers = None;
    normalize(&mut ds, &opts, None).unwrap();

    assert!(ds.rows[0][0].contains(".mw-parser-output"));
    assert_eq!(ds.headers.as_ref().unwrap().len(), 9);
}

#[test]
fn bad_date_prefix_stops_the_run() {
    let mut ds = fleet();
    let mut opts = fleet_options();
    opts.date_prefixes = vec![("Fate".to_string(), "(scrapped".to_string())];
    let mut progress = Recorder::default();
    let err = normalize(&mut ds, &opts, Some(&mut progress)).unwrap_err();

    assert!(matches!(err, NormError::Catalog(_)));
    assert_eq!(ds, fleet());
    assert_eq!(progress.total, None);
    assert!(progress.done.is_empty());
    assert!(progress.finished);
}

#[test]
fn csv_file_round_trip() {
    let dir = tmp_dir("csv");
    let input = dir.join("ships.csv");
    let output = dir.join("out").join("ships.normalized.csv");
    fs::write(
        &input,
        "Name,Speed,Speed,Displacement\nKidd,\"35 knots\",\"40 mph\",\"2,050 long tons\"\n",
    )
    .unwrap();

    let mut ds = load_dataset(&input, Delim::Csv).unwrap();
    assert_eq!(ds.headers, Some(row(&["Name", "Speed", "Speed_2", "Displacement"])));

    let summary = normalize(&mut ds, &NormalizeOptions::default(), None).unwrap();
    assert!(summary.report("Speed_2").is_some());
    save_dataset(&output, &ds, Delim::Csv).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let rows = parse_rows(&text, Delim::Csv);
    assert_eq!(
        rows,
        vec![
            row(&["Name", "Speed", "Speed_2", "Displacement", "type", "number"]),
            row(&["Kidd", "35", "34.759", "2083", "", ""]),
        ]
    );
}

#[test]
fn tsv_input_is_read_with_tabs() {
    let dir = tmp_dir("tsv");
    let input = dir.join("ships.tsv");
    fs::write(&input, "Name\tBeam\nKidd\t39 ft 8 in\n").unwrap();

    let mut ds = load_dataset(&input, Delim::from_path(&input)).unwrap();
    normalize(&mut ds, &NormalizeOptions::default(), None).unwrap();
    assert_eq!(ds.column("Beam").unwrap(), vec![Some("12.09")]);
}

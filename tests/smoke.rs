use assert_cmd::Command;
use covid_info::{
    config::Settings,
    data::{records::RawCountryRecord, snapshot::Snapshot, timeline::Timeline},
};

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("covid-info").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn table_rejects_unknown_sort_field() {
    let mut cmd = Command::cargo_bin("covid-info").expect("binary exists");
    cmd.args(["table", "--sort", "population"]).assert().failure();
}

fn cached_settings(dir: &std::path::Path) -> Settings {
    let settings = Settings::for_dir(dir, "http://127.0.0.1:9");
    let snapshot = Snapshot {
        countries: vec![
            RawCountryRecord {
                country: "Peru".into(),
                cases: 50,
                deaths: 9,
                ..Default::default()
            },
            RawCountryRecord {
                country: "Chad".into(),
                cases: 10,
                deaths: 1,
                ..Default::default()
            },
        ],
        timeline: Timeline {
            cases: [("1/1/21", 1), ("1/2/21", 4)].into_iter().collect(),
            deaths: [("1/1/21", 0), ("1/2/21", 1)].into_iter().collect(),
            ..Default::default()
        },
        ..Default::default()
    };
    snapshot.persist(&settings).unwrap();
    settings
}

fn offline_cmd(settings: &Settings) -> Command {
    let mut cmd = Command::cargo_bin("covid-info").expect("binary exists");
    cmd.env("COVID_API_BASE", &settings.api_base_url)
        .env("DATA_DIR", &settings.data_dir)
        .env("OUTPUTS_DIR", &settings.outputs_dir);
    cmd
}

#[test]
fn table_writes_csv_to_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let settings = cached_settings(dir.path());
    let out = dir.path().join("table.csv");

    offline_cmd(&settings)
        .args(["table", "--sort", "deaths", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "country,cases,recovered,deaths,active\nChad,10,0,1,0\nPeru,50,0,9,0\n"
    );
}

#[test]
fn chart_writes_csv_to_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let settings = cached_settings(dir.path());
    let out = dir.path().join("chart.csv");

    offline_cmd(&settings)
        .args(["chart", "--duration", "30", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "metric,date,value");
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().skip(1).all(|l| l.contains("1/2/21")));
}

#[test]
fn output_and_save_are_exclusive() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::for_dir(dir.path(), "http://127.0.0.1:9");
    offline_cmd(&settings)
        .args(["table", "--save", "--output", "t.csv"])
        .assert()
        .failure();
    assert!(!dir.path().join("t.csv").exists());
}

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const DAY_CSV: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2021-01-01,1,0,1,0,5,1,1,0.34,0.36,0.80,0.16,30,70,100
2,2021-01-02,1,0,1,0,6,0,2,0.36,0.35,0.69,0.24,20,30,50
3,2021-01-03,1,0,1,0,0,1,3,0.19,0.18,0.43,0.24,40,160,200
";

const HOUR_CSV: &str = "\
instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2021-01-01,1,0,1,0,0,5,1,1,0.24,0.28,0.81,0.0,3,13,16
2,2021-01-01,1,0,1,8,0,5,1,1,0.22,0.27,0.80,0.0,8,32,40
3,2021-01-02,1,0,1,8,0,6,0,2,0.22,0.27,0.80,0.0,2,10,12
";

struct Fixture {
    dir: TempDir,
    day: PathBuf,
    hour: PathBuf,
}

impl Fixture {
    fn new(day_csv: &str, hour_csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let day = dir.path().join("day.csv");
        let hour = dir.path().join("hour.csv");
        write_file(&day, day_csv);
        write_file(&hour, hour_csv);
        Fixture { dir, day, hour }
    }

    fn standard() -> Self {
        Self::new(DAY_CSV, HOUR_CSV)
    }

    fn run(&self, args: &[&str]) -> (bool, Vec<u8>, Vec<u8>) {
        let mut full: Vec<&str> = vec![
            "--day-file",
            self.day.to_str().expect("utf-8 path"),
            "--hour-file",
            self.hour.to_str().expect("utf-8 path"),
        ];
        full.extend_from_slice(args);
        run_bikestats(&full, self.dir.path())
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let (ok, stdout, stderr) = self.run(args);
        assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
        serde_json::from_slice(&stdout).expect("json")
    }
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("write test file");
}

/// Run the binary with HOME pointed at `home` so no user config is picked up
fn run_bikestats(args: &[&str], home: &Path) -> (bool, Vec<u8>, Vec<u8>) {
    let output = Command::new(env!("CARGO_BIN_EXE_bikestats"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("run bikestats");
    (output.status.success(), output.stdout, output.stderr)
}

#[test]
fn workday_json_matches_worked_example() {
    let fx = Fixture::standard();
    let json = fx.run_json(&["workday", "-j", "--since", "2021-01-01", "--until", "20210102"]);

    assert_eq!(json["range"]["start"], "2021-01-01");
    assert_eq!(json["range"]["end"], "2021-01-02");
    assert_eq!(json["working_day"]["total"], 100);
    assert_eq!(json["working_day"]["mean"], 100.0);
    assert_eq!(json["non_working_day"]["total"], 50);
    assert_eq!(json["non_working_day"]["mean"], 50.0);
}

#[test]
fn summary_is_the_default_command() {
    let fx = Fixture::standard();
    let json = fx.run_json(&["-j"]);

    assert_eq!(json["range"]["start"], "2021-01-01");
    assert_eq!(json["range"]["end"], "2021-01-03");
    assert_eq!(json["filtered_days"], 3);
    assert_eq!(json["workday"]["working_day"]["total"], 300);
    assert_eq!(json["workday"]["working_day"]["mean"], 150.0);
    assert_eq!(json["weather_casual"].as_array().unwrap().len(), 4);
    assert_eq!(json["hourly"].as_array().unwrap().len(), 24);
}

#[test]
fn summary_weather_and_hourly_ignore_the_range() {
    let fx = Fixture::standard();
    let full = fx.run_json(&["summary", "-j"]);
    let narrow = fx.run_json(&["summary", "-j", "-s", "2021-01-03", "-u", "2021-01-03"]);

    assert_eq!(narrow["filtered_days"], 1);
    assert_eq!(full["weather_casual"], narrow["weather_casual"]);
    assert_eq!(full["hourly"], narrow["hourly"]);
}

#[test]
fn reversed_range_yields_null_means() {
    let fx = Fixture::standard();
    let (ok, stdout, stderr) = fx.run(&["workday", "-j", "-s", "2021-01-03", "-u", "2021-01-01"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["working_day"]["total"], 0);
    assert!(json["working_day"]["mean"].is_null());
    assert!(json["non_working_day"]["mean"].is_null());
    assert!(String::from_utf8_lossy(&stderr).contains("WARN"));
}

#[test]
fn weather_always_lists_four_conditions() {
    let fx = Fixture::standard();
    let json = fx.run_json(&["weather", "-j"]);
    let arr = json.as_array().expect("array output");

    assert_eq!(arr.len(), 4);
    let casual: Vec<u64> = arr.iter().map(|w| w["casual"].as_u64().unwrap()).collect();
    assert_eq!(casual, vec![30, 20, 40, 0]);
    assert_eq!(arr[3]["weather"], "Heavy Rain");
}

#[test]
fn hourly_has_24_entries() {
    let fx = Fixture::standard();
    let json = fx.run_json(&["hourly", "-j"]);
    let arr = json.as_array().expect("array output");

    assert_eq!(arr.len(), 24);
    assert_eq!(arr[0]["casual"], 3);
    assert_eq!(arr[8]["casual"], 10);
    assert_eq!(arr[8]["registered"], 42);
    assert_eq!(arr[12]["total"], 0);
}

#[test]
fn days_csv_lists_filtered_rows() {
    let fx = Fixture::standard();
    let (ok, stdout, stderr) = fx.run(&["days", "--csv", "-s", "2021-01-02", "-o", "desc"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let out = String::from_utf8(stdout).expect("utf-8");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(
        lines[0],
        "dteday,workingday,weathersit,temp,casual,registered,cnt"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2021-01-03,1,3,"));
    assert!(lines[2].starts_with("2021-01-02,0,2,"));
}

#[test]
fn range_command_reports_bounds() {
    let fx = Fixture::standard();
    let json = fx.run_json(&["range", "-j"]);

    assert_eq!(json["first_day"], "2021-01-01");
    assert_eq!(json["last_day"], "2021-01-03");
    assert_eq!(json["daily_rows"], 3);
    assert_eq!(json["hourly_rows"], 3);
}

#[test]
fn table_output_renders() {
    let fx = Fixture::standard();
    let (ok, stdout, stderr) = fx.run(&["--no-color"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let out = String::from_utf8(stdout).expect("utf-8");
    assert!(out.contains("Working day"));
    assert!(out.contains("Light Snow/Rain"));
    assert!(out.contains("23:00"));
}

#[test]
fn bad_value_names_row_and_column() {
    let day = DAY_CSV.replace("2021-01-02,1,0,1,0,6,0,2", "2021-01-02,1,0,1,0,6,0,7");
    let fx = Fixture::new(&day, HOUR_CSV);
    let (ok, stdout, stderr) = fx.run(&["-j"]);

    assert!(!ok);
    assert!(stdout.is_empty());
    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("row 2"), "stderr: {err}");
    assert!(err.contains("weathersit"), "stderr: {err}");
}

#[test]
fn inconsistent_total_is_rejected() {
    let day = DAY_CSV.replace("30,70,100", "30,70,101");
    let fx = Fixture::new(&day, HOUR_CSV);
    let (ok, _, stderr) = fx.run(&["workday"]);

    assert!(!ok);
    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("cnt"), "stderr: {err}");
}

#[test]
fn missing_file_is_an_error() {
    let fx = Fixture::standard();
    let missing = fx.dir.path().join("nope.csv");
    let (ok, _, stderr) = run_bikestats(
        &[
            "--day-file",
            missing.to_str().unwrap(),
            "--hour-file",
            fx.hour.to_str().unwrap(),
        ],
        fx.dir.path(),
    );

    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("nope.csv"));
}

#[test]
fn jq_without_json_warns_and_renders_table() {
    let fx = Fixture::standard();
    let (ok, stdout, stderr) = fx.run(&["weather", "--no-color", "--jq", ".[0]"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("WARN"), "stderr: {err}");
    assert!(err.contains("--jq"), "stderr: {err}");
    assert!(String::from_utf8_lossy(&stdout).contains("Heavy Rain"));
}

#[test]
fn junk_date_suffix_is_rejected() {
    let day = DAY_CSV.replace("2021-01-03,", "2021-01-03Tgarbage,");
    let fx = Fixture::new(&day, HOUR_CSV);
    let (ok, stdout, stderr) = fx.run(&["range", "-j"]);

    assert!(!ok);
    assert!(stdout.is_empty());
    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("row 3"), "stderr: {err}");
    assert!(err.contains("dteday"), "stderr: {err}");
}

#[test]
fn json_and_csv_conflict() {
    let fx = Fixture::standard();
    let (ok, _, stderr) = fx.run(&["--json", "--csv"]);

    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("--json and --csv"));
}

#[test]
fn invalid_cli_date_is_an_error() {
    let fx = Fixture::standard();
    let (ok, _, stderr) = fx.run(&["workday", "--since", "2021-13-01"]);

    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid date"));
}

#[test]
fn config_file_supplies_data_paths() {
    let fx = Fixture::standard();
    let config = fx.dir.path().join("config.toml");
    write_file(
        &config,
        &format!(
            "day_file = {:?}\nhour_file = {:?}\norder = \"desc\"\n",
            fx.day.to_str().unwrap(),
            fx.hour.to_str().unwrap()
        ),
    );

    let (ok, stdout, stderr) = run_bikestats(
        &["--config", config.to_str().unwrap(), "hourly", "-j"],
        fx.dir.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json[0]["hour"], 23);
}

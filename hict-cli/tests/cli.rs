use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

const SESSION: &str = r#"{
    "status": "opened",
    "dtype": "uint8",
    "resolutions": [1000, 250, 50, 10],
    "pixelResolutions": [64.0, 16.0, 4.0, 1.0],
    "tileSize": 256,
    "matrixSizesBins": [101, 401, 2001, 10001],
    "assemblyInfo": {
        "contigDescriptors": [
            {"contigId": 0, "contigName": "chr1", "contigLengthBp": 60000, "contigDirection": 1},
            {"contigId": 1, "contigName": "chr2", "contigLengthBp": 25555, "contigDirection": 0},
            {"contigId": 2, "contigName": "chr3", "contigLengthBp": 14445, "contigDirection": 1}
        ],
        "scaffoldDescriptors": []
    }
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp file");
    write!(f, "{}", content).unwrap();
    f
}

fn hict(args: &[&str]) -> std::process::Output {
    let dir = TempDir::new().expect("temp working dir");
    Command::new(env!("CARGO_BIN_EXE_hict"))
        .args(args)
        .current_dir(dir.path())
        .env("RUST_LOG", "warn")
        .output()
        .expect("run hict")
}

#[test]
fn inspect_prints_levels() {
    let session = write_temp(SESSION);
    let out = hict(&["inspect", session.path().to_str().unwrap(), "--json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["contigs"], 3);
    assert_eq!(report["total_bp"], 100_000);
    assert_eq!(report["levels"][1]["bins"], 401);
}

#[test]
fn replay_settles_trace() {
    let session = write_temp(SESSION);
    let trace = write_temp(
        "{\"type\": \"wheel\", \"time\": 0, \"pixel\": [410, 290], \"deltaY\": -120}\n\
         {\"type\": \"wheel\", \"time\": 20, \"pixel\": [410, 290], \"deltaY\": -120}\n",
    );
    let config = write_temp(
        "[zoom]\ndelta_per_zoom = 120.0\nmax_delta = 2.0\n\n[view]\nwidth = 800\nheight = 600\nzoom_factor = 4.0\n",
    );
    let out = hict(&[
        "replay",
        session.path().to_str().unwrap(),
        trace.path().to_str().unwrap(),
        "--level",
        "1",
        "--center",
        "1000",
        "-1000",
        "--json",
        "--config",
        config.path().to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["settles"], 1);
    assert_eq!(report["level_changes"], 1);
    assert_eq!(report["final_level"], 3);
    assert_eq!(report["final_center"][0], 1790.0);
    assert_eq!(report["final_center"][1], -1335.0);
}

#[test]
fn edit_prints_request() {
    let session = write_temp(SESSION);
    let out = hict(&[
        "edit",
        session.path().to_str().unwrap(),
        "reverse",
        "--start-bin",
        "59",
        "--end-bin",
        "60",
        "--resolution",
        "1000",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let request: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json request");
    assert_eq!(request["path"], "/reverse_selection_range");
    assert_eq!(request["body"]["startBP"], 59_000);
    assert_eq!(request["body"]["endBP"], 61_000);
}

#[test]
fn missing_session_suggests_fixes() {
    let out = hict(&["inspect", "/nonexistent/session.json"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("File not found"));
    assert!(stderr.contains("Suggestions:"));
}

#[test]
fn config_example_is_valid_toml() {
    let out = hict(&["config", "--example"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    let value: toml::Value = toml::from_str(&text).expect("example parses");
    assert_eq!(value["zoom"]["timeout_ms"].as_integer(), Some(80));
}

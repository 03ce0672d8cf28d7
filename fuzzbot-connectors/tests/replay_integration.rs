//! End-to-end replay of trace files

use std::fs;
use std::io::Write;
use std::process::Command;

use fuzzbot_connectors::{
    load_config, replay, ConnectorError, ConsoleSink, ControllerFile, JsonLinesSink, TickRecord,
    TraceRobot,
};
use fuzzbot_core::{ControlError, FallbackPolicy};
use tempfile::NamedTempFile;

const COURSE: &str = r#"{"ps0": 40.0, "ps1": 40.0, "ps6": 40.0, "ps7": 40.0}
{"ps0": 450.0, "ps1": 550.0, "ps6": 30.0, "ps7": 50.0}
{"ps0": 40.0, "ps1": 40.0, "ps6": 500.0, "ps7": 500.0}
{"ps0": 80.0, "ps1": 80.0, "ps6": 80.0, "ps7": 80.0}
"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn replays_course_with_defaults() {
    let mut robot = TraceRobot::from_reader(COURSE.as_bytes()).unwrap();
    let mut console = ConsoleSink::new(Vec::new());

    let summary = replay(&mut robot, &ControllerFile::default(), &mut console).unwrap();

    assert_eq!(summary.ticks, 4);
    assert_eq!(summary.fallback_ticks, 1);
    assert_eq!(summary.elapsed_ms, 128);

    let out = String::from_utf8(console.finish().unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Left_Sensor: 500.00, Right_Sensor: 40.00, Turn_Output: 2.00"));
    assert_eq!(
        lines[3],
        "Left_Sensor: 80.00, Right_Sensor: 80.00, Turn_Output: 0.00, Go_Output: 0.00"
    );

    for sensor in ["ps0", "ps1", "ps6", "ps7"] {
        assert_eq!(robot.sensor_period(sensor), Some(32));
    }
    assert_eq!(robot.position("left wheel motor"), Some(f32::INFINITY));

    // attach writes 0 first, then one velocity per tick
    let left = robot.velocities("left wheel motor").unwrap();
    let right = robot.velocities("right wheel motor").unwrap();
    assert_eq!(left.len(), 5);
    assert_eq!(left[0], 0.0);
    assert!(right[2] > left[2]);
    assert!(left[3] > right[3]);
    assert_eq!((left[4], right[4]), (0.0, 0.0));
}

#[test]
fn records_json_lines() {
    let mut robot = TraceRobot::from_reader(COURSE.as_bytes()).unwrap().with_time_step(16);
    let mut recorder = JsonLinesSink::new(Vec::new());

    replay(&mut robot, &ControllerFile::default(), &mut recorder).unwrap();
    let out = String::from_utf8(recorder.finish().unwrap()).unwrap();
    let records: Vec<TickRecord> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].timestamp_ms, 16);
    assert_eq!(records[3].timestamp_ms, 64);
    assert!(records[1].right_speed > records[1].left_speed);
    assert!(records[3].fallback.is_some());
}

#[test]
fn config_file_changes_behaviour() {
    let config = write_temp(
        r#"{
            "controller": { "motion": { "base_speed": 2.5 }, "fallback": "hold_last" },
            "devices": { "left_motor": "wheel_l", "right_motor": "wheel_r" }
        }"#,
    );
    let file = load_config(config.path()).unwrap();
    assert_eq!(file.controller.fallback, FallbackPolicy::HoldLast);

    let mut robot = TraceRobot::from_reader(COURSE.as_bytes()).unwrap();
    let summary = replay(&mut robot, &file, &mut fuzzbot_core::NullSink).unwrap();
    assert_eq!(summary.fallback_ticks, 1);

    let left = robot.velocities("wheel_l").unwrap();
    let right = robot.velocities("wheel_r").unwrap();
    assert!(robot.velocities("left wheel motor").is_none());
    // held output of the previous tick, at half the default speed
    assert_eq!(left[4], left[3]);
    assert_eq!(right[4], right[3]);
    assert!((right[2] - 1.75).abs() < 0.05);
}

#[test]
fn invalid_config_is_rejected() {
    let bad_speed = write_temp(r#"{ "controller": { "motion": { "max_speed": -1.0 } } }"#);
    assert!(matches!(
        load_config(bad_speed.path()),
        Err(ConnectorError::Control(ControlError::InvalidConfig { .. }))
    ));

    let bad_json = write_temp("{ \"controller\": ");
    assert!(matches!(load_config(bad_json.path()), Err(ConnectorError::Config { .. })));
}

#[test]
fn trace_without_required_sensor_fails_to_attach() {
    let trace = "{\"ps0\": 40.0, \"ps1\": 40.0, \"ps6\": 40.0}\n";
    let mut robot = TraceRobot::from_reader(trace.as_bytes()).unwrap();

    let err = replay(&mut robot, &ControllerFile::default(), &mut fuzzbot_core::NullSink).unwrap_err();
    assert!(matches!(err, ConnectorError::Control(ControlError::DeviceNotFound { .. })));
    assert!(err.to_string().contains("ps7"));
}

#[test]
fn binary_prints_tick_lines() {
    let trace = write_temp(COURSE);
    let record = tempfile::tempdir().unwrap();
    let record_path = record.path().join("ticks.jsonl");

    let output = Command::new(env!("CARGO_BIN_EXE_fuzzbot-replay"))
        .arg(trace.path())
        .arg("--record")
        .arg(&record_path)
        .arg("--time-step")
        .arg("64")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.starts_with("Left_Sensor: 40.00, Right_Sensor: 40.00, Turn_Output: "));

    let recorded = fs::read_to_string(&record_path).unwrap();
    let last: TickRecord = serde_json::from_str(recorded.lines().last().unwrap()).unwrap();
    assert_eq!(last.timestamp_ms, 256);
}

#[test]
fn binary_fails_on_missing_trace() {
    let output = Command::new(env!("CARGO_BIN_EXE_fuzzbot-replay"))
        .arg("does-not-exist.jsonl")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist.jsonl"));
}

#[test]
fn bundled_demo_replays() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos");
    let file = load_config(demos.join("controller.json")).unwrap();
    assert_eq!(file, ControllerFile::default());

    let trace = fs::File::open(demos.join("corridor.jsonl")).unwrap();
    let mut robot = TraceRobot::from_reader(std::io::BufReader::new(trace)).unwrap();
    let frames = robot.len() as u64;

    let summary = replay(&mut robot, &file, &mut fuzzbot_core::NullSink).unwrap();
    assert_eq!(summary.ticks, frames);
    assert_eq!(summary.fallback_ticks, 1);
}

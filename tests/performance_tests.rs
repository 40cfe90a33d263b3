use assert_cmd::cargo_bin;
use std::process::Command;

mod common;

#[test]
fn test_large_file_streaming() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("large_test.csv");
    common::generate_large_csv(&output_path, 10).expect("Failed to generate large CSV");

    let status = Command::new(cargo_bin!("fundpool"))
        .arg(&output_path)
        .status()
        .expect("Failed to execute command");
    assert!(status.success(), "Binary failed to process 10MB file");
}

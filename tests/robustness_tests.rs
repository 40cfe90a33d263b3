use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_malformed_csv_handling() {
    let output_path = std::path::PathBuf::from("robustness_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["op", "caller", "pool", "request", "amount", "recipient", "description"])
        .unwrap();

    wtr.write_record(["create_pool", "mgr", "", "", "100", "", ""])
        .unwrap();
    // Valid contribution
    wtr.write_record(["contribute", "alice", "0", "", "1000", "", ""])
        .unwrap();
    // Unknown op
    wtr.write_record(["drain_pool", "mallory", "0", "", "1000", "", ""])
        .unwrap();
    // Missing amount for a contribution (required)
    wtr.write_record(["contribute", "bob", "0", "", "", "", ""])
        .unwrap();
    // Valid contribution again
    wtr.write_record(["contribute", "carol", "0", "", "2000", "", ""])
        .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("fundpool"));
    cmd.arg(&output_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading command"))
        .stderr(predicate::str::contains("Error executing command"))
        .stdout(predicate::str::contains("0,mgr,100,3000,2,0")); // 1000 + 2000

    std::fs::remove_file(output_path).ok();
}

#[test]
fn test_invalid_data_types() {
    let output_path = std::path::PathBuf::from("data_type_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["op", "caller", "pool", "request", "amount", "recipient", "description"])
        .unwrap();

    wtr.write_record(["create_pool", "mgr", "", "", "100", "", ""])
        .unwrap();
    // Text in amount field
    wtr.write_record(["contribute", "alice", "0", "", "not_a_number", "", ""])
        .unwrap();
    // Non-integer pool id
    wtr.write_record(["contribute", "alice", "zero", "", "1000", "", ""])
        .unwrap();
    // Negative contribution
    wtr.write_record(["contribute", "alice", "0", "", "-500", "", ""])
        .unwrap();
    // Valid contribution
    wtr.write_record(["contribute", "alice", "0", "", "500", "", ""])
        .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("fundpool"));
    cmd.arg(&output_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading command"))
        .stderr(predicate::str::contains("Error executing command"))
        .stdout(predicate::str::contains("0,mgr,100,500,1,0"));

    std::fs::remove_file(output_path).ok();
}

#[test]
fn test_commands_for_unknown_pool() {
    let output_path = std::path::PathBuf::from("unknown_pool_test.csv");
    let mut wtr = csv::Writer::from_path(&output_path).unwrap();
    wtr.write_record(["op", "caller", "pool", "request", "amount", "recipient", "description"])
        .unwrap();

    wtr.write_record(["contribute", "alice", "7", "", "1000", "", ""])
        .unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("fundpool"));
    cmd.arg(&output_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("no pool with id 7"))
        .stdout(predicate::str::contains(
            "pool,manager,minimum,balance,approvers,requests",
        ));

    std::fs::remove_file(output_path).ok();
}

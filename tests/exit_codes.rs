use std::process::Command;

fn planar() -> Command {
    Command::new(env!("CARGO_BIN_EXE_planar"))
}

#[test]
fn exit_code_usage_is_1_for_unknown_subcommand() {
    let status = planar().args(["coil"]).status().expect("run planar");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn exit_code_usage_is_1_for_missing_parameters() {
    let status = planar()
        .args(["spiral", "--inner-radius", "6", "--outer-radius", "12"])
        .status()
        .expect("run planar spiral");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn exit_code_input_is_2_for_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.yaml");
    let status = planar()
        .args(["spiral", missing.to_string_lossy().as_ref()])
        .status()
        .expect("run planar spiral");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_input_is_2_for_invalid_yaml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "inner_radius: [1, 2,").expect("write bad yaml");
    let status = planar()
        .args(["spiral", bad.to_string_lossy().as_ref()])
        .status()
        .expect("run planar spiral");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_input_is_2_for_invalid_radius() {
    let status = planar()
        .args([
            "spiral",
            "--inner-radius",
            "8",
            "--outer-radius",
            "4",
            "--turns",
            "2",
            "--spacing",
            "0.2",
        ])
        .status()
        .expect("run planar spiral");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_processing_is_3_for_infeasible_winding() {
    let output = planar()
        .args([
            "spiral",
            "--inner-radius",
            "10",
            "--outer-radius",
            "11",
            "--turns",
            "50",
            "--spacing",
            "0.5",
        ])
        .output()
        .expect("run planar spiral");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("infeasible"), "stderr: {stderr}");
}

#[test]
fn exit_code_input_is_2_for_temperature_out_of_range() {
    let status = planar()
        .args([
            "spiral",
            "--inner-radius",
            "6",
            "--outer-radius",
            "12",
            "--turns",
            "3",
            "--spacing",
            "0.2",
            "--temperature",
            "400",
        ])
        .status()
        .expect("run planar spiral");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_input_is_2_for_non_positive_thickness() {
    let status = planar()
        .args([
            "spiral",
            "--inner-radius",
            "6",
            "--outer-radius",
            "12",
            "--turns",
            "3",
            "--spacing",
            "0.2",
            "--thickness",
            "0",
        ])
        .status()
        .expect("run planar spiral");
    assert_eq!(status.code(), Some(2));
}

#[test]
fn exit_code_processing_is_3_for_huge_turn_count() {
    let status = planar()
        .args([
            "spiral",
            "--inner-radius",
            "6",
            "--outer-radius",
            "12",
            "--turns",
            "2305843009213693952",
            "--spacing",
            "0",
        ])
        .status()
        .expect("run planar spiral");
    assert_eq!(status.code(), Some(3));
}

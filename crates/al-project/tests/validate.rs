use al_project::{ProjectError, ValidationError, from_yaml_str};
use proptest::prelude::*;

fn document(wing: &str, operating_point: &str, analysis: &str) -> String {
    format!(
        "version: 1\nname: T\nairplane:\n  wings:\n{wing}\noperating_point:\n{operating_point}\n{analysis}"
    )
}

const WING: &str = "    - name: w
      x_le: [0, 0]
      y_le: [0, 1]
      z_le: [0, 0]
      chord: [0.2, 0.2]";

const OP: &str = "  velocity: 12";

fn validation(doc: &str) -> ValidationError {
    match from_yaml_str(doc) {
        Err(ProjectError::Validation(e)) => e,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn mismatched_section_arrays() {
    let wing = "    - name: w
      x_le: [0, 0, 0]
      y_le: [0, 1, 2]
      z_le: [0, 0]
      chord: [0.2, 0.2, 0.2]";
    let err = validation(&document(wing, OP, ""));
    assert_eq!(
        err,
        ValidationError::MismatchedLengths {
            wing: "w".to_string(),
            field: "z_le".to_string(),
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn twist_array_must_match_when_given() {
    let wing = format!("{WING}\n      twist: [1.0]");
    let err = validation(&document(&wing, OP, ""));
    assert!(matches!(err, ValidationError::MismatchedLengths { ref field, .. } if field == "twist"));
}

#[test]
fn duplicate_wing_names() {
    let wings = format!("{WING}\n{WING}");
    let err = validation(&document(&wings, OP, ""));
    assert!(matches!(err, ValidationError::DuplicateId { .. }));
}

#[test]
fn single_section_wing() {
    let wing = "    - name: w
      x_le: [0]
      y_le: [0]
      z_le: [0]
      chord: [0.2]";
    let err = validation(&document(wing, OP, ""));
    assert!(err.to_string().contains("at least two sections"));
}

#[test]
fn nonpositive_velocity_and_density() {
    let err = validation(&document(WING, "  velocity: 0", ""));
    assert!(err.to_string().contains("operating_point.velocity"));
    let err = validation(&document(WING, "  velocity: 10\n  density: -1", ""));
    assert!(err.to_string().contains("operating_point.density"));
}

#[test]
fn bad_analysis_settings() {
    let err = validation(&document(WING, OP, "analysis:\n  chordwise_resolution: 0"));
    assert!(err.to_string().contains("chordwise_resolution"));

    let err = validation(&document(WING, OP, "analysis:\n  stability:\n    variables: [alpha, gamma]"));
    assert!(err.to_string().contains("gamma"));

    let err = validation(&document(WING, OP, "analysis:\n  streamlines:\n    steps: 1"));
    assert!(err.to_string().contains("streamlines.steps"));

    let err = validation(&document(WING, OP, "analysis:\n  collocation_fraction: 0.2"));
    assert!(err.to_string().contains("aft of bound_vortex_fraction"));
}

#[test]
fn future_version_is_rejected() {
    let doc = document(WING, OP, "").replacen("version: 1", "version: 7", 1);
    assert_eq!(validation(&doc), ValidationError::UnsupportedVersion { version: 7 });
}

proptest! {
    #[test]
    fn chord_sign_decides_validity(c0 in -2.0_f64..2.0, c1 in 0.01_f64..2.0) {
        let wing = format!(
            "    - name: w\n      x_le: [0, 0]\n      y_le: [0, 1]\n      z_le: [0, 0]\n      chord: [{c0}, {c1}]"
        );
        let result = from_yaml_str(&document(&wing, OP, ""));
        prop_assert_eq!(result.is_ok(), c0 > 0.0);
    }
}

use al_project::schema::*;
use al_project::{LATEST_VERSION, load, load_json, load_yaml, save_json, save_yaml};

fn sample() -> Project {
    Project {
        version: LATEST_VERSION,
        name: "Roundtrip".to_string(),
        airplane: AirplaneDef {
            xyz_ref: [0.1, 0.0, 0.0],
            s_ref: Some(9.5),
            c_ref: None,
            b_ref: None,
            wings: vec![WingDef {
                name: "main".to_string(),
                symmetric: true,
                x_le: vec![0.0, 0.1, 0.3],
                y_le: vec![0.0, 2.0, 4.0],
                z_le: vec![0.0, 0.1, 0.2],
                chord: vec![1.0, 0.8, 0.5],
                twist: vec![1.0, 0.0, -1.5],
                translate: [0.5, 0.0, 0.0],
            }],
        },
        operating_point: OperatingPointDef {
            velocity: 40.0,
            density: 1.1,
            alpha: 3.0,
            beta: -1.0,
            p: 0.0,
            q: 0.05,
            r: 0.0,
        },
        analysis: AnalysisDef {
            spanwise_resolution: 6,
            spanwise_spacing: SpacingDef::Uniform,
            ..AnalysisDef::default()
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let project = sample();
    let path = std::env::temp_dir().join("al_project_roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), project);
    assert_eq!(load(&path).unwrap(), project);
}

#[test]
fn roundtrip_json() {
    let project = sample();
    let path = std::env::temp_dir().join("al_project_roundtrip.json");
    save_json(&path, &project).unwrap();
    assert_eq!(load_json(&path).unwrap(), project);
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load(std::path::Path::new("airplane.toml")).unwrap_err();
    assert!(err.to_string().contains("Unknown project file format"));
}

#[test]
fn minimal_yaml_gets_defaults() {
    let project = al_project::from_yaml_str(
        r#"
version: 0
name: Minimal
airplane:
  wings:
    - name: w
      x_le: [0, 0]
      y_le: [0, 1]
      z_le: [0, 0]
      chord: [0.2, 0.2]
operating_point:
  velocity: 12
"#,
    )
    .unwrap();

    assert_eq!(project.version, LATEST_VERSION);
    assert_eq!(project.operating_point.density, 1.225);
    assert_eq!(project.analysis, AnalysisDef::default());
    let wing = &project.airplane.wings[0];
    assert!(!wing.symmetric);
    assert_eq!(wing.twist_at(1), 0.0);
    assert_eq!(wing.translate, [0.0; 3]);
}

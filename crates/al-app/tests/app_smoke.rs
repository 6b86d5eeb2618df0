//! Service layer against the demo projects.

use al_app::{
    alpha_range, build_airplane, list_wings, load_project, result_csv, run_alpha_sweep,
    run_elliptic_comparison, run_point, run_stability, trace_streamlines, validate_project,
};
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // repo root
    path.push("demos");
    path.push("projects");
    path.push(name);
    path
}

#[test]
fn rectangular_wing_point() {
    let project = load_project(&demo("rectangular_wing.yaml")).unwrap();
    validate_project(&project).unwrap();

    let airplane = build_airplane(&project).unwrap();
    let wings = list_wings(&airplane);
    assert_eq!(wings.len(), 1);
    assert!((wings[0].aspect_ratio - 10.0).abs() < 1e-9);

    let result = run_point(&project).unwrap();
    let c = &result.coefficients;
    assert!(c.lift > 0.3 && c.lift < 0.55);
    assert!(c.drag > 0.0);
    assert!(c.side.abs() < 1e-10 && c.roll.abs() < 1e-10 && c.yaw.abs() < 1e-10);

    let csv = result_csv(&result);
    assert!(csv.starts_with("name,value\nCL,"));
}

#[test]
fn alpha_sweep_lift_increases() {
    let project = load_project(&demo("rectangular_wing.yaml")).unwrap();
    let alphas = alpha_range(-2.0, 6.0, 5).unwrap();
    assert_eq!(alphas, vec![-2.0, 0.0, 2.0, 4.0, 6.0]);

    let sweep = run_alpha_sweep(&project, &alphas).unwrap();
    assert_eq!(sweep.rows.len(), 5);
    assert!(sweep.rows.windows(2).all(|w| w[1].cl > w[0].cl));
    assert!(sweep.rows[1].cl.abs() < 1e-10, "untwisted wing at zero alpha");

    let csv = sweep.to_csv();
    assert_eq!(csv.lines().count(), 6);
    assert!(csv.starts_with("alpha_deg,CL,CD"));
}

#[test]
fn glider_is_statically_stable() {
    let project = load_project(&demo("glider.yaml")).unwrap();
    let result = run_stability(&project).unwrap();
    let stability = result.stability.as_ref().unwrap();
    assert!(stability.static_margin.unwrap() > 0.0);
    assert!(result.get("CLa").unwrap() > 0.0);
    assert!(result.get("Cma").unwrap() < 0.0);
    assert!(result_csv(&result).contains("static_margin,"));
}

#[test]
fn glider_streamlines_from_default_rake() {
    let project = load_project(&demo("glider.yaml")).unwrap();
    let report = trace_streamlines(&project, None).unwrap();
    assert_eq!(report.lines.len(), al_app::run_service::DEFAULT_RAKE_SEEDS);
    assert!(report.lines.iter().all(|l| l.len() == 60));
    assert_eq!(report.to_csv().lines().count(), 1 + 11 * 60);
}

#[test]
fn span_efficiency() {
    let rect = load_project(&demo("rectangular_wing.yaml")).unwrap();
    let e_rect = run_elliptic_comparison(&rect).unwrap().span_efficiency;
    assert!(e_rect > 0.8 && e_rect <= 1.0, "rectangular e = {}", e_rect);

    let elliptic = load_project(&demo("elliptical_wing.yaml")).unwrap();
    let e_ell = run_elliptic_comparison(&elliptic).unwrap().span_efficiency;
    assert!(e_ell > 0.9, "elliptical e = {}", e_ell);
}

#[test]
fn bad_sweep_and_missing_file() {
    assert!(alpha_range(0.0, 1.0, 0).is_err());
    assert_eq!(alpha_range(3.0, 9.0, 1).unwrap(), vec![3.0]);
    assert!(load_project(&demo("does_not_exist.yaml")).is_err());
}

use al_core::{deg, kgpm3, mps, radps};
use al_flight::{FlowState, StateVariable};
use al_geometry::{Airplane, AirplaneBuilder, CrossSection, Wing};
use al_solver::{
    Coefficient, InfluenceAssembler, MeshConfig, Solution, SolverConfig, SolverError,
    StabilityConfig, StreamlineConfig, VortexLattice, symmetry,
};
use nalgebra::Vector3;

/// Flat rectangular wing, span 10, chord 1, leading edge on y.
fn rect_wing(symmetric_flag: bool) -> Airplane {
    let mut b = AirplaneBuilder::new("rect");
    b.add_wing(Wing::new(
        "main",
        vec![
            CrossSection::new([0.0, 0.0, 0.0], 1.0, 0.0),
            CrossSection::new([0.0, 5.0, 0.0], 1.0, 0.0),
        ],
        symmetric_flag,
    ));
    b.build().unwrap()
}

/// Tapered, swept wing with dihedral and a horizontal tail.
fn wing_and_tail() -> Airplane {
    let mut b = AirplaneBuilder::new("glider");
    b.add_wing(Wing::new(
        "wing",
        vec![
            CrossSection::new([0.0, 0.0, 0.0], 1.2, 2.0),
            CrossSection::new([0.3, 4.0, 0.3], 0.6, -1.0),
        ],
        true,
    ));
    b.add_wing(Wing::new(
        "tail",
        vec![
            CrossSection::new([4.0, 0.0, 0.2], 0.5, -2.0),
            CrossSection::new([4.2, 1.2, 0.2], 0.35, -2.0),
        ],
        true,
    ));
    b.xyz_ref([0.35, 0.0, 0.0]);
    b.build().unwrap()
}

fn config(span: usize, chord: usize, use_symmetry: bool) -> SolverConfig {
    SolverConfig {
        mesh: MeshConfig {
            spanwise_resolution: span,
            chordwise_resolution: chord,
            use_symmetry,
            ..MeshConfig::default()
        },
        ..SolverConfig::default()
    }
}

fn cruise() -> FlowState {
    FlowState::new(mps(100.0), kgpm3(1.225)).with_alpha(deg(5.0))
}

#[test]
fn flat_rectangular_wing_scenario() {
    let lattice = VortexLattice::new(&rect_wing(true), config(12, 4, true)).unwrap();
    let c = lattice.run(&cruise()).unwrap().coefficients;

    assert!(c.lift > 0.3 && c.lift < 0.55, "CL = {}", c.lift);
    assert!(c.drag > 0.0 && c.drag < 0.05, "CD = {}", c.drag);
    assert!(c.side.abs() < 1e-10, "CY = {}", c.side);
    assert!(c.roll.abs() < 1e-10, "Cl = {}", c.roll);
    assert!(c.yaw.abs() < 1e-10, "Cn = {}", c.yaw);
}

#[test]
fn explicit_mesh_is_exactly_symmetric_too() {
    let lattice = VortexLattice::new(&rect_wing(true), config(8, 3, false)).unwrap();
    assert!(!lattice.mesh().is_symmetric());
    let c = lattice.run(&cruise()).unwrap().coefficients;
    assert!(c.side.abs() < 1e-9);
    assert!(c.roll.abs() < 1e-9);
    assert!(c.yaw.abs() < 1e-9);
}

#[test]
fn lift_converges_with_resolution() {
    let coarse = VortexLattice::new(&rect_wing(true), config(8, 2, true)).unwrap();
    let fine = VortexLattice::new(&rect_wing(true), config(16, 4, true)).unwrap();
    let cl_coarse = coarse.run(&cruise()).unwrap().coefficients.lift;
    let cl_fine = fine.run(&cruise()).unwrap().coefficients.lift;
    let change = (cl_fine - cl_coarse).abs() / cl_fine;
    assert!(change < 0.02, "relative CL change {}", change);
}

#[test]
fn influence_matrix_does_not_depend_on_flow_state() {
    let lattice = VortexLattice::new(&wing_and_tail(), config(6, 3, true)).unwrap();
    let before = lattice.influence().clone();

    lattice.run(&cruise()).unwrap();
    lattice
        .run(&cruise().with_beta(deg(4.0)).with_rates(radps(0.2), radps(0.1), radps(-0.1)))
        .unwrap();

    let strategy = symmetry::for_mesh(lattice.mesh());
    let kernel = al_solver::BiotSavart::new(lattice.config().core_radius);
    let again = InfluenceAssembler::new(kernel, strategy.as_ref())
        .assemble(lattice.mesh())
        .unwrap();
    assert_eq!(&before, lattice.influence());
    assert_eq!(before, again);
}

#[test]
fn repeated_runs_are_identical() {
    let lattice = VortexLattice::new(&wing_and_tail(), config(6, 3, true)).unwrap();
    let flow = cruise().with_beta(deg(2.0));
    assert_eq!(lattice.solve(&flow).unwrap(), lattice.solve(&flow).unwrap());
    assert_eq!(lattice.run(&flow).unwrap(), lattice.run(&flow).unwrap());
}

#[test]
fn symmetry_reduction_matches_explicit_mesh() {
    let airplane = wing_and_tail();
    let half = VortexLattice::new(&airplane, config(6, 3, true)).unwrap();
    let full = VortexLattice::new(&airplane, config(6, 3, false)).unwrap();
    assert!(half.mesh().is_symmetric());
    assert_eq!(full.mesh().len(), 2 * half.mesh().len());

    let flows = [
        cruise(),
        cruise().with_beta(deg(5.0)),
        cruise().with_rates(radps(0.3), radps(0.1), radps(-0.2)),
    ];
    for flow in flows {
        let a = half.run(&flow).unwrap().coefficients;
        let b = full.run(&flow).unwrap().coefficients;
        for c in Coefficient::ALL {
            assert!(
                (a.get(c) - b.get(c)).abs() < 1e-8,
                "{} differs: {} vs {}",
                c,
                a.get(c),
                b.get(c)
            );
        }
    }
}

#[test]
fn sideslip_produces_lateral_loads_on_reduced_mesh() {
    let lattice = VortexLattice::new(&wing_and_tail(), config(6, 3, true)).unwrap();
    let c = lattice.run(&cruise().with_beta(deg(5.0))).unwrap().coefficients;
    // Dihedral: wind from the right raises the right wing's lift, rolling left
    assert!(c.roll < 0.0, "Cl = {}", c.roll);
}

#[test]
fn alpha_derivative_matches_central_difference() {
    let lattice = VortexLattice::new(&rect_wing(true), config(10, 4, true)).unwrap();
    let flow = cruise();
    let result = lattice
        .run_with_stability_derivatives(&flow, &StabilityConfig::default())
        .unwrap();
    let cla = result.get("CLa").unwrap();

    let h = 0.01;
    let up = lattice.run(&flow.perturbed(StateVariable::Alpha, h)).unwrap();
    let down = lattice.run(&flow.perturbed(StateVariable::Alpha, -h)).unwrap();
    let central = (up.coefficients.lift - down.coefficients.lift) / (2.0 * h.to_radians());

    assert!(cla > 4.0 && cla < 6.0, "CLa = {}", cla);
    assert!((cla - central).abs() / central < 1e-3, "{} vs {}", cla, central);
}

#[test]
fn rectangular_wing_stability() {
    let lattice = VortexLattice::new(&rect_wing(true), config(10, 4, true)).unwrap();
    let result = lattice
        .run_with_stability_derivatives(&cruise(), &StabilityConfig::default())
        .unwrap();
    let stability = result.stability.as_ref().unwrap();

    // Reference at the leading edge: neutral point near quarter chord
    let sm = stability.static_margin.unwrap();
    assert!(sm > 0.2 && sm < 0.3, "static margin {}", sm);
    let np = stability.neutral_point.unwrap();
    assert!((np[0] - sm).abs() < 1e-12);

    assert!(result.get("Cma").unwrap() < 0.0);
    assert!(result.get("Cmq").unwrap() < 0.0);
    assert!(result.get("Clp").unwrap() < 0.0);
    assert!(result.get("CYa").unwrap().abs() < 1e-6);
    assert_eq!(stability.derivatives.named().len(), 5 * 6);
}

#[test]
fn selected_variables_only() {
    let lattice = VortexLattice::new(&rect_wing(true), config(6, 2, true)).unwrap();
    let cfg = StabilityConfig {
        variables: vec![StateVariable::Beta],
        ..StabilityConfig::default()
    };
    let result = lattice.run_with_stability_derivatives(&cruise(), &cfg).unwrap();
    let stability = result.stability.unwrap();
    assert!(stability.derivatives.get(StateVariable::Beta, Coefficient::Side).is_some());
    assert!(stability.derivatives.get(StateVariable::Alpha, Coefficient::Lift).is_none());
    assert!(stability.neutral_point.is_none());
}

#[test]
fn zero_circulation_streamline_follows_freestream() {
    let lattice = VortexLattice::new(&rect_wing(true), config(4, 2, true)).unwrap();
    let flow = cruise();
    let zeros = Solution::zeros(lattice.mesh());
    let seed = Vector3::new(-30.0, 1.0, -2.0);
    let cfg = StreamlineConfig {
        steps: 11,
        length: Some(10.0),
    };

    let lines = lattice
        .trace_streamlines(&flow, &zeros, &[seed], &cfg)
        .unwrap();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line.len(), 11);

    let dir = flow.freestream_direction_geometry();
    for p in line {
        assert!((p - seed).cross(&dir).norm() < 1e-12);
    }
    let last = line.last().unwrap();
    assert!(((last - seed).norm() - 10.0).abs() < 1e-9);
}

#[test]
fn streamline_defaults_and_bad_steps() {
    let lattice = VortexLattice::new(&rect_wing(true), config(4, 2, true)).unwrap();
    let flow = cruise();
    let solution = lattice.solve(&flow).unwrap();
    let seeds = [Vector3::new(-2.0, 1.0, 0.1), Vector3::new(-2.0, 3.0, 0.1)];

    let lines = lattice
        .trace_streamlines(&flow, &solution, &seeds, &StreamlineConfig::default())
        .unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.len() == 100));

    let bad = StreamlineConfig {
        steps: 1,
        length: None,
    };
    let err = lattice.trace_streamlines(&flow, &solution, &seeds, &bad).unwrap_err();
    assert!(matches!(err, SolverError::InvalidQuery { .. }));
}

#[test]
fn flow_field_queries() {
    let lattice = VortexLattice::new(&rect_wing(true), config(8, 3, true)).unwrap();
    let flow = cruise();
    let solution = lattice.solve(&flow).unwrap();

    let behind = Vector3::new(2.0, 0.0, 0.0);
    let far = Vector3::new(-5000.0, 0.0, 0.0);
    let induced = lattice.induced_velocity_at(&flow, &solution, &[behind, far]);
    assert!(induced[0].z < 0.0, "downwash behind the wing");
    assert!(induced[1].norm() < 1e-3);

    let total = lattice.velocity_at(&flow, &solution, &[far]);
    assert!((total[0] - flow.freestream_velocity_geometry()).norm() < 1e-3);

    // On a bound vortex: regularized, not NaN
    let on_filament = lattice.mesh().panel(0).horseshoe.midpoint();
    let v = lattice.velocity_at(&flow, &solution, &[on_filament]);
    assert!(v[0].iter().all(|c| c.is_finite()));
}

#[test]
fn span_loading_is_symmetric_and_peaks_inboard() {
    let lattice = VortexLattice::new(&rect_wing(true), config(10, 2, true)).unwrap();
    let loading = lattice.run(&cruise()).unwrap().span_loading;
    assert_eq!(loading.strips.len(), 20);

    let n = loading.strips.len();
    for k in 0..n / 2 {
        let (a, b) = (&loading.strips[k], &loading.strips[n - 1 - k]);
        assert!((a.y + b.y).abs() < 1e-12);
        assert!((a.cl - b.cl).abs() < 1e-10);
    }
    let root = &loading.strips[n / 2];
    let tip = loading.strips.last().unwrap();
    assert!(root.cl > tip.cl);
}

#[test]
fn panel_forces_sum_to_total() {
    let lattice = VortexLattice::new(&rect_wing(true), config(6, 2, true)).unwrap();
    let result = lattice.run(&cruise()).unwrap();
    assert_eq!(result.panel_forces.len(), 2 * lattice.mesh().len());
    let sum: Vector3<f64> = result
        .panel_forces
        .iter()
        .map(|p| Vector3::from(p.force))
        .sum();
    let total = result.loads(al_flight::Axes::Geometry).unwrap().force_vector();
    assert!((sum - total).norm() < 1e-9 * total.norm());
}

#[test]
fn duplicate_wings_are_reported() {
    let mut b = AirplaneBuilder::new("twins");
    for name in ["a", "b"] {
        b.add_wing(Wing::new(
            name,
            vec![
                CrossSection::new([0.0, 0.0, 0.0], 1.0, 0.0),
                CrossSection::new([0.0, 4.0, 0.0], 1.0, 0.0),
            ],
            false,
        ));
    }
    let airplane = b.build().unwrap();
    let err = VortexLattice::new(&airplane, config(4, 2, true)).unwrap_err();
    match err {
        SolverError::DuplicatePanels { first, second } => {
            assert_eq!(first.as_usize(), 0);
            assert_eq!(second.as_usize(), 8);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn near_singular_system_is_reported() {
    let mut cfg = config(4, 2, true);
    cfg.min_pivot_ratio = 1.0;
    let err = VortexLattice::new(&rect_wing(true), cfg).unwrap_err();
    assert!(matches!(err, SolverError::SingularSystem { .. }));
    assert!(err.to_string().contains("Singular"));
}

#[test]
fn invalid_flow_state_is_rejected() {
    let lattice = VortexLattice::new(&rect_wing(true), config(4, 2, true)).unwrap();
    let err = lattice.run(&FlowState::new(mps(-1.0), kgpm3(1.225))).unwrap_err();
    assert!(matches!(err, SolverError::Flight(_)));
}

use std::fs;

use snf_power_toolbox::cycle::{
    CycleStudy, CycleTemplate, RankineCycleSolver, RankineCycleSpec, DEGENERATE_EFFICIENCY,
};
use snf_power_toolbox::steam::properties::If97;

fn reference_template() -> CycleTemplate {
    CycleTemplate::from(RankineCycleSpec::default())
}

#[test]
fn study_matrix_is_row_major_over_flow_then_pressure() {
    let solver = RankineCycleSolver::new(If97);
    let flows = vec![0.1, 0.114, 0.13];
    let pressures = vec![345_000.0, 500_000.0];
    let mut study = CycleStudy::new("grid", reference_template(), flows.clone(), pressures.clone());
    assert!(study.results().is_none());

    let matrix = study.execute(&solver).clone();
    assert_eq!(matrix.width(), pressures.len());
    assert_eq!(matrix.length(), flows.len());
    assert_eq!(matrix.values().len(), 6);

    for (i, &m) in flows.iter().enumerate() {
        for (j, &p) in pressures.iter().enumerate() {
            let direct = solver.efficiency(&reference_template().spec(m, p));
            assert_eq!(matrix.values()[j + pressures.len() * i], direct);
            assert_eq!(matrix.get(i, j), Some(direct));
        }
    }
    assert_eq!(study.results(), Some(&matrix));
}

#[test]
fn failed_cells_record_sentinel_and_sweep_continues() {
    let solver = RankineCycleSolver::new(If97);
    let mut study = CycleStudy::new(
        "with-failure",
        reference_template(),
        vec![0.0, 0.114],
        vec![345_000.0],
    );
    let matrix = study.execute(&solver);
    assert_eq!(matrix.values()[0], DEGENERATE_EFFICIENCY);
    assert!(matrix.values()[1] > 0.0);
}

#[test]
fn empty_axes_give_empty_matrix() {
    let solver = RankineCycleSolver::new(If97);
    let mut study = CycleStudy::new("empty", reference_template(), vec![], vec![345_000.0]);
    let matrix = study.execute(&solver);
    assert_eq!(matrix.length(), 0);
    assert!(matrix.values().is_empty());
}

#[test]
fn empty_pressure_axis_keeps_flow_length() {
    let solver = RankineCycleSolver::new(If97);
    let mut study = CycleStudy::new("no-pressure", reference_template(), vec![0.1, 0.114, 0.13], vec![]);
    let matrix = study.execute(&solver);
    assert_eq!((matrix.width(), matrix.length()), (0, 3));
    assert!(matrix.values().is_empty());
}

#[test]
fn template_fills_study_axes() {
    let template = CycleTemplate::ideal(250_000.0, 7.75e6, 311.0);
    let spec = template.spec(0.2, 4.0e5);
    assert_eq!(spec.mass_flow_rate, 0.2);
    assert_eq!(spec.mid_pressure, 4.0e5);
    assert_eq!(spec.feed_pump_efficiency, 1.0);
    assert_eq!(CycleTemplate::from(spec), template);
}

#[test]
fn export_writes_named_file_after_execution() {
    let dir = tempfile::tempdir().unwrap();
    let solver = RankineCycleSolver::new(If97);
    let mut study = CycleStudy::new(
        "export",
        reference_template(),
        vec![0.114, 0.13],
        vec![345_000.0],
    )
    .with_file_name("study.csv");

    assert_eq!(study.export(dir.path()).unwrap(), None);
    study.execute(&solver);
    let path = study.export(dir.path()).unwrap().expect("written");
    assert_eq!(path, dir.path().join("study.csv"));

    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.ends_with(',') && l.matches(',').count() == 1));
}

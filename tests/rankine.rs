use snf_power_toolbox::cycle::{
    CycleBoundary, CycleError, RankineCycleSolver, RankineCycleSpec, SolverSettings,
    StationPoints, DEGENERATE_EFFICIENCY,
};
use snf_power_toolbox::steam::properties::{If97, PropertyResult, PropertyService};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

/// IF97을 그대로 쓰되 과열 증기 엔탈피만 바꿔 끼우는 물성.
struct HotLegOverride<F> {
    enthalpy: F,
}

impl<F: Fn(f64, f64) -> f64> PropertyService for HotLegOverride<F> {
    fn saturation_temperature(&self, pressure: f64) -> PropertyResult<f64> {
        If97.saturation_temperature(pressure)
    }
    fn saturation_pressure(&self, temperature: f64) -> PropertyResult<f64> {
        If97.saturation_pressure(temperature)
    }
    fn liquid_enthalpy(&self, pressure: f64) -> PropertyResult<f64> {
        If97.liquid_enthalpy(pressure)
    }
    fn vapor_enthalpy(&self, pressure: f64) -> PropertyResult<f64> {
        If97.vapor_enthalpy(pressure)
    }
    fn liquid_entropy(&self, pressure: f64) -> PropertyResult<f64> {
        If97.liquid_entropy(pressure)
    }
    fn vapor_entropy(&self, pressure: f64) -> PropertyResult<f64> {
        If97.vapor_entropy(pressure)
    }
    fn liquid_density(&self, pressure: f64) -> PropertyResult<f64> {
        If97.liquid_density(pressure)
    }
    fn enthalpy_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64> {
        Ok((self.enthalpy)(temperature, pressure))
    }
    fn entropy_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64> {
        If97.entropy_tp(temperature, pressure)
    }
    fn density_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64> {
        If97.density_tp(temperature, pressure)
    }
    fn temperature_ph(&self, pressure: f64, enthalpy: f64) -> PropertyResult<f64> {
        If97.temperature_ph(pressure, enthalpy)
    }
}

#[test]
fn reference_cycle_efficiency_is_plausible() {
    let solver = RankineCycleSolver::new(If97);
    let spec = RankineCycleSpec::default();
    let result = solver.evaluate(&spec).expect("reference cycle");

    assert!(
        (0.25..=0.35).contains(&result.efficiency),
        "eta = {}",
        result.efficiency
    );
    assert!(result.iterations >= 1);
    let t_sat = If97.saturation_temperature(spec.sg_pressure).unwrap();
    assert!(result.hot_leg_temperature > t_sat);
    assert!(result.stations.heat_rise() >= spec.required_enthalpy_rise());

    let x2s = result.stations.separation_quality();
    let x2a = result.stations.hp_exhaust_quality();
    let x4a = result.stations.lp_exhaust_quality();
    assert!(x2s > 0.0 && x2s <= 1.0, "x2s = {x2s}");
    assert!(x2a > 0.0 && x2a <= 1.0, "x2a = {x2a}");
    assert!(x4a > 0.0 && x4a <= 1.0, "x4a = {x4a}");

    assert_close("eta from work", result.work.efficiency(), result.efficiency, 1e-12);
    assert_eq!(solver.efficiency(&spec), result.efficiency);
}

#[test]
fn repeated_evaluation_is_identical() {
    let solver = RankineCycleSolver::new(If97);
    let spec = RankineCycleSpec::default();
    let first = solver.evaluate(&spec).unwrap();
    let second = solver.evaluate(&spec).unwrap();
    assert_eq!(first, second);
}

#[test]
fn station_energy_relations_hold() {
    let solver = RankineCycleSolver::new(If97);
    let spec = RankineCycleSpec::default();
    let st = solver.evaluate(&spec).unwrap().stations;
    let eta = spec.hp_turbine_efficiency;

    assert_close(
        "h2a",
        st.hp_exhaust.enthalpy,
        st.hot_leg.enthalpy - eta * (st.hot_leg.enthalpy - st.hp_exhaust_ideal.enthalpy),
        1e-12,
    );
    // 펌프는 일을 더하고 터빈은 엔탈피를 낮춘다.
    assert!(st.condensate_pump.enthalpy > st.condensate_pump_ideal.enthalpy);
    assert!(st.condensate_pump_ideal.enthalpy > st.condensate.enthalpy);
    assert!(st.feed_pump.enthalpy > st.feed_pump_ideal.enthalpy);
    assert!(st.feed_pump_ideal.enthalpy > st.mixed_feed.enthalpy);
    assert!(st.lp_exhaust.enthalpy > st.lp_exhaust_ideal.enthalpy);
    assert!(st.lp_exhaust.enthalpy < st.lp_inlet.enthalpy);

    // 혼합 급수는 등엔트로피 팽창 건도로 가중한다.
    let x2s = st.separation_quality();
    assert_eq!(st.hp_exhaust_ideal.quality, Some(x2s));
    assert_close(
        "x2s",
        x2s,
        (st.hp_exhaust_ideal.enthalpy - st.separator_drain.enthalpy)
            / (st.lp_inlet.enthalpy - st.separator_drain.enthalpy),
        1e-12,
    );
    assert_close(
        "h7",
        st.mixed_feed.enthalpy,
        x2s * st.condensate_pump.enthalpy + (1.0 - x2s) * st.separator_drain.enthalpy,
        1e-12,
    );
    assert!(st.hp_exhaust_quality() > x2s);
}

#[test]
fn work_breakdown_uses_separation_quality() {
    let solver = RankineCycleSolver::new(If97);
    let result = solver.evaluate(&RankineCycleSpec::default()).unwrap();
    let st = &result.stations;
    let x2s = st.separation_quality();
    assert_close(
        "w_lp",
        result.work.lp_turbine,
        x2s * (st.lp_inlet.enthalpy - st.lp_exhaust.enthalpy),
        1e-12,
    );
    assert_close(
        "w_cp",
        result.work.condensate_pump,
        x2s * (st.condensate_pump.enthalpy - st.condensate.enthalpy),
        1e-12,
    );
}

#[test]
fn boundary_states_follow_inputs() {
    let spec = RankineCycleSpec::default();
    let boundary = CycleBoundary::new(&spec, &If97).unwrap();
    assert_eq!(boundary.spec(), &spec);
    assert_eq!(boundary.mid().pressure, spec.mid_pressure);
    assert_eq!(boundary.condenser().temperature, spec.condenser_temperature);
    assert_close(
        "p_cond",
        boundary.condenser().pressure,
        If97.saturation_pressure(spec.condenser_temperature).unwrap(),
        1e-12,
    );
    assert_close(
        "Tsat(p1)",
        boundary.steam_generator().temperature,
        If97.saturation_temperature(spec.sg_pressure).unwrap(),
        1e-12,
    );
    assert!(boundary.mid().vapor_enthalpy > boundary.mid().liquid_enthalpy);

    let t1 = boundary.steam_generator().temperature + 5.0;
    assert_eq!(
        boundary.stations_at(&If97, t1).unwrap(),
        StationPoints::evaluate(&spec, &If97, t1).unwrap()
    );
}

#[test]
fn heat_rise_does_not_decrease_with_hot_leg_temperature() {
    let spec = RankineCycleSpec {
        heat_rate: 300_000.0,
        ..RankineCycleSpec::default()
    };
    let t_sat = If97.saturation_temperature(spec.sg_pressure).unwrap();
    let mut previous = f64::NEG_INFINITY;
    for k in 1..=60 {
        let rise = StationPoints::evaluate(&spec, &If97, t_sat + k as f64)
            .unwrap()
            .heat_rise();
        assert!(rise >= previous, "rise fell at T1 = Tsat + {k}");
        previous = rise;
    }
}

#[test]
fn search_stops_at_temperature_cap() {
    let settings = SolverSettings {
        temperature_step: 1.0,
        max_hot_leg_temperature: 600.0,
    };
    let solver = RankineCycleSolver::with_settings(If97, settings);
    let spec = RankineCycleSpec {
        mass_flow_rate: 0.05,
        ..RankineCycleSpec::default()
    };
    match solver.evaluate(&spec) {
        Err(CycleError::SearchExceeded {
            iterations,
            hot_leg_temperature,
        }) => {
            let t_sat = If97.saturation_temperature(spec.sg_pressure).unwrap();
            assert_eq!(iterations, (600.0 - t_sat).ceil() as usize);
            assert!(hot_leg_temperature <= 601.0);
        }
        other => panic!("expected SearchExceeded, got {other:?}"),
    }
    assert_eq!(solver.efficiency(&spec), DEGENERATE_EFFICIENCY);
}

#[test]
fn superheated_hp_exhaust_is_infeasible() {
    let solver = RankineCycleSolver::new(If97);
    let spec = RankineCycleSpec {
        heat_rate: 350_000.0,
        mid_pressure: 2_000_000.0,
        ..RankineCycleSpec::default()
    };
    match solver.evaluate(&spec) {
        Err(CycleError::InfeasibleQuality { hp_exhaust, .. }) => assert!(hp_exhaust > 1.0),
        other => panic!("expected InfeasibleQuality, got {other:?}"),
    }
    assert_eq!(solver.efficiency(&spec), DEGENERATE_EFFICIENCY);
}

#[test]
fn invalid_inputs_are_rejected() {
    let solver = RankineCycleSolver::new(If97);
    let zero_flow = RankineCycleSpec {
        mass_flow_rate: 0.0,
        ..RankineCycleSpec::default()
    };
    assert_eq!(
        solver.evaluate(&zero_flow),
        Err(CycleError::InvalidSpec("mass_flow_rate"))
    );
    let nan_heat = RankineCycleSpec {
        heat_rate: f64::NAN,
        ..RankineCycleSpec::default()
    };
    assert_eq!(
        solver.evaluate(&nan_heat),
        Err(CycleError::InvalidSpec("heat_rate"))
    );

    let bad_step = RankineCycleSolver::with_settings(
        If97,
        SolverSettings {
            temperature_step: 0.0,
            ..SolverSettings::default()
        },
    );
    assert_eq!(
        bad_step.evaluate(&RankineCycleSpec::default()),
        Err(CycleError::InvalidSpec("temperature_step"))
    );
}

#[test]
fn supercritical_steam_generator_pressure_fails_in_property_lookup() {
    let solver = RankineCycleSolver::new(If97);
    let spec = RankineCycleSpec {
        sg_pressure: 25.0e6,
        ..RankineCycleSpec::default()
    };
    assert!(matches!(solver.evaluate(&spec), Err(CycleError::Property(_))));
}

#[test]
fn falling_hot_leg_enthalpy_is_degenerate() {
    let props = HotLegOverride {
        enthalpy: |t: f64, _p: f64| 3.0e6 - 1.0e4 * (t - 560.0),
    };
    let solver = RankineCycleSolver::new(props);
    let spec = RankineCycleSpec {
        heat_rate: 400_000.0,
        ..RankineCycleSpec::default()
    };
    assert!(matches!(
        solver.evaluate(&spec),
        Err(CycleError::DegenerateCycle { .. })
    ));
}

#[test]
fn hot_leg_below_feed_enthalpy_is_degenerate() {
    let props = HotLegOverride {
        enthalpy: |_t: f64, _p: f64| 1.0e5,
    };
    let solver = RankineCycleSolver::new(props);
    let spec = RankineCycleSpec {
        heat_rate: -1.0e6,
        ..RankineCycleSpec::default()
    };
    match solver.evaluate(&spec) {
        Err(CycleError::DegenerateCycle {
            hot_leg_enthalpy,
            feed_enthalpy,
            ..
        }) => assert!(hot_leg_enthalpy < feed_enthalpy),
        other => panic!("expected DegenerateCycle, got {other:?}"),
    }
    assert_eq!(solver.efficiency(&spec), DEGENERATE_EFFICIENCY);
}

#[test]
fn turbine_work_below_pump_work_is_negative_efficiency() {
    // 고온측 엔탈피가 등엔트로피 팽창 엔탈피보다 낮으면 고압 터빈 일이 음수가 된다.
    let props = HotLegOverride {
        enthalpy: |_t: f64, _p: f64| 5.0e5,
    };
    let solver = RankineCycleSolver::new(props);
    let spec = RankineCycleSpec {
        heat_rate: 1_000.0,
        ..RankineCycleSpec::default()
    };
    match solver.evaluate(&spec) {
        Err(CycleError::NegativeEfficiency(eta)) => assert!(eta < 0.0),
        other => panic!("expected NegativeEfficiency, got {other:?}"),
    }
    assert_eq!(solver.efficiency(&spec), DEGENERATE_EFFICIENCY);
}

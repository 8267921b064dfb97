use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::stations::{CycleBoundary, StationPoints};
use super::{CycleError, RankineCycleSpec};
use crate::steam::properties::PropertyService;

/// 평가 실패 시 효율 자리에 기록하는 값.
pub const DEGENERATE_EFFICIENCY: f64 = -1.0;

/// 고온측 온도 탐색 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// 탐색 증분(K)
    pub temperature_step: f64,
    /// 탐색 상한 온도(K). 기본값은 IF97 Region 2 상한(800 °C).
    pub max_hot_leg_temperature: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            temperature_step: 1.0,
            max_hot_leg_temperature: 1073.15,
        }
    }
}

/// 증기 1 kg 기준 일·열 분해(J/kg).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleWork {
    pub hp_turbine: f64,
    /// 분리 증기 분율(x2s)을 곱한 저압 터빈 일
    pub lp_turbine: f64,
    pub condensate_pump: f64,
    pub feed_pump: f64,
    pub heat_input: f64,
}

impl CycleWork {
    fn from_stations(st: &StationPoints) -> Self {
        let x2 = st.separation_quality();
        Self {
            hp_turbine: st.hot_leg.enthalpy - st.hp_exhaust.enthalpy,
            lp_turbine: x2 * (st.lp_inlet.enthalpy - st.lp_exhaust.enthalpy),
            condensate_pump: x2 * (st.condensate_pump.enthalpy - st.condensate.enthalpy),
            feed_pump: st.feed_pump.enthalpy - st.mixed_feed.enthalpy,
            heat_input: st.heat_rise(),
        }
    }

    pub fn net_work(&self) -> f64 {
        self.hp_turbine + self.lp_turbine - self.condensate_pump - self.feed_pump
    }

    pub fn efficiency(&self) -> f64 {
        self.net_work() / self.heat_input
    }
}

/// 수렴한 사이클 평가 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    pub efficiency: f64,
    /// 수렴한 고온측 온도 T1(K)
    pub hot_leg_temperature: f64,
    pub iterations: usize,
    pub stations: StationPoints,
    pub work: CycleWork,
}

enum SearchState {
    Searching {
        hot_leg_temperature: f64,
        previous_rise: Option<f64>,
    },
    Converged {
        hot_leg_temperature: f64,
        stations: StationPoints,
    },
    Degenerate {
        hot_leg_temperature: f64,
        stations: StationPoints,
    },
}

/// 외부 입열률 제약을 만족하는 고온측 상태를 찾아 사이클 효율을 계산한다.
///
/// 포화온도에서 출발해 `temperature_step`씩 T1을 올리며 상태점을 다시 계산하고,
/// `h1 - h8a`가 `heat_rate / mass_flow_rate` 이상이 되면 멈춘다.
#[derive(Debug, Clone)]
pub struct RankineCycleSolver<P> {
    properties: P,
    settings: SolverSettings,
}

impl<P: PropertyService> RankineCycleSolver<P> {
    pub fn new(properties: P) -> Self {
        Self::with_settings(properties, SolverSettings::default())
    }

    pub fn with_settings(properties: P, settings: SolverSettings) -> Self {
        Self {
            properties,
            settings,
        }
    }

    pub fn properties(&self) -> &P {
        &self.properties
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// 사이클을 평가한다. 실패는 이 평가 한 건에만 국한된 `CycleError`로 반환한다.
    pub fn evaluate(&self, spec: &RankineCycleSpec) -> Result<CycleResult, CycleError> {
        spec.validate()?;
        let step = self.settings.temperature_step;
        if !(step.is_finite() && step > 0.0) {
            return Err(CycleError::InvalidSpec("temperature_step"));
        }

        let boundary = CycleBoundary::new(spec, &self.properties)?;
        let required_rise = spec.required_enthalpy_rise();
        let start = boundary.steam_generator().temperature;
        let max_temperature = self.settings.max_hot_leg_temperature;
        let max_iterations = ((max_temperature - start) / step).ceil().max(0.0) as usize;

        let mut iterations = 0usize;
        let mut state = SearchState::Searching {
            hot_leg_temperature: start,
            previous_rise: None,
        };
        let (hot_leg_temperature, stations) = loop {
            state = match state {
                SearchState::Searching {
                    hot_leg_temperature,
                    previous_rise,
                } => {
                    if iterations >= max_iterations {
                        return Err(CycleError::SearchExceeded {
                            iterations,
                            hot_leg_temperature,
                        });
                    }
                    let t1 = hot_leg_temperature + step;
                    iterations += 1;
                    let stations = boundary.stations_at(&self.properties, t1)?;
                    let rise = stations.heat_rise();
                    if rise >= required_rise {
                        if stations.hot_leg.enthalpy < stations.feed_pump.enthalpy {
                            SearchState::Degenerate {
                                hot_leg_temperature: t1,
                                stations,
                            }
                        } else {
                            SearchState::Converged {
                                hot_leg_temperature: t1,
                                stations,
                            }
                        }
                    } else if previous_rise.is_some_and(|prev| rise < prev) {
                        SearchState::Degenerate {
                            hot_leg_temperature: t1,
                            stations,
                        }
                    } else {
                        SearchState::Searching {
                            hot_leg_temperature: t1,
                            previous_rise: Some(rise),
                        }
                    }
                }
                SearchState::Converged {
                    hot_leg_temperature,
                    stations,
                } => break (hot_leg_temperature, stations),
                SearchState::Degenerate {
                    hot_leg_temperature,
                    stations,
                } => {
                    return Err(CycleError::DegenerateCycle {
                        hot_leg_temperature,
                        hot_leg_enthalpy: stations.hot_leg.enthalpy,
                        feed_enthalpy: stations.feed_pump.enthalpy,
                    })
                }
            };
        };

        let work = CycleWork::from_stations(&stations);
        let efficiency = work.efficiency();
        debug!(
            t1 = hot_leg_temperature,
            iterations,
            x2s = stations.separation_quality(),
            efficiency,
            "랭킨 사이클 수렴"
        );

        if efficiency < 0.0 {
            return Err(CycleError::NegativeEfficiency(efficiency));
        }
        let hp_exhaust = stations.separation_quality();
        let lp_exhaust = stations.lp_exhaust_quality();
        if hp_exhaust > 1.0 || lp_exhaust > 1.0 {
            return Err(CycleError::InfeasibleQuality {
                hp_exhaust,
                lp_exhaust,
            });
        }

        Ok(CycleResult {
            efficiency,
            hot_leg_temperature,
            iterations,
            stations,
            work,
        })
    }

    /// 사이클 효율. 평가에 실패하면 경고 이벤트를 남기고 [`DEGENERATE_EFFICIENCY`]를 반환한다.
    pub fn efficiency(&self, spec: &RankineCycleSpec) -> f64 {
        match self.evaluate(spec) {
            Ok(result) => result.efficiency,
            Err(err) => {
                warn!(
                    mass_flow_rate = spec.mass_flow_rate,
                    mid_pressure = spec.mid_pressure,
                    error = %err,
                    "랭킨 사이클 평가 실패"
                );
                DEGENERATE_EFFICIENCY
            }
        }
    }
}

//! 붕괴열을 열원으로 하는 물 작동유체 랭킨 사이클 효율 계산.
//!
//! 모든 입력과 출력은 절대 SI 기본 단위(K, J, Pa, s, kg)를 사용한다.

pub mod rankine;
pub mod stations;
pub mod study;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::steam::properties::PropertyError;

pub use rankine::{
    CycleResult, CycleWork, RankineCycleSolver, SolverSettings, DEGENERATE_EFFICIENCY,
};
pub use stations::{CycleBoundary, SaturationLine, StationPoint, StationPoints};
pub use study::{CycleStudy, CycleTemplate, WorkingFluid};

fn unit_efficiency() -> f64 {
    1.0
}

/// 랭킨 사이클 1회 평가에 필요한 물리 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankineCycleSpec {
    /// 열원 입열률(W)
    pub heat_rate: f64,
    /// 증기발생기 통과 질량유량(kg/s)
    pub mass_flow_rate: f64,
    /// 증기발생기 출구 압력(Pa)
    pub sg_pressure: f64,
    /// 고압 터빈 출구(중간단) 압력(Pa)
    pub mid_pressure: f64,
    /// 복수기 온도(K)
    pub condenser_temperature: f64,
    /// 고압 터빈 등엔트로피 효율
    #[serde(default = "unit_efficiency")]
    pub hp_turbine_efficiency: f64,
    /// 저압 터빈 등엔트로피 효율
    #[serde(default = "unit_efficiency")]
    pub lp_turbine_efficiency: f64,
    /// 복수 펌프 효율
    #[serde(default = "unit_efficiency")]
    pub condensate_pump_efficiency: f64,
    /// 급수 펌프 효율
    #[serde(default = "unit_efficiency")]
    pub feed_pump_efficiency: f64,
}

impl RankineCycleSpec {
    /// 증기발생기에서 요구되는 비엔탈피 상승(J/kg).
    pub fn required_enthalpy_rise(&self) -> f64 {
        self.heat_rate / self.mass_flow_rate
    }

    /// 유한성·부호를 점검한다. 압력 조합의 물리적 타당성은 탐색 단계에서 드러난다.
    pub fn validate(&self) -> Result<(), CycleError> {
        let positive = [
            ("mass_flow_rate", self.mass_flow_rate),
            ("sg_pressure", self.sg_pressure),
            ("mid_pressure", self.mid_pressure),
            ("condenser_temperature", self.condenser_temperature),
            ("hp_turbine_efficiency", self.hp_turbine_efficiency),
            ("lp_turbine_efficiency", self.lp_turbine_efficiency),
            ("condensate_pump_efficiency", self.condensate_pump_efficiency),
            ("feed_pump_efficiency", self.feed_pump_efficiency),
        ];
        if let Some(&(name, _)) = positive
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
        {
            return Err(CycleError::InvalidSpec(name));
        }
        if !self.heat_rate.is_finite() {
            return Err(CycleError::InvalidSpec("heat_rate"));
        }
        Ok(())
    }
}

impl Default for RankineCycleSpec {
    fn default() -> Self {
        Self {
            heat_rate: 250_000.0,
            mass_flow_rate: 0.114,
            sg_pressure: 7_750_000.0,
            mid_pressure: 345_000.0,
            condenser_temperature: 311.0,
            hp_turbine_efficiency: 0.85,
            lp_turbine_efficiency: 0.85,
            condensate_pump_efficiency: 0.85,
            feed_pump_efficiency: 0.85,
        }
    }
}

/// 사이클 평가 실패. 모두 해당 평가 한 건에만 국한된다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CycleError {
    /// 엔탈피 순서가 깨져 에너지 수지를 맞출 수 없음
    #[error("퇴화된 사이클: T1 = {hot_leg_temperature:.2} K에서 h1 = {hot_leg_enthalpy:.1}, h8a = {feed_enthalpy:.1} J/kg")]
    DegenerateCycle {
        hot_leg_temperature: f64,
        hot_leg_enthalpy: f64,
        feed_enthalpy: f64,
    },
    #[error("사이클 효율이 음수입니다: {0}")]
    NegativeEfficiency(f64),
    /// 터빈 출구 건도가 1을 넘어 습증기 가정이 깨짐
    #[error("터빈 출구 건도가 1을 초과합니다 (x2s = {hp_exhaust:.4}, x4a = {lp_exhaust:.4})")]
    InfeasibleQuality { hp_exhaust: f64, lp_exhaust: f64 },
    #[error("고온측 온도 탐색 한계 초과: {iterations}회, T1 = {hot_leg_temperature:.2} K")]
    SearchExceeded {
        iterations: usize,
        hot_leg_temperature: f64,
    },
    #[error("잘못된 사이클 입력: {0}")]
    InvalidSpec(&'static str),
    #[error(transparent)]
    Property(#[from] PropertyError),
}

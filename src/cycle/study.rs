//! 질량유량 × 중간단 압력 2차원 파라메트릭 스터디.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::rankine::RankineCycleSolver;
use super::{unit_efficiency, RankineCycleSpec};
use crate::export::{self, ExportError, ResultMatrix};
use crate::steam::properties::PropertyService;

/// 작동유체. 현재는 물만 지원한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingFluid {
    #[default]
    Water,
}

/// 스터디 축을 제외한 고정 사이클 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleTemplate {
    pub heat_rate: f64,
    pub sg_pressure: f64,
    pub condenser_temperature: f64,
    #[serde(default = "unit_efficiency")]
    pub hp_turbine_efficiency: f64,
    #[serde(default = "unit_efficiency")]
    pub lp_turbine_efficiency: f64,
    #[serde(default = "unit_efficiency")]
    pub condensate_pump_efficiency: f64,
    #[serde(default = "unit_efficiency")]
    pub feed_pump_efficiency: f64,
}

impl CycleTemplate {
    /// 효율을 모두 1로 둔 템플릿.
    pub fn ideal(heat_rate: f64, sg_pressure: f64, condenser_temperature: f64) -> Self {
        Self {
            heat_rate,
            sg_pressure,
            condenser_temperature,
            hp_turbine_efficiency: 1.0,
            lp_turbine_efficiency: 1.0,
            condensate_pump_efficiency: 1.0,
            feed_pump_efficiency: 1.0,
        }
    }

    pub fn spec(&self, mass_flow_rate: f64, mid_pressure: f64) -> RankineCycleSpec {
        RankineCycleSpec {
            heat_rate: self.heat_rate,
            mass_flow_rate,
            sg_pressure: self.sg_pressure,
            mid_pressure,
            condenser_temperature: self.condenser_temperature,
            hp_turbine_efficiency: self.hp_turbine_efficiency,
            lp_turbine_efficiency: self.lp_turbine_efficiency,
            condensate_pump_efficiency: self.condensate_pump_efficiency,
            feed_pump_efficiency: self.feed_pump_efficiency,
        }
    }
}

impl From<RankineCycleSpec> for CycleTemplate {
    fn from(spec: RankineCycleSpec) -> Self {
        Self {
            heat_rate: spec.heat_rate,
            sg_pressure: spec.sg_pressure,
            condenser_temperature: spec.condenser_temperature,
            hp_turbine_efficiency: spec.hp_turbine_efficiency,
            lp_turbine_efficiency: spec.lp_turbine_efficiency,
            condensate_pump_efficiency: spec.condensate_pump_efficiency,
            feed_pump_efficiency: spec.feed_pump_efficiency,
        }
    }
}

/// 랭킨 사이클 2차원 파라메트릭 스터디와 결과 행렬.
///
/// 행은 질량유량, 열은 중간단 압력이다. 실패한 격자점에는 효율 대신
/// [`DEGENERATE_EFFICIENCY`](super::DEGENERATE_EFFICIENCY)가 기록되고 스윕은 계속된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStudy {
    pub name: String,
    #[serde(default)]
    pub working_fluid: WorkingFluid,
    pub template: CycleTemplate,
    pub mass_flow_rates: Vec<f64>,
    pub mid_pressures: Vec<f64>,
    #[serde(default)]
    pub file_name: Option<PathBuf>,
    #[serde(skip)]
    results: Option<ResultMatrix>,
}

impl CycleStudy {
    pub fn new(
        name: impl Into<String>,
        template: CycleTemplate,
        mass_flow_rates: Vec<f64>,
        mid_pressures: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            working_fluid: WorkingFluid::Water,
            template,
            mass_flow_rates,
            mid_pressures,
            file_name: None,
            results: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<PathBuf>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// 마지막 실행 결과.
    pub fn results(&self) -> Option<&ResultMatrix> {
        self.results.as_ref()
    }

    /// 전체 격자를 평가한다. 격자점은 서로 독립이므로 병렬로 계산하고 인덱스 순서로 모은다.
    pub fn execute<P>(&mut self, solver: &RankineCycleSolver<P>) -> &ResultMatrix
    where
        P: PropertyService + Sync,
    {
        let template = self.template;
        let cells: Vec<(f64, f64)> = self
            .mass_flow_rates
            .iter()
            .flat_map(|&m| self.mid_pressures.iter().map(move |&p| (m, p)))
            .collect();
        let etas: Vec<f64> = match self.working_fluid {
            WorkingFluid::Water => cells
                .par_iter()
                .map(|&(mass_flow_rate, mid_pressure)| {
                    let eta = solver.efficiency(&template.spec(mass_flow_rate, mid_pressure));
                    debug!(mass_flow_rate, mid_pressure, eta, "격자점 평가");
                    eta
                })
                .collect(),
        };
        info!(study = %self.name, size = etas.len(), "스터디 계산 완료");
        self.results.insert(ResultMatrix::from_parts(
            self.mid_pressures.len(),
            self.mass_flow_rates.len(),
            etas,
        ))
    }

    /// 결과를 `dir/file_name`에 기록한다. 파일명이 없거나 실행 전이면 `None`.
    pub fn export(&self, dir: &Path) -> Result<Option<PathBuf>, ExportError> {
        let (Some(file_name), Some(results)) = (&self.file_name, &self.results) else {
            return Ok(None);
        };
        let path = dir.join(file_name);
        export::write_matrix(results, &path)?;
        Ok(Some(path))
    }
}

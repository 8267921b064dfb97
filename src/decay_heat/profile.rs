use tracing::{debug, warn};

use super::correlation::{
    corrected_finite_fraction, finite_operation_fraction, infinite_operation_fraction,
};
use super::DecayHeatError;
use crate::export::ResultMatrix;

/// 입력 시점마다 붕괴열을 계산해 보관하는 프로파일.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayHeatProfile {
    /// 프로파일을 구성하는 시점(s, 정지 후 경과 시간)
    times: Vec<f64>,
    /// 각 시점의 출력 또는 출력 분율. 생성 전에는 `None`.
    powers: Option<Vec<f64>>,
    /// 정지 전 운전 기간(s). 0이면 무한 운전으로 간주한다.
    prior_operating_duration: f64,
    /// 정지 전 운전 출력. 기본값 1이면 결과는 분율이다.
    reference_power: f64,
}

impl DecayHeatProfile {
    /// 무한 운전, 기준 출력 1로 프로파일을 만든다.
    pub fn new(times: Vec<f64>) -> Self {
        Self::with_power(times, 0.0, 1.0)
    }

    pub fn with_operation(times: Vec<f64>, prior_operating_duration: f64) -> Self {
        Self::with_power(times, prior_operating_duration, 1.0)
    }

    pub fn with_power(times: Vec<f64>, prior_operating_duration: f64, reference_power: f64) -> Self {
        Self {
            times,
            powers: None,
            prior_operating_duration,
            reference_power,
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn prior_operating_duration(&self) -> f64 {
        self.prior_operating_duration
    }

    pub fn reference_power(&self) -> f64 {
        self.reference_power
    }

    /// 생성된 출력 배열. 생성 전이면 `NotGenerated`.
    pub fn powers(&self) -> Result<&[f64], DecayHeatError> {
        self.powers.as_deref().ok_or(DecayHeatError::NotGenerated)
    }

    fn is_infinite_operation(&self) -> bool {
        self.prior_operating_duration == 0.0
    }

    /// 보정 전 ANS 근사식으로 출력을 생성한다.
    /// 운전 기간이 0이면 무한 운전식, 아니면 유한 운전식을 사용한다.
    pub fn generate_uncorrected(&mut self) -> &[f64] {
        let q = self.reference_power;
        let to = self.prior_operating_duration;
        let powers: Vec<f64> = if self.is_infinite_operation() {
            self.times
                .iter()
                .map(|&t| q * infinite_operation_fraction(t))
                .collect()
        } else {
            self.times
                .iter()
                .map(|&t| q * finite_operation_fraction(t, to))
                .collect()
        };
        debug!(samples = powers.len(), "보정 없는 붕괴열 프로파일 생성");
        self.powers.insert(powers).as_slice()
    }

    /// 보정된 상관식으로 출력을 생성한다.
    /// 보정 곡선은 유한 운전 기간에서만 정의되므로 운전 기간이 0이면 `InvalidConfiguration`.
    pub fn generate_corrected(&mut self) -> Result<&[f64], DecayHeatError> {
        if self.is_infinite_operation() {
            self.powers = None;
            let err = DecayHeatError::InvalidConfiguration(
                "보정 프로파일에는 0이 아닌 운전 기간이 필요합니다",
            );
            warn!(error = %err, "보정 프로파일 생성 건너뜀");
            return Err(err);
        }
        let q = self.reference_power;
        let to = self.prior_operating_duration;
        let powers: Vec<f64> = self
            .times
            .iter()
            .map(|&t| q * corrected_finite_fraction(t, to))
            .collect();
        debug!(samples = powers.len(), "보정된 붕괴열 프로파일 생성");
        Ok(self.powers.insert(powers).as_slice())
    }

    /// (시간, 출력) 두 열의 행렬로 평탄화한다.
    pub fn to_matrix(&self) -> Result<ResultMatrix, DecayHeatError> {
        let powers = self.powers()?;
        let values = self
            .times
            .iter()
            .zip(powers)
            .flat_map(|(&t, &p)| [t, p])
            .collect();
        Ok(ResultMatrix::from_parts(2, self.times.len(), values))
    }
}

//! 일정한 간격으로 배출되는 사용후핵연료 요소 집단(로트)의 집중 붕괴열.
//!
//! 로트는 배출 속도와 체류 시간으로 정의된다. 요소 수는 저장하지 않고 항상
//! [`derive_population`]으로 유도하므로 두 값이 어긋날 수 없다.

use tracing::{info, warn};

use super::correlation::corrected_finite_fraction;
use super::DecayHeatError;

/// 한 로트에서 평가할 수 있는 최대 요소 수(요소별 출력 배열 크기 상한).
pub const MAX_LOT_ELEMENTS: usize = 100_000_000;

/// 체류 시간 × 배출 속도로부터 로트 요소 수를 구한다 (내림).
/// 곱이 양의 유한값이 아니면 0, `usize` 범위를 넘으면 `usize::MAX`로 포화한다.
pub fn derive_population(residence_time: f64, discharge_rate: f64) -> usize {
    let raw = residence_time * discharge_rate;
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.floor() as usize
}

/// 양의 유한 `x`보다 큰 가장 작은 f64.
fn next_representable(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1)
}

/// 재계산 직후의 로트 발열 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct LotHeat {
    /// 요소별 붕괴열 (나이 오름차순)
    pub element_powers: Vec<f64>,
    /// 요소별 붕괴열 합
    pub net_heat: f64,
}

/// 로트 계산 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct LotReport {
    pub population: usize,
    pub elements_evaluated: usize,
    pub net_heat: f64,
    /// 가장 어린 요소의 붕괴열
    pub hottest_element: f64,
    /// 가장 오래된 요소의 붕괴열
    pub coldest_element: f64,
}

/// 배출 시점이 엇갈린 사용후핵연료 요소 집단.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelLot {
    /// 배출 전 운전 기간(s)
    prior_operating_duration: f64,
    /// 배출 전 요소당 평균 출력
    reference_power: f64,
    /// 체류 시간: 가장 오래된 요소의 최대 나이(s)
    residence_time: f64,
    /// 요소 나이에 더하는 오프셋(s)
    residence_offset: f64,
    /// 요소 배출 속도(개/s)
    discharge_rate: f64,
    heat: Option<LotHeat>,
}

fn validate_rate(discharge_rate: f64) -> Result<f64, DecayHeatError> {
    if discharge_rate.is_finite() && discharge_rate > 0.0 {
        Ok(discharge_rate)
    } else {
        Err(DecayHeatError::InvalidConfiguration(
            "배출 속도는 양의 유한값이어야 합니다",
        ))
    }
}

impl FuelLot {
    /// 배출 속도로 로트를 정의한다.
    pub fn from_discharge_rate(
        prior_operating_duration: f64,
        reference_power: f64,
        residence_time: f64,
        residence_offset: f64,
        discharge_rate: f64,
    ) -> Result<Self, DecayHeatError> {
        Ok(Self {
            prior_operating_duration,
            reference_power,
            residence_time,
            residence_offset,
            discharge_rate: validate_rate(discharge_rate)?,
            heat: None,
        })
    }

    /// 요소 수로 로트를 정의한다. 배출 속도는 `population / residence_time`이며,
    /// [`derive_population`]이 정확히 `population`을 돌려주도록 최소 단위로 보정된다.
    pub fn from_population(
        prior_operating_duration: f64,
        reference_power: f64,
        residence_time: f64,
        residence_offset: f64,
        population: usize,
    ) -> Result<Self, DecayHeatError> {
        if !(residence_time.is_finite() && residence_time > 0.0) || population == 0 {
            return Err(DecayHeatError::InvalidConfiguration(
                "요소 수로 정의한 로트는 양의 체류 시간과 1개 이상의 요소가 필요합니다",
            ));
        }
        // 나눗셈 반올림으로 곱이 요소 수에 못 미치면 내림 결과가 맞을 때까지 올린다.
        let mut discharge_rate = population as f64 / residence_time;
        while discharge_rate.is_finite()
            && derive_population(residence_time, discharge_rate) < population
        {
            discharge_rate = next_representable(discharge_rate);
        }
        Self::from_discharge_rate(
            prior_operating_duration,
            reference_power,
            residence_time,
            residence_offset,
            discharge_rate,
        )
    }

    pub fn prior_operating_duration(&self) -> f64 {
        self.prior_operating_duration
    }

    pub fn reference_power(&self) -> f64 {
        self.reference_power
    }

    pub fn residence_time(&self) -> f64 {
        self.residence_time
    }

    pub fn residence_offset(&self) -> f64 {
        self.residence_offset
    }

    pub fn discharge_rate(&self) -> f64 {
        self.discharge_rate
    }

    pub fn population_size(&self) -> usize {
        derive_population(self.residence_time, self.discharge_rate)
    }

    /// 체류 시간을 바꾸고 이전 계산 결과를 무효화한다.
    pub fn set_residence_time(&mut self, residence_time: f64) {
        self.residence_time = residence_time;
        self.heat = None;
    }

    pub fn set_residence_offset(&mut self, residence_offset: f64) {
        self.residence_offset = residence_offset;
        self.heat = None;
    }

    /// 배출 속도를 바꾸고 이전 계산 결과를 무효화한다.
    pub fn set_discharge_rate(&mut self, discharge_rate: f64) -> Result<(), DecayHeatError> {
        self.discharge_rate = validate_rate(discharge_rate)?;
        self.heat = None;
        Ok(())
    }

    /// 마지막 재계산 결과. 입력이 바뀐 뒤에는 `None`.
    pub fn heat(&self) -> Option<&LotHeat> {
        self.heat.as_ref()
    }

    pub fn net_heat(&self) -> Option<f64> {
        self.heat.as_ref().map(|h| h.net_heat)
    }

    pub fn element_powers(&self) -> Option<&[f64]> {
        self.heat.as_ref().map(|h| h.element_powers.as_slice())
    }

    /// 요소별 붕괴열을 다시 계산하고 합산한다.
    ///
    /// 오프셋에서 출발해 `1/discharge_rate`씩 나이를 늘린 뒤 계산하며,
    /// 체류 시간 경계의 요소까지 포함하도록 `population + 1`개를 평가한다.
    /// 평가 요소 수가 [`MAX_LOT_ELEMENTS`]를 넘으면 `InvalidConfiguration`을 반환하고
    /// 이전 결과는 지운다.
    pub fn recompute(&mut self) -> Result<&LotHeat, DecayHeatError> {
        self.heat = None;
        let population = self.population_size();
        let count = match population.checked_add(1) {
            Some(count) if count <= MAX_LOT_ELEMENTS => count,
            _ => {
                return Err(DecayHeatError::InvalidConfiguration(
                    "로트 요소 수가 계산 가능한 상한을 넘습니다",
                ))
            }
        };
        let step = 1.0 / self.discharge_rate;
        let mut ts = self.residence_offset;
        let mut element_powers = Vec::with_capacity(count);
        let mut net_heat = 0.0;
        for _ in 0..count {
            ts += step;
            let q = self.reference_power * corrected_finite_fraction(ts, self.prior_operating_duration);
            element_powers.push(q);
            net_heat += q;
        }
        info!(
            population,
            residence_time = self.residence_time,
            net_heat,
            "로트 집중 붕괴열 계산 완료"
        );
        Ok(&*self.heat.insert(LotHeat {
            element_powers,
            net_heat,
        }))
    }

    /// 마지막 재계산 결과 요약. 재계산 전이면 `None`.
    pub fn report(&self) -> Option<LotReport> {
        let heat = self.heat.as_ref()?;
        Some(LotReport {
            population: self.population_size(),
            elements_evaluated: heat.element_powers.len(),
            net_heat: heat.net_heat,
            hottest_element: heat.element_powers.first().copied().unwrap_or(0.0),
            coldest_element: heat.element_powers.last().copied().unwrap_or(0.0),
        })
    }
}

/// 체류 시간별 로트 집중 붕괴열을 계산한다.
///
/// 기준 로트를 복제해 각 체류 시간으로 덮어쓰고 재계산하므로 반복 간 상태가 남지 않는다.
/// 재계산에 실패한 체류 시간은 경고 이벤트를 남기고 0으로 기록한 뒤 계속한다.
pub fn residence_study(reference_lot: &FuelLot, residence_times: &[f64]) -> Vec<f64> {
    let mut lot = reference_lot.clone();
    residence_times
        .iter()
        .map(|&tr| {
            lot.set_residence_time(tr);
            match lot.recompute() {
                Ok(heat) => heat.net_heat,
                Err(err) => {
                    warn!(residence_time = tr, error = %err, "체류 시간 평가 실패, 0으로 기록");
                    0.0
                }
            }
        })
        .collect()
}

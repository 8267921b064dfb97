//! ANS 1군 붕괴열 근사식(Todreas & Kazimi, Nuclear Systems Vol. 1)과 경험 보정 곡선.
//!
//! 모든 함수는 정격 출력 대비 붕괴열 분율을 반환한다. 구간 경계는 반개구간
//! `[start, end)`이며 경계값은 항상 위쪽 구간의 식으로 계산한다.

use tracing::warn;

use super::DecayHeatError;

/// 상관식 유효 구간 시작(s)
pub const DOMAIN_START: f64 = 1.5;
/// 상관식 유효 구간 끝(s, 미포함)
pub const DOMAIN_END: f64 = 1.0e10;

#[derive(Debug, Clone, Copy)]
enum Curve {
    /// a·ln(ts) + b
    LogLinear { slope: f64, intercept: f64 },
    /// a·ts^b
    PowerLaw { coefficient: f64, exponent: f64 },
    /// a·exp(b·ts)
    Exponential { coefficient: f64, rate: f64 },
}

impl Curve {
    fn eval(self, ts: f64) -> f64 {
        match self {
            Curve::LogLinear { slope, intercept } => slope * ts.ln() + intercept,
            Curve::PowerLaw {
                coefficient,
                exponent,
            } => coefficient * ts.powf(exponent),
            Curve::Exponential { coefficient, rate } => coefficient * (ts * rate).exp(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Regime {
    start: f64,
    end: f64,
    curve: Curve,
}

const ANS_REGIMES: [Regime; 6] = [
    Regime {
        start: 1.5,
        end: 4.0e2,
        curve: Curve::LogLinear {
            slope: -0.006_145_75,
            intercept: 0.060_157,
        },
    },
    Regime {
        start: 4.0e2,
        end: 4.0e5,
        curve: Curve::PowerLaw {
            coefficient: 0.140_58,
            exponent: -0.286,
        },
    },
    Regime {
        start: 4.0e5,
        end: 4.0e6,
        curve: Curve::PowerLaw {
            coefficient: 0.870_3,
            exponent: -0.425_5,
        },
    },
    Regime {
        start: 4.0e6,
        end: 4.0e7,
        curve: Curve::PowerLaw {
            coefficient: 12.842,
            exponent: -0.601_4,
        },
    },
    Regime {
        start: 4.0e7,
        end: 4.0e8,
        curve: Curve::PowerLaw {
            coefficient: 40_683.0,
            exponent: -1.067_5,
        },
    },
    Regime {
        start: 4.0e8,
        end: 1.0e10,
        curve: Curve::Exponential {
            coefficient: 0.000_039_113,
            rate: -0.000_000_000_735_41,
        },
    },
];

/// 구간 경계(s). 첫 값은 유효 구간 시작, 마지막 값은 끝.
pub const REGIME_BOUNDARIES: [f64; 7] = [1.5, 4.0e2, 4.0e5, 4.0e6, 4.0e7, 4.0e8, 1.0e10];

/// `ts`가 속한 ANS 구간 번호(0~5). 유효 범위 밖이면 `None`.
pub fn regime_index(ts: f64) -> Option<usize> {
    ANS_REGIMES
        .iter()
        .position(|r| r.start <= ts && ts < r.end)
}

/// 구간 `regime`의 식을 구간 판정 없이 `ts`에 적용한다. 경계 연속성 확인용.
pub fn regime_value(regime: usize, ts: f64) -> Option<f64> {
    ANS_REGIMES.get(regime).map(|r| r.curve.eval(ts))
}

/// 무한 운전 후 `ts`초 시점 붕괴열 분율. 유효 범위 밖이면 `OutOfDomain`.
pub fn try_infinite_operation_fraction(ts: f64) -> Result<f64, DecayHeatError> {
    regime_index(ts)
        .map(|i| ANS_REGIMES[i].curve.eval(ts))
        .ok_or(DecayHeatError::OutOfDomain { ts })
}

/// 무한 운전 후 `ts`초 시점 붕괴열 분율.
/// 유효 범위 밖의 시간은 경고 이벤트를 남기고 0으로 처리한다.
pub fn infinite_operation_fraction(ts: f64) -> f64 {
    match try_infinite_operation_fraction(ts) {
        Ok(q) => q,
        Err(err) => {
            warn!(ts, error = %err, "붕괴열 시간이 유효 범위를 벗어나 0으로 처리");
            0.0
        }
    }
}

/// 유한 운전 기간 `to` 이후의 붕괴열 분율 (중첩: inf(ts) - inf(ts + to)).
pub fn finite_operation_fraction(ts: f64, to: f64) -> f64 {
    infinite_operation_fraction(ts) - infinite_operation_fraction(ts + to)
}

/// 냉각 시간별 경험 보정 계수.
pub fn correction_factor(ts: f64) -> f64 {
    if (1.5..1.0e7).contains(&ts) {
        0.7724
    } else if (1.0e7..2.7e7).contains(&ts) {
        0.9 * (-0.000_000_022 * (ts - 1.0e7)).exp()
    } else if (2.7e7..1.25e8).contains(&ts) {
        0.3 * ((ts - 3.0e7) * 0.000_000_041_5 + 1.0).ln() + 0.6202
    } else {
        1.05
    }
}

/// 보정된 유한 운전 붕괴열 분율. 하류 계산(로트, 보정 프로파일)이 사용하는 기본 상관식.
pub fn corrected_finite_fraction(ts: f64, to: f64) -> f64 {
    finite_operation_fraction(ts, to) * correction_factor(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_table_matches_regimes() {
        for (i, r) in ANS_REGIMES.iter().enumerate() {
            assert_eq!(r.start, REGIME_BOUNDARIES[i]);
            assert_eq!(r.end, REGIME_BOUNDARIES[i + 1]);
        }
    }

    #[test]
    fn nan_is_out_of_domain() {
        assert!(regime_index(f64::NAN).is_none());
        assert_eq!(infinite_operation_fraction(f64::NAN), 0.0);
    }
}

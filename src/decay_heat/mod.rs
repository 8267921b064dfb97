//! 사용후핵연료 붕괴열 계산 모듈 모음.
//! ANS 1군 붕괴열 상관식, 단일 출력 이력 프로파일, 배출 연료 로트 합산으로 구성한다.

pub mod correlation;
pub mod lot;
pub mod profile;

use thiserror::Error;

pub use correlation::{
    corrected_finite_fraction, correction_factor, finite_operation_fraction,
    infinite_operation_fraction, try_infinite_operation_fraction,
};
pub use lot::{
    derive_population, residence_study, FuelLot, LotHeat, LotReport, MAX_LOT_ELEMENTS,
};
pub use profile::DecayHeatProfile;

/// 붕괴열 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecayHeatError {
    /// 상관식 유효 시간 범위(1.5 s ~ 1e10 s) 밖
    #[error("냉각 시간 {ts} s가 상관식 유효 범위를 벗어났습니다")]
    OutOfDomain { ts: f64 },
    /// 계산에 필요한 입력 조합이 잘못됨
    #[error("잘못된 설정: {0}")]
    InvalidConfiguration(&'static str),
    /// 출력 배열을 생성하기 전에 조회함
    #[error("붕괴열 출력이 아직 생성되지 않았습니다")]
    NotGenerated,
}

//! 물/증기 물성 계산 모듈 모음.

pub mod if97;
pub mod properties;

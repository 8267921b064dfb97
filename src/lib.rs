//! 사용후핵연료 붕괴열 계산과 붕괴열 구동 랭킨 사이클 효율 스터디 라이브러리.
//! CLI는 얇은 껍데기이고 계산 로직은 모두 여기에 둔다.

pub mod app;
pub mod config;
pub mod cycle;
pub mod decay_heat;
pub mod export;
pub mod steam;

//! 사이클 계산이 사용하는 물성 조회 인터페이스.
//!
//! 모든 값은 SI 기준(Pa, K, J/kg, J/kg·K, kg/m³)이다. 기본 구현 [`If97`]은
//! seuif97 크레이트(IAPWS-IF97)에 계산을 위임한다.

use thiserror::Error;

use super::if97;

/// 물성 조회 실패.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// 유효 범위를 벗어난 입력
    #[error("물성 범위를 벗어남: {0}")]
    OutOfRange(&'static str),
    /// IF97 계산 결과가 NaN/무한대
    #[error("IF97 {quantity} 계산 실패 (p = {pressure} Pa, T = {temperature} K)")]
    NotFinite {
        quantity: &'static str,
        pressure: f64,
        temperature: f64,
    },
}

pub type PropertyResult<T> = Result<T, PropertyError>;

/// 물/증기 물성 오라클.
pub trait PropertyService {
    /// 포화온도(K)
    fn saturation_temperature(&self, pressure: f64) -> PropertyResult<f64>;
    /// 포화압력(Pa)
    fn saturation_pressure(&self, temperature: f64) -> PropertyResult<f64>;
    /// 포화수 비엔탈피(J/kg)
    fn liquid_enthalpy(&self, pressure: f64) -> PropertyResult<f64>;
    /// 포화증기 비엔탈피(J/kg)
    fn vapor_enthalpy(&self, pressure: f64) -> PropertyResult<f64>;
    /// 포화수 엔트로피(J/kg·K)
    fn liquid_entropy(&self, pressure: f64) -> PropertyResult<f64>;
    /// 포화증기 엔트로피(J/kg·K)
    fn vapor_entropy(&self, pressure: f64) -> PropertyResult<f64>;
    /// 포화수 밀도(kg/m³)
    fn liquid_density(&self, pressure: f64) -> PropertyResult<f64>;
    fn enthalpy_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64>;
    fn entropy_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64>;
    fn density_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64>;
    fn temperature_ph(&self, pressure: f64, enthalpy: f64) -> PropertyResult<f64>;
}

/// seuif97 기반 IAPWS-IF97 물성.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct If97;

impl PropertyService for If97 {
    fn saturation_temperature(&self, pressure: f64) -> PropertyResult<f64> {
        if97::saturation_temperature(pressure)
    }

    fn saturation_pressure(&self, temperature: f64) -> PropertyResult<f64> {
        if97::saturation_pressure(temperature)
    }

    fn liquid_enthalpy(&self, pressure: f64) -> PropertyResult<f64> {
        if97::saturated_phase_props(pressure, false).map(|(h, _, _)| h)
    }

    fn vapor_enthalpy(&self, pressure: f64) -> PropertyResult<f64> {
        if97::saturated_phase_props(pressure, true).map(|(h, _, _)| h)
    }

    fn liquid_entropy(&self, pressure: f64) -> PropertyResult<f64> {
        if97::saturated_phase_props(pressure, false).map(|(_, _, s)| s)
    }

    fn vapor_entropy(&self, pressure: f64) -> PropertyResult<f64> {
        if97::saturated_phase_props(pressure, true).map(|(_, _, s)| s)
    }

    fn liquid_density(&self, pressure: f64) -> PropertyResult<f64> {
        if97::saturated_phase_props(pressure, false).map(|(_, v, _)| 1.0 / v)
    }

    fn enthalpy_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64> {
        if97::region_props(pressure, temperature).map(|(h, _, _)| h)
    }

    fn entropy_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64> {
        if97::region_props(pressure, temperature).map(|(_, _, s)| s)
    }

    fn density_tp(&self, temperature: f64, pressure: f64) -> PropertyResult<f64> {
        if97::region_props(pressure, temperature).map(|(_, v, _)| 1.0 / v)
    }

    fn temperature_ph(&self, pressure: f64, enthalpy: f64) -> PropertyResult<f64> {
        if97::temperature_from_ph(pressure, enthalpy)
    }
}

//! 랭킨 사이클 상태점 계산.
//!
//! 상태점 번호:
//! 1 증기발생기 출구, 2 고압 터빈 출구, 3 습분 분리 후 저압 터빈 입구,
//! 4 저압 터빈 출구, 5 복수기 출구, 6 복수 펌프 출구, 7 혼합 급수,
//! 8 급수 펌프 출구, 9 분리기 드레인. `s`는 등엔트로피, `a`는 실제 과정.

use super::{CycleError, RankineCycleSpec};
use crate::steam::properties::PropertyService;

/// 한 압력에서의 포화 액/증기 물성.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationLine {
    pub pressure: f64,
    pub temperature: f64,
    pub liquid_enthalpy: f64,
    pub vapor_enthalpy: f64,
    pub liquid_entropy: f64,
    pub vapor_entropy: f64,
    pub liquid_density: f64,
}

impl SaturationLine {
    pub fn at_pressure<P: PropertyService + ?Sized>(
        props: &P,
        pressure: f64,
    ) -> Result<Self, CycleError> {
        Ok(Self {
            pressure,
            temperature: props.saturation_temperature(pressure)?,
            liquid_enthalpy: props.liquid_enthalpy(pressure)?,
            vapor_enthalpy: props.vapor_enthalpy(pressure)?,
            liquid_entropy: props.liquid_entropy(pressure)?,
            vapor_entropy: props.vapor_entropy(pressure)?,
            liquid_density: props.liquid_density(pressure)?,
        })
    }

    pub fn quality_from_entropy(&self, entropy: f64) -> f64 {
        (entropy - self.liquid_entropy) / (self.vapor_entropy - self.liquid_entropy)
    }

    pub fn quality_from_enthalpy(&self, enthalpy: f64) -> f64 {
        (enthalpy - self.liquid_enthalpy) / (self.vapor_enthalpy - self.liquid_enthalpy)
    }

    pub fn enthalpy_at_quality(&self, quality: f64) -> f64 {
        self.liquid_enthalpy + quality * (self.vapor_enthalpy - self.liquid_enthalpy)
    }
}

/// 상태점 하나. 사이클 관계식에 필요 없는 값은 `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationPoint {
    pub pressure: f64,
    pub temperature: Option<f64>,
    pub enthalpy: f64,
    pub entropy: Option<f64>,
    pub quality: Option<f64>,
}

impl StationPoint {
    fn new(pressure: f64, enthalpy: f64) -> Self {
        Self {
            pressure,
            temperature: None,
            enthalpy,
            entropy: None,
            quality: None,
        }
    }

    fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn with_entropy(mut self, entropy: f64) -> Self {
        self.entropy = Some(entropy);
        self
    }

    fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// 고온측 온도와 무관하게 한 번만 계산되는 경계 상태.
///
/// 중간단 포화선, 복수기 포화선, 저압 터빈(3→4)과 복수 펌프(5→6)가 여기에 속한다.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleBoundary {
    spec: RankineCycleSpec,
    steam_generator: SaturationLine,
    mid: SaturationLine,
    condenser: SaturationLine,
    lp_inlet: StationPoint,
    lp_exhaust_ideal: StationPoint,
    lp_exhaust: StationPoint,
    condensate: StationPoint,
    condensate_pump_ideal: StationPoint,
    condensate_pump: StationPoint,
    separator_drain: StationPoint,
}

impl CycleBoundary {
    pub fn new<P: PropertyService + ?Sized>(
        spec: &RankineCycleSpec,
        props: &P,
    ) -> Result<Self, CycleError> {
        let steam_generator = SaturationLine::at_pressure(props, spec.sg_pressure)?;
        let mid = SaturationLine::at_pressure(props, spec.mid_pressure)?;
        let condenser_pressure = props.saturation_pressure(spec.condenser_temperature)?;
        let condenser = SaturationLine {
            temperature: spec.condenser_temperature,
            ..SaturationLine::at_pressure(props, condenser_pressure)?
        };

        // 3: 분리된 포화 증기
        let lp_inlet = StationPoint::new(mid.pressure, mid.vapor_enthalpy)
            .with_temperature(mid.temperature)
            .with_entropy(mid.vapor_entropy)
            .with_quality(1.0);

        // 3 -> 4: 저압 터빈 팽창
        let x4s = condenser.quality_from_entropy(mid.vapor_entropy);
        let h4s = condenser.enthalpy_at_quality(x4s);
        let h4a = lp_inlet.enthalpy - spec.lp_turbine_efficiency * (lp_inlet.enthalpy - h4s);
        let x4a = condenser.quality_from_enthalpy(h4a);
        let lp_exhaust_ideal = StationPoint::new(condenser.pressure, h4s)
            .with_temperature(condenser.temperature)
            .with_entropy(mid.vapor_entropy)
            .with_quality(x4s);
        let lp_exhaust = StationPoint::new(condenser.pressure, h4a)
            .with_temperature(condenser.temperature)
            .with_quality(x4a);

        // 5 -> 6: 복수 펌프 (비압축성 근사)
        let condensate = StationPoint::new(condenser.pressure, condenser.liquid_enthalpy)
            .with_temperature(condenser.temperature)
            .with_entropy(condenser.liquid_entropy)
            .with_quality(0.0);
        let h6s = condensate.enthalpy + (mid.pressure - condenser.pressure) / condenser.liquid_density;
        let h6a = condensate.enthalpy + (h6s - condensate.enthalpy) / spec.condensate_pump_efficiency;
        let condensate_pump_ideal = StationPoint::new(mid.pressure, h6s);
        let condensate_pump = StationPoint::new(mid.pressure, h6a);

        // 9: 분리기 드레인(포화수)
        let separator_drain = StationPoint::new(mid.pressure, mid.liquid_enthalpy)
            .with_temperature(mid.temperature)
            .with_entropy(mid.liquid_entropy)
            .with_quality(0.0);

        Ok(Self {
            spec: *spec,
            steam_generator,
            mid,
            condenser,
            lp_inlet,
            lp_exhaust_ideal,
            lp_exhaust,
            condensate,
            condensate_pump_ideal,
            condensate_pump,
            separator_drain,
        })
    }

    pub fn spec(&self) -> &RankineCycleSpec {
        &self.spec
    }

    pub fn steam_generator(&self) -> &SaturationLine {
        &self.steam_generator
    }

    pub fn mid(&self) -> &SaturationLine {
        &self.mid
    }

    pub fn condenser(&self) -> &SaturationLine {
        &self.condenser
    }

    /// 고온측 온도 `t1`에서 전체 상태점을 계산한다.
    pub fn stations_at<P: PropertyService + ?Sized>(
        &self,
        props: &P,
        t1: f64,
    ) -> Result<StationPoints, CycleError> {
        let spec = &self.spec;
        let mid = &self.mid;

        let h1 = props.enthalpy_tp(t1, spec.sg_pressure)?;
        let s1 = props.entropy_tp(t1, spec.sg_pressure)?;
        let hot_leg = StationPoint::new(spec.sg_pressure, h1)
            .with_temperature(t1)
            .with_entropy(s1);

        // 1 -> 2: 고압 터빈 팽창
        let x2s = mid.quality_from_entropy(s1);
        let h2s = mid.enthalpy_at_quality(x2s);
        let h2a = h1 - spec.hp_turbine_efficiency * (h1 - h2s);
        let x2a = mid.quality_from_enthalpy(h2a);
        let hp_exhaust_ideal = StationPoint::new(mid.pressure, h2s)
            .with_temperature(mid.temperature)
            .with_entropy(s1)
            .with_quality(x2s);
        let hp_exhaust = StationPoint::new(mid.pressure, h2a)
            .with_temperature(mid.temperature)
            .with_quality(x2a);

        // 7: 복수와 드레인의 혼합. 분리 증기 분율은 등엔트로피 팽창 건도 x2s로 둔다.
        let h7 = x2s * self.condensate_pump.enthalpy + (1.0 - x2s) * self.separator_drain.enthalpy;
        let t7 = props.temperature_ph(mid.pressure, h7)?;
        let rho7 = props.density_tp(t7, mid.pressure)?;
        let mixed_feed = StationPoint::new(mid.pressure, h7).with_temperature(t7);

        // 7 -> 8: 급수 펌프
        let h8s = h7 + (spec.sg_pressure - mid.pressure) / rho7;
        let h8a = h7 + (h8s - h7) / spec.feed_pump_efficiency;
        let feed_pump_ideal = StationPoint::new(spec.sg_pressure, h8s);
        let feed_pump = StationPoint::new(spec.sg_pressure, h8a);

        Ok(StationPoints {
            hot_leg,
            hp_exhaust_ideal,
            hp_exhaust,
            lp_inlet: self.lp_inlet,
            lp_exhaust_ideal: self.lp_exhaust_ideal,
            lp_exhaust: self.lp_exhaust,
            condensate: self.condensate,
            condensate_pump_ideal: self.condensate_pump_ideal,
            condensate_pump: self.condensate_pump,
            mixed_feed,
            feed_pump_ideal,
            feed_pump,
            separator_drain: self.separator_drain,
        })
    }
}

/// 한 평가 단계의 전체 상태점.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPoints {
    /// 1
    pub hot_leg: StationPoint,
    /// 2s
    pub hp_exhaust_ideal: StationPoint,
    /// 2a
    pub hp_exhaust: StationPoint,
    /// 3
    pub lp_inlet: StationPoint,
    /// 4s
    pub lp_exhaust_ideal: StationPoint,
    /// 4a
    pub lp_exhaust: StationPoint,
    /// 5
    pub condensate: StationPoint,
    /// 6s
    pub condensate_pump_ideal: StationPoint,
    /// 6a
    pub condensate_pump: StationPoint,
    /// 7
    pub mixed_feed: StationPoint,
    /// 8s
    pub feed_pump_ideal: StationPoint,
    /// 8a
    pub feed_pump: StationPoint,
    /// 9
    pub separator_drain: StationPoint,
}

impl StationPoints {
    /// 경계 상태를 새로 계산한 뒤 `t1`에서의 상태점을 구한다.
    pub fn evaluate<P: PropertyService + ?Sized>(
        spec: &RankineCycleSpec,
        props: &P,
        t1: f64,
    ) -> Result<Self, CycleError> {
        CycleBoundary::new(spec, props)?.stations_at(props, t1)
    }

    /// 증기발생기 엔탈피 상승 h1 - h8a (J/kg).
    pub fn heat_rise(&self) -> f64 {
        self.hot_leg.enthalpy - self.feed_pump.enthalpy
    }

    /// 습분 분리기로 들어가는 증기 분율 x2s (등엔트로피 팽창 건도).
    /// 혼합 급수, 저압 터빈·복수 펌프 일의 가중치, 건도 점검에 쓰인다.
    pub fn separation_quality(&self) -> f64 {
        self.hp_exhaust_ideal.quality.unwrap_or(0.0)
    }

    /// 고압 터빈 출구 실제 건도 x2a. 보고용.
    pub fn hp_exhaust_quality(&self) -> f64 {
        self.hp_exhaust.quality.unwrap_or(0.0)
    }

    /// 저압 터빈 출구 실제 건도 x4a.
    pub fn lp_exhaust_quality(&self) -> f64 {
        self.lp_exhaust.quality.unwrap_or(0.0)
    }
}

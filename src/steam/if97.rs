//! IAPWS-IF97 계산을 seuif97 크레이트로 위임한 래퍼.
//! 입력: 압력(Pa, 절대), 온도(K)
//! 출력: (엔탈피[J/kg], 비체적[m³/kg], 엔트로피[J/kg·K])

use seuif97::{ph, pt, OH, OS, OT, OV};

use super::properties::{PropertyError, PropertyResult};

const PA_PER_MPA: f64 = 1.0e6;
const KELVIN_OFFSET: f64 = 273.15;
const J_PER_KJ: f64 = 1000.0;

// ---------------- Region 4 (포화) ----------------
const P4_STAR_MPA: f64 = 22.064;
const T4_STAR_K: f64 = 647.096;
const T4_MIN_K: f64 = 273.15;
/// Region 1/2 강제 계산으로 포화 물성을 구할 수 있는 상한(Region 3 경계).
pub const SATURATION_PHASE_LIMIT_PA: f64 = 16.529_164_252_605e6;
const R4_N: [f64; 6] = [
    -7.859_517_83,
    1.844_082_59,
    -11.786_649_7,
    22.680_741_1,
    -15.961_871_9,
    1.801_225_02,
];

fn checked(quantity: &'static str, p_pa: f64, t_k: f64, value: f64) -> PropertyResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PropertyError::NotFinite {
            quantity,
            pressure: p_pa,
            temperature: t_k,
        })
    }
}

fn props_in_region(p_pa: f64, t_k: f64, region: Option<i32>) -> PropertyResult<(f64, f64, f64)> {
    let p_mpa = p_pa / PA_PER_MPA;
    let t_c = t_k - KELVIN_OFFSET;
    let (h_kj, v, s_kj) = match region {
        Some(r) => (
            pt(p_mpa, t_c, (OH, r)),
            pt(p_mpa, t_c, (OV, r)),
            pt(p_mpa, t_c, (OS, r)),
        ),
        None => (pt(p_mpa, t_c, OH), pt(p_mpa, t_c, OV), pt(p_mpa, t_c, OS)),
    };
    Ok((
        checked("enthalpy", p_pa, t_k, h_kj)? * J_PER_KJ,
        checked("specific volume", p_pa, t_k, v)?,
        checked("entropy", p_pa, t_k, s_kj)? * J_PER_KJ,
    ))
}

/// Region 1(압축수) 강제 계산. 입력은 Pa(abs)/K.
pub fn region1_props(p_pa: f64, t_k: f64) -> PropertyResult<(f64, f64, f64)> {
    props_in_region(p_pa, t_k, Some(1))
}

/// Region 2(과열 증기) 강제 계산. 입력은 Pa(abs)/K.
pub fn region2_props(p_pa: f64, t_k: f64) -> PropertyResult<(f64, f64, f64)> {
    props_in_region(p_pa, t_k, Some(2))
}

/// 온도·압력에 따라 자동 영역을 판정해 h/v/s를 반환한다.
pub fn region_props(p_pa: f64, t_k: f64) -> PropertyResult<(f64, f64, f64)> {
    props_in_region(p_pa, t_k, None)
}

/// 압력(Pa)과 비엔탈피(J/kg)로부터 온도(K)를 역산한다.
pub fn temperature_from_ph(p_pa: f64, h_j: f64) -> PropertyResult<f64> {
    let t_c = ph(p_pa / PA_PER_MPA, h_j / J_PER_KJ, OT);
    if t_c.is_finite() {
        Ok(t_c + KELVIN_OFFSET)
    } else {
        Err(PropertyError::NotFinite {
            quantity: "temperature",
            pressure: p_pa,
            temperature: f64::NAN,
        })
    }
}

fn region4_exponent(t_k: f64) -> f64 {
    let theta = 1.0 - t_k / T4_STAR_K;
    (T4_STAR_K / t_k)
        * (R4_N[0] * theta
            + R4_N[1] * theta.powf(1.5)
            + R4_N[2] * theta.powi(3)
            + R4_N[3] * theta.powf(3.5)
            + R4_N[4] * theta.powi(4)
            + R4_N[5] * theta.powf(7.5))
}

/// 포화압력(Pa abs) - 입력 온도는 K.
pub fn saturation_pressure(t_k: f64) -> PropertyResult<f64> {
    if !(T4_MIN_K..=T4_STAR_K).contains(&t_k) {
        return Err(PropertyError::OutOfRange(
            "IF97 Region4 유효 범위를 벗어났습니다 (273.15~647.096 K)",
        ));
    }
    Ok(P4_STAR_MPA * region4_exponent(t_k).exp() * PA_PER_MPA)
}

/// 포화온도(K) - 입력 압력은 Pa abs.
pub fn saturation_temperature(p_pa: f64) -> PropertyResult<f64> {
    if !(p_pa > 0.0 && p_pa <= P4_STAR_MPA * PA_PER_MPA) {
        return Err(PropertyError::OutOfRange(
            "포화 압력은 0 초과 22.064 MPa 이하여야 합니다.",
        ));
    }
    let target = (p_pa / PA_PER_MPA / P4_STAR_MPA).ln();
    let mut t_k = 373.15_f64;
    for _ in 0..30 {
        let theta = 1.0 - t_k / T4_STAR_K;
        let f = region4_exponent(t_k) - target;
        let dtheta_dt = -1.0 / T4_STAR_K;
        let dfdtheta = R4_N[0]
            + 1.5 * R4_N[1] * theta.powf(0.5)
            + 3.0 * R4_N[2] * theta.powi(2)
            + 3.5 * R4_N[3] * theta.powf(2.5)
            + 4.0 * R4_N[4] * theta.powi(3)
            + 7.5 * R4_N[5] * theta.powf(6.5);
        let dfd_t = -(region4_exponent(t_k) / t_k) + (T4_STAR_K / t_k) * dfdtheta * dtheta_dt;
        let delta = f / dfd_t;
        t_k -= delta;
        if delta.abs() < 1e-8 {
            break;
        }
    }
    checked("saturation temperature", p_pa, t_k, t_k)
}

/// 포화선 위의 액/증기 물성을 Region 1/2 강제 계산으로 구한다.
/// Region 3 경계(약 16.53 MPa) 이상에서는 오류를 반환한다.
pub fn saturated_phase_props(p_pa: f64, vapor: bool) -> PropertyResult<(f64, f64, f64)> {
    if p_pa > SATURATION_PHASE_LIMIT_PA {
        return Err(PropertyError::OutOfRange(
            "포화 액/증기 물성은 16.53 MPa 이하에서만 계산합니다.",
        ));
    }
    let t_sat = saturation_temperature(p_pa)?;
    if vapor {
        region2_props(p_pa, t_sat)
    } else {
        region1_props(p_pa, t_sat)
    }
}

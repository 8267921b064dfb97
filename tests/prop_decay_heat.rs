//! 붕괴열 상관식과 로트 합산의 성질 기반 테스트.

use proptest::prelude::*;
use snf_power_toolbox::decay_heat::{
    corrected_finite_fraction, derive_population, finite_operation_fraction,
    infinite_operation_fraction, FuelLot,
};

proptest! {
    /// 유한 운전식은 두 무한 운전식의 차와 정확히 같다.
    #[test]
    fn finite_is_difference_of_infinite(
        log_ts in 0.2f64..9.9,
        log_to in 0.0f64..9.0,
    ) {
        let ts = 10f64.powf(log_ts);
        let to = 10f64.powf(log_to);
        prop_assert_eq!(
            finite_operation_fraction(ts, to),
            infinite_operation_fraction(ts) - infinite_operation_fraction(ts + to)
        );
    }

    /// 유효 범위 안의 분율은 양수이고 1보다 작다.
    #[test]
    fn infinite_fraction_is_a_fraction(log_ts in 0.18f64..9.99) {
        let q = infinite_operation_fraction(10f64.powf(log_ts));
        prop_assert!(q > 0.0 && q < 1.0);
    }

    /// 요소 수는 체류 시간 × 배출 속도의 내림이다.
    #[test]
    fn population_is_floor_of_product(
        residence_time in 1.0e3f64..1.0e9,
        rate in 1.0e-6f64..1.0e-2,
    ) {
        let raw = residence_time * rate;
        prop_assert_eq!(derive_population(residence_time, rate), raw.floor() as usize);
    }

    /// 요소 수로 만든 로트는 같은 요소 수를 유도한다.
    #[test]
    fn population_constructor_matches_floor(
        population in 1usize..10_000,
        residence_time in 1.0e3f64..1.0e9,
    ) {
        let lot = FuelLot::from_population(441_806_400.0, 0.555, residence_time, 0.0, population).unwrap();
        prop_assert_eq!(lot.population_size(), population);
        let raw = residence_time * lot.discharge_rate();
        prop_assert_eq!(raw.floor() as usize, population);
        prop_assert_eq!(derive_population(residence_time * 0.999_9, lot.discharge_rate()), population - 1);
    }

    /// 로트 합은 요소별 출력의 합이다.
    #[test]
    fn lot_net_heat_is_sum_of_elements(
        population in 1usize..200,
        residence_years in 0.5f64..5.0,
        offset in 0.0f64..1.0e6,
    ) {
        let tr = residence_years * 31_557_600.0;
        let mut lot = FuelLot::from_population(441_806_400.0, 0.555, tr, offset, population).unwrap();
        let heat = lot.recompute().unwrap().clone();
        prop_assert_eq!(heat.element_powers.len(), population + 1);
        let sum: f64 = heat.element_powers.iter().sum();
        prop_assert!((heat.net_heat - sum).abs() <= 1e-12 * sum.abs().max(1.0));
        let step = tr / population as f64;
        let first = 0.555 * corrected_finite_fraction(offset + step, 441_806_400.0);
        prop_assert!((heat.element_powers[0] - first).abs() <= 1e-12 * first);
    }
}

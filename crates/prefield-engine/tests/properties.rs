//! Property tests over whole runs.

use prefield_core::{Field, Period};
use prefield_economy::Economy;
use prefield_engine::{run, SimulationConfig, Trajectory};
use prefield_test_utils::{arb_field, arb_interior_field};
use proptest::prelude::*;

fn arb_economy() -> impl Strategy<Value = Economy> {
    prop_oneof![
        (0.1f64..10.0, 0.1f64..10.0).prop_map(|(e1, e2)| Economy::exchange(e1, e2)),
        (0.1f64..10.0).prop_map(Economy::constant_returns),
        Just(Economy::DecreasingReturns),
    ]
}

fn config_for(field: &Field, speed: f64, periods: u64, economy: Economy) -> SimulationConfig {
    SimulationConfig {
        side: field.side() as u32,
        speed,
        periods,
        economy,
    }
}

fn every_period(periods: u64) -> Vec<Period> {
    (0..periods).map(Period).collect()
}

/// The trajectory of a run, complete or not.
fn recorded(
    config: SimulationConfig,
    initial: Field,
    checkpoints: &[Period],
) -> Trajectory {
    run(config, initial, checkpoints).unwrap_or_else(|halted| halted.trajectory)
}

#[test]
fn saturated_cells_stay_in_unit_interval() {
    // Exact 0.0 and 1.0 cells next to interior values.
    let initial = Field::new(3, vec![0.0, 1.0, 0.0, 1.0, 0.5, 1.0, 0.0, 1.0, 0.0]).unwrap();
    let config = config_for(&initial, 1.0, 6, Economy::exchange(1.0, 1.0));
    let trajectory = run(config, initial, &every_period(6)).unwrap();
    for (_, field) in trajectory.snapshots.iter() {
        assert!(field.first_outside_unit_interval().is_none());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fields_stay_in_unit_interval(
        initial in arb_field(1..8),
        speed in 0.0f64..=1.0,
        economy in arb_economy(),
    ) {
        let periods = 12;
        let config = config_for(&initial, speed, periods, economy);
        let trajectory = recorded(config, initial, &every_period(periods));

        for (period, field) in trajectory.snapshots.iter() {
            prop_assert!(
                field.first_outside_unit_interval().is_none(),
                "{} left [0, 1]",
                period
            );
        }
        for &avg in trajectory.series.average_preference() {
            prop_assert!((0.0..=1.0).contains(&avg));
        }
    }

    #[test]
    fn zero_speed_freezes_the_field(
        initial in arb_interior_field(2..7),
        economy in arb_economy(),
    ) {
        let periods = 5;
        let config = config_for(&initial, 0.0, periods, economy);
        let first_ratio = economy.price_ratio(&initial).unwrap();
        let trajectory = run(config, initial.clone(), &every_period(periods)).unwrap();

        for (_, field) in trajectory.snapshots.iter() {
            prop_assert_eq!(field, &initial);
        }
        let mean = initial.mean();
        prop_assert!(trajectory.series.average_preference().iter().all(|&a| a == mean));
        prop_assert!(trajectory.series.price_ratio().iter().all(|&p| p == first_ratio));
    }

    #[test]
    fn constant_returns_price_never_moves(
        initial in arb_interior_field(2..7),
        ratio in 0.1f64..10.0,
        speed in 0.0f64..=1.0,
    ) {
        let config = config_for(&initial, speed, 8, Economy::constant_returns(ratio));
        let trajectory = recorded(config, initial, &[]);
        prop_assert!(trajectory.series.price_ratio().iter().all(|&p| p == ratio));
    }

    #[test]
    fn runs_are_bit_identical(
        initial in arb_field(1..6),
        speed in 0.0f64..=1.0,
        economy in arb_economy(),
    ) {
        let periods = 10;
        let checkpoints = [Period(0), Period(4), Period(9)];
        let config = config_for(&initial, speed, periods, economy);
        let a = run(config.clone(), initial.clone(), &checkpoints);
        let b = run(config, initial, &checkpoints);
        prop_assert_eq!(
            a.as_ref().err().map(|halted| &halted.error),
            b.as_ref().err().map(|halted| &halted.error)
        );
        let a = a.unwrap_or_else(|halted| halted.trajectory);
        let b = b.unwrap_or_else(|halted| halted.trajectory);

        prop_assert_eq!(a.series.len(), b.series.len());
        for (x, y) in a.series.records().zip(b.series.records()) {
            prop_assert_eq!(x.average_preference.to_bits(), y.average_preference.to_bits());
            prop_assert_eq!(x.price_ratio.to_bits(), y.price_ratio.to_bits());
        }
        prop_assert_eq!(
            a.snapshots.periods().collect::<Vec<_>>(),
            b.snapshots.periods().collect::<Vec<_>>()
        );
        for ((_, fa), (_, fb)) in a.snapshots.iter().zip(b.snapshots.iter()) {
            let bits_a: Vec<u64> = fa.as_slice().iter().map(|v| v.to_bits()).collect();
            let bits_b: Vec<u64> = fb.as_slice().iter().map(|v| v.to_bits()).collect();
            prop_assert_eq!(bits_a, bits_b);
        }
    }
}

//! Run the three reference experiments and print what they recorded.
//!
//! Set `RUST_LOG=prefield_engine=debug` to see every period.

use prefield_bench::{all_profiles, REFERENCE_SEED};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Locally interdependent preferences: reference runs ===\n");

    let profiles = all_profiles(REFERENCE_SEED).unwrap();
    let initial_mean = profiles[0].initial.mean();
    println!(
        "50x50 lattice, r = 0.5, seed {REFERENCE_SEED}, initial average {initial_mean:.4}\n"
    );

    for profile in &profiles {
        println!("--- {} ({} periods) ---", profile.name, profile.config.periods);
        let trajectory = match profile.run() {
            Ok(trajectory) => trajectory,
            Err(halted) => {
                println!("  halted: {}", halted.error);
                halted.trajectory
            }
        };

        let step = (trajectory.series.len() / 10).max(1);
        for record in trajectory.series.records().step_by(step) {
            println!(
                "  {:>5}: average={:>8.5}, price_ratio={:>8.5}",
                record.period.to_string(),
                record.average_preference,
                record.price_ratio,
            );
        }
        if let Some(last) = trajectory.series.last() {
            println!(
                "  final: average={:>8.5}, price_ratio={:>8.5}",
                last.average_preference, last.price_ratio,
            );
        }

        for (period, field) in trajectory.snapshots.iter() {
            let (lo, hi) = field
                .as_slice()
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            println!(
                "  snapshot {period}: mean={:.4}, min={lo:.4}, max={hi:.4}",
                field.mean()
            );
        }
        println!();
    }
}

extern crate hashcost;

use hashcost::{Algorithm, CalibrationConfig, Calibrator, DEFAULT_TIME_COST};

fn main() -> Result<(), hashcost::CalibrateError> {
    let calibrator = Calibrator::new(CalibrationConfig::default())?;
    for algorithm in Algorithm::ALL {
        let rec = calibrator.find_best_params(algorithm, DEFAULT_TIME_COST)?;
        println!(
            "{}: {} (baseline {} took {:.2} ms)",
            algorithm.profile().display_name,
            rec,
            rec.baseline_cost,
            rec.baseline_ms
        );
    }
    Ok(())
}

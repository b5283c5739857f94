#![no_main]
use hashcost::{recommend, ScalingLaw};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (bool, u32, f64, f64)| {
    let (exponential, baseline_cost, baseline_ms, target_ms) = data;
    let law = if exponential {
        ScalingLaw::Exponential
    } else {
        ScalingLaw::Linear
    };
    if let Ok(cost) = recommend(law, baseline_cost, baseline_ms, target_ms) {
        assert!(baseline_ms > 0.0);
        if exponential {
            assert!(target_ms > 0.0);
        }
        // a non-negative ratio times an unsigned baseline stays non-negative
        if !exponential && target_ms >= 0.0 {
            assert!(cost >= 0);
        }
    }
});

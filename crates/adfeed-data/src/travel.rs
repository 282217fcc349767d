//! Synthetic travel time and distance.
//!
//! The backend does not return either value; the app shows made-up figures
//! so that cards look complete. They are regenerated on every mapping.

use rand::Rng;

use adfeed_core::TravelEstimate;

/// Produces the travel estimate attached to a freshly mapped ad.
pub trait TravelEstimator: Send + Sync {
    fn estimate(&self, ad_id: &str) -> TravelEstimate;
}

/// Uniformly random estimates: 0 to 60 minutes, 0 to 20 km.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTravelEstimator;

impl TravelEstimator for RandomTravelEstimator {
    fn estimate(&self, _ad_id: &str) -> TravelEstimate {
        let mut rng = rand::thread_rng();
        TravelEstimate {
            minutes: rng.gen_range(0..=60),
            distance_km: rng.gen_range(0.0..=20.0),
        }
    }
}

/// Always returns the same estimate. Useful in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTravelEstimator(pub TravelEstimate);

impl TravelEstimator for FixedTravelEstimator {
    fn estimate(&self, _ad_id: &str) -> TravelEstimate {
        self.0
    }
}

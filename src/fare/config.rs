use crate::{fare::Fare, shared::Distance};

/// Distance tiers used to price a ride.
///
/// Up to `base_distance` the ride costs `base_fare`. Between `base_distance`
/// and `middle_distance` every started `middle_step` adds `surcharge`, past
/// `middle_distance` every started `long_step` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub base_fare: u32,
    pub base_distance: u32,
    pub middle_distance: u32,
    pub middle_step: u32,
    pub long_step: u32,
    pub surcharge: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_fare: 1250,
            base_distance: 10,
            middle_distance: 50,
            middle_step: 5,
            long_step: 8,
            surcharge: 100,
        }
    }
}

impl Config {
    pub fn calculate(&self, distance: Distance, extra_fare: Fare) -> Fare {
        let distance = distance.as_kilometers();
        let middle = distance
            .min(self.middle_distance)
            .saturating_sub(self.base_distance);
        let long = distance.saturating_sub(self.middle_distance);

        let fare = self.base_fare
            + self.surcharge * middle.div_ceil(self.middle_step)
            + self.surcharge * long.div_ceil(self.long_step);
        Fare::from_won(fare) + extra_fare
    }
}

use rand::Rng;

use crate::constants::*;
use crate::error::{BalloonError, BalloonResult};

/// Closed numeric range `[min, max]` used for every randomized balloon property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample. A degenerate range always yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    #[cfg(test)]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub balloon_count: usize,
    pub size: Bounds,
    pub speed: Bounds,
    pub drift: Bounds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balloon_count: BALLOON_COUNT,
            size: Bounds::new(MIN_SIZE, MAX_SIZE),
            speed: Bounds::new(MIN_SPEED, MAX_SPEED),
            drift: Bounds::new(MIN_DRIFT, MAX_DRIFT),
        }
    }
}

impl Config {
    pub fn with_balloon_count(mut self, count: usize) -> Self {
        self.balloon_count = count;
        self
    }

    pub fn validate(self) -> BalloonResult<Self> {
        if self.balloon_count == 0 {
            return Err(BalloonError::config("balloon count must be at least 1"));
        }
        for (name, bounds) in [("size", self.size), ("speed", self.speed), ("drift", self.drift)] {
            if !bounds.min.is_finite() || !bounds.max.is_finite() || bounds.min > bounds.max {
                return Err(BalloonError::config(format!(
                    "{name} range [{}, {}] is inverted or not finite",
                    bounds.min, bounds.max
                )));
            }
        }
        if self.size.min <= 0.0 {
            return Err(BalloonError::config("balloon size must be positive"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default().validate().unwrap();
        assert_eq!(config.balloon_count, 6);
        assert_eq!(config.size, Bounds::new(120.0, 200.0));
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = Config::default().with_balloon_count(0).validate().unwrap_err();
        assert!(matches!(err, BalloonError::Config(_)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = Config {
            speed: Bounds::new(2.0, 1.0),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("speed range"));
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let config = Config {
            size: Bounds::new(0.0, 10.0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn samples_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::new(0.2, 0.8);
        for _ in 0..1000 {
            assert!(bounds.contains(bounds.sample(&mut rng)));
        }
        assert_eq!(Bounds::new(3.0, 3.0).sample(&mut rng), 3.0);
    }
}

/// A closed range of real values, used for ray parameter culling and
/// output clamping.
///
/// `min > max` is a valid state and means the interval is empty. The default
/// interval is [`Interval::EMPTY`], so nothing is contained until bounds are
/// set explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// Unlike `f32::clamp`, this does not panic on an empty interval.
    pub fn clamp(&self, x: f32) -> f32 {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }

    /// Returns a copy of this interval with the upper bound replaced.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        let interval = Interval::new(2.0, 7.0);
        assert_eq!(interval.size(), 5.0);

        let negative = Interval::new(-5.0, 5.0);
        assert_eq!(negative.size(), 10.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));

        assert!(interval.surrounds(5.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 0.999);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.5), 0.5);
        assert_eq!(interval.clamp(0.999), 0.999);
        assert_eq!(interval.clamp(1.5), 0.999);
    }

    #[test]
    fn test_interval_clamp_empty_does_not_panic() {
        let empty = Interval::EMPTY;
        // Lower bound is checked first
        assert_eq!(empty.clamp(0.0), f32::INFINITY);
    }

    #[test]
    fn test_interval_default_is_empty() {
        let interval = Interval::default();

        assert!(interval.min > interval.max);
        assert_eq!(interval.size(), f32::NEG_INFINITY);
        assert!(!interval.contains(0.0));
        assert!(!interval.surrounds(0.0));
        assert!(!interval.contains(f32::INFINITY));
    }

    #[test]
    fn test_interval_universe() {
        let universe = Interval::UNIVERSE;

        assert!(universe.contains(0.0));
        assert!(universe.contains(1e10));
        assert!(universe.contains(-1e10));
        assert_eq!(universe.size(), f32::INFINITY);
    }

    #[test]
    fn test_interval_with_max() {
        let interval = Interval::new(0.0, f32::INFINITY).with_max(3.0);
        assert_eq!(interval, Interval::new(0.0, 3.0));
        assert!(!interval.surrounds(3.0));
    }
}

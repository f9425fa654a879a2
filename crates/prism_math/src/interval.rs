/// A closed range of ray parameters or scalar values.
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

    /// Returns true if the interval contains no values.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Narrows the interval to the overlap with `[t0, t1]`.
    ///
    /// NaN bounds leave the corresponding side unchanged.
    pub fn intersect(&self, t0: f32, t1: f32) -> Interval {
        Interval::new(self.min.max(t0), self.max.min(t1))
    }

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// The unit interval, used to clamp color channels.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}

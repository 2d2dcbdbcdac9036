// Vector type and scalar helpers

/// 2D vector used by every part of the simulation
pub type Vec2 = glam::DVec2;

/// Vector helpers named after the operations the collision code reads in
pub trait VecExt {
    /// Unit vector in the same direction, or zero for a zero-length vector
    fn unit(self) -> Self;

    /// Vector pointing from `self` to `other`
    fn to(self, other: Self) -> Self;
}

impl VecExt for Vec2 {
    fn unit(self) -> Self {
        self.normalize_or_zero()
    }

    fn to(self, other: Self) -> Self {
        other - self
    }
}

/// Map `value` linearly from `[in_min, in_max]` onto `[out_min, out_max]`
///
/// The result is not clamped; inputs outside the source range extrapolate.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Like [`remap`], but the result never leaves the output range
pub fn remap_clamped(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let (lo, hi) = if out_min <= out_max {
        (out_min, out_max)
    } else {
        (out_max, out_min)
    };
    clamp(remap(value, in_min, in_max, out_min, out_max), lo, hi)
}

/// Clamp a value into `[min, max]`
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}

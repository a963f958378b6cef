//! Numeric clamping helper.

/// Restricts `value` to the closed range `[min, max]`.
///
/// Unlike [`Ord::clamp`] this never panics: `min` is applied first and `max`
/// last, so when `min > max` the result is `max`. Works for any
/// [`PartialOrd`] type, floats included.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let value = if value < min { min } else { value };
    if value > max { max } else { value }
}

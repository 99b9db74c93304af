/// Largest value of a 16-bit output sample
pub const MAX_SAMPLE: u16 = u16::MAX;

/// Map a normalized value onto the 16-bit output range.
///
/// The input is clamped into `[0, 1]` and scaled by 65535, then rounded to the
/// nearest integer with halves rounding up (`f64::round`). NaN maps to 0.
pub fn quantize(value: f64) -> u16 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * f64::from(MAX_SAMPLE)).round() as u16
}

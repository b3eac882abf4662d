/// Truncate a floating-point coordinate toward zero.
///
/// Non-finite inputs map to zero; out-of-range values saturate.
pub(crate) fn trunc_px(v: f64) -> i64 {
    if !v.is_finite() {
        return 0;
    }
    v.trunc() as i64
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Map a unit-interval channel to `0..=255`.
pub(crate) fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

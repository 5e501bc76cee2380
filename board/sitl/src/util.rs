/// Gravity as seen by a body-fixed accelerometer, in g, for a pose in degrees
///
/// Inverse of the pitch/roll estimate made from an accelerometer sample,
/// valid for |pitch| < 90°.
pub fn body_gravity(pitch_deg: f32, roll_deg: f32) -> (f32, f32, f32) {
    let pitch = pitch_deg.to_radians();
    let roll = roll_deg.to_radians();

    let x = -pitch.cos() * roll.sin();
    let y = pitch.sin();
    let z = pitch.cos() * roll.cos();

    (x, y, z)
}

/// Convert a physical value to the nearest raw count, saturating at the i16 range
pub fn to_counts(value: f32, counts_per_unit: f32) -> i16 {
    let counts = (value * counts_per_unit).round();
    counts.clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

//! Pressure altitude
//!
//! Converts a barometric pressure into an altitude above the reference
//! pressure level using the international barometric formula:
//!
//! ```text
//! altitude = 44330 * (1 - (p / p0) ^ (1 / 5.255))
//! ```
//!
//! The only guarded input is a non-positive pressure, which yields 0 m.

/// Standard atmosphere pressure at mean sea level (hPa)
pub const SEA_LEVEL_PRESSURE_HPA: f32 = 1013.25;

/// Altitude at which the background reaches full black (m)
pub const BACKGROUND_FULL_SCALE_M: f32 = 10_000.0;

const SCALE_M: f32 = 44330.0;
const EXPONENT: f32 = 1.0 / 5.255;

/// Altitude in metres for `pressure_hpa` relative to `sea_level_hpa`.
///
/// Pressures at or below zero return 0. Nothing else is validated, so a
/// pressure above `sea_level_hpa` gives a negative altitude.
pub fn altitude_m(pressure_hpa: f32, sea_level_hpa: f32) -> f32 {
    if pressure_hpa <= 0.0 {
        return 0.0;
    }
    SCALE_M * (1.0 - libm::powf(pressure_hpa / sea_level_hpa, EXPONENT))
}

/// Altitude relative to the standard sea-level pressure
pub fn altitude_at_standard(pressure_hpa: f32) -> f32 {
    altitude_m(pressure_hpa, SEA_LEVEL_PRESSURE_HPA)
}

/// How dark the background should be for a given altitude, in `[0, 1]`.
///
/// 0 is white (at or below the reference level), 1 is black (at or above
/// [`BACKGROUND_FULL_SCALE_M`]).
pub fn background_fraction(altitude_m: f32) -> f32 {
    let fraction = altitude_m / BACKGROUND_FULL_SCALE_M;
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}

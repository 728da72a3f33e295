//! Psychrometric conversions built on the Buck saturation curve.
//!
//! All functions are pure and stateless. Temperatures are in °C, pressures
//! in Pa, relative humidities in percent. Accuracy is good over the range
//! relevant to building physics (roughly -40 to +50 °C).

/// Saturation vapour pressure over liquid water [Pa].
///
/// Arden Buck equation:
/// `e_s = 611.21 * exp((18.678 - T/234.5) * (T / (257.14 + T)))`
///
/// The curve has a singularity at T = -257.14 °C; callers stay in realistic
/// air-temperature ranges.
pub fn saturation_pressure(temperature: f64) -> f64 {
    0.61121 * ((18.678 - temperature / 234.5) * (temperature / (257.14 + temperature))).exp()
        * 1000.0
}

/// Partial vapour pressure of moist air [Pa] at the given dry-bulb
/// temperature [°C] and relative humidity [%].
pub fn vapour_pressure(temperature: f64, relative_humidity: f64) -> f64 {
    saturation_pressure(temperature) * relative_humidity / 100.0
}

/// Dew-point temperature [°C] for a given vapour pressure [Pa].
///
/// Exact inverse of [`saturation_pressure`]: with `g = ln(p / 611.21)` the
/// Buck exponent is quadratic in T, solved here in closed form. Returns NaN
/// for non-positive pressure (no dew point exists for dry air).
pub fn dew_point(vapour_pressure: f64) -> f64 {
    let g = (vapour_pressure / 611.21).ln();
    let b = 234.5 * (18.678 - g);
    let c = 234.5 * 257.14 * g;
    (b - (b * b - 4.0 * c).sqrt()) / 2.0
}

/// Relative humidity [%] of air at `temperature` [°C] holding vapour at
/// `vapour_pressure` [Pa].
///
/// Not clamped to [0, 100]: values above 100 indicate supersaturation, i.e.
/// condensation at that state point.
pub fn relative_humidity(temperature: f64, vapour_pressure: f64) -> f64 {
    vapour_pressure / saturation_pressure(temperature) * 100.0
}

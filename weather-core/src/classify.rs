use serde::Serialize;
use std::fmt;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Below this (in °C) it is cold.
pub const COLD_BELOW: f64 = 10.0;

/// At or above this (in °C) it is hot.
pub const HOT_FROM: f64 = 26.0;

/// Coarse qualitative bucket for a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemperatureCondition {
    Cold,
    Moderate,
    Hot,
    /// Only reachable for NaN.
    Unknown,
}

impl TemperatureCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureCondition::Cold => "Cold",
            TemperatureCondition::Moderate => "Moderate",
            TemperatureCondition::Hot => "Hot",
            TemperatureCondition::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TemperatureCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a Celsius temperature. Each band is inclusive on its lower bound.
pub fn classify(celsius: f64) -> TemperatureCondition {
    if celsius < COLD_BELOW {
        TemperatureCondition::Cold
    } else if celsius < HOT_FROM {
        TemperatureCondition::Moderate
    } else if celsius >= HOT_FROM {
        TemperatureCondition::Hot
    } else {
        TemperatureCondition::Unknown
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_below_ten() {
        for t in [-273.15, -40.0, 0.0, 9.0, 9.99, 9.999_999] {
            assert_eq!(classify(t), TemperatureCondition::Cold, "t = {t}");
        }
    }

    #[test]
    fn moderate_from_ten_up_to_twenty_six() {
        for t in [10.0, 10.01, 18.5, 22.0, 25.99, 25.999_999] {
            assert_eq!(classify(t), TemperatureCondition::Moderate, "t = {t}");
        }
    }

    #[test]
    fn hot_from_twenty_six() {
        for t in [26.0, 26.01, 35.0, 60.0, f64::INFINITY] {
            assert_eq!(classify(t), TemperatureCondition::Hot, "t = {t}");
        }
    }

    #[test]
    fn band_boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(classify(10.0), TemperatureCondition::Moderate);
        assert_eq!(classify(26.0), TemperatureCondition::Hot);
        assert_eq!(classify(f64::NEG_INFINITY), TemperatureCondition::Cold);
    }

    #[test]
    fn nan_falls_back_to_unknown() {
        assert_eq!(classify(f64::NAN), TemperatureCondition::Unknown);
    }

    #[test]
    fn kelvin_conversion_is_plain_subtraction() {
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
        assert!((kelvin_to_celsius(295.15) - 22.0).abs() < 1e-9);

        for k in [0.0, 250.5, 273.15, 300.0, 1000.25] {
            let back = kelvin_to_celsius(k) + KELVIN_OFFSET;
            assert!((back - k).abs() < 1e-9, "k = {k}, back = {back}");
        }
    }

    #[test]
    fn labels_render_and_serialize_as_plain_text() {
        assert_eq!(TemperatureCondition::Moderate.to_string(), "Moderate");
        let json = serde_json::to_string(&TemperatureCondition::Cold).unwrap();
        assert_eq!(json, "\"Cold\"");
    }
}

//! # Classifier
//!
//! Pure functions mapping a continuous measurement onto a discrete
//! qualitative bucket. These are the only "algorithms" shared between the
//! feed adapters, the import path and the weather overlay, so their
//! thresholds are pinned down exactly; nothing here touches I/O.

use crate::models::Severity;

/// Severity bucket for an earthquake magnitude.
///
/// Bands are inclusive on their lower bound: 6.0 is already critical,
/// 5.0 is high, 4.0 is medium, everything below is low.
pub fn seismic_severity(magnitude: f64) -> Severity {
    if magnitude >= 6.0 {
        Severity::Critical
    } else if magnitude >= 5.0 {
        Severity::High
    } else if magnitude >= 4.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Risk bucket for a river discharge reading in m³/s.
pub fn flood_risk(discharge_m3s: f64) -> Severity {
    if discharge_m3s < 100.0 {
        Severity::Low
    } else if discharge_m3s < 500.0 {
        Severity::Medium
    } else if discharge_m3s < 1000.0 {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Rainfall-rate bucket for the weather overlay, keyed off the 1-hour
/// accumulation in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainIntensity {
    NoRain,
    LightDrizzle,
    LightRain,
    ModerateRain,
    HeavyRain,
    ViolentRain,
}

impl RainIntensity {
    /// Display label, matching the monitor page badges.
    pub fn label(self) -> &'static str {
        match self {
            RainIntensity::NoRain => "No Rain",
            RainIntensity::LightDrizzle => "Light Drizzle",
            RainIntensity::LightRain => "Light Rain",
            RainIntensity::ModerateRain => "Moderate Rain",
            RainIntensity::HeavyRain => "Heavy Rain",
            RainIntensity::ViolentRain => "Violent Rain",
        }
    }

    /// Badge color per bucket. Fixed lookup table, not derived.
    pub fn color(self) -> &'static str {
        match self {
            RainIntensity::NoRain => "#6b7280",
            RainIntensity::LightDrizzle => "#bfdbfe",
            RainIntensity::LightRain => "#93c5fd",
            RainIntensity::ModerateRain => "#60a5fa",
            RainIntensity::HeavyRain => "#2563eb",
            RainIntensity::ViolentRain => "#1e3a8a",
        }
    }
}

/// Bucket a 1-hour rainfall accumulation.
pub fn rain_intensity(mm_per_hour: f64) -> RainIntensity {
    if mm_per_hour <= 0.0 {
        RainIntensity::NoRain
    } else if mm_per_hour < 0.5 {
        RainIntensity::LightDrizzle
    } else if mm_per_hour < 2.5 {
        RainIntensity::LightRain
    } else if mm_per_hour < 7.5 {
        RainIntensity::ModerateRain
    } else if mm_per_hour < 35.0 {
        RainIntensity::HeavyRain
    } else {
        RainIntensity::ViolentRain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seismic_severity_band_edges() {
        assert_eq!(seismic_severity(6.0), Severity::Critical);
        assert_eq!(seismic_severity(5.9), Severity::High);
        assert_eq!(seismic_severity(5.0), Severity::High);
        assert_eq!(seismic_severity(4.9), Severity::Medium);
        assert_eq!(seismic_severity(4.0), Severity::Medium);
        assert_eq!(seismic_severity(3.9), Severity::Low);
        assert_eq!(seismic_severity(0.0), Severity::Low);
    }

    #[test]
    fn seismic_severity_is_monotone() {
        let mut last = Severity::Low;
        for tenth in 0..100 {
            let s = seismic_severity(tenth as f64 / 10.0);
            assert!(s >= last, "severity dipped at magnitude {}", tenth as f64 / 10.0);
            last = s;
        }
    }

    #[test]
    fn flood_risk_band_edges() {
        assert_eq!(flood_risk(99.0), Severity::Low);
        assert_eq!(flood_risk(100.0), Severity::Medium);
        assert_eq!(flood_risk(499.0), Severity::Medium);
        assert_eq!(flood_risk(500.0), Severity::High);
        assert_eq!(flood_risk(999.0), Severity::High);
        assert_eq!(flood_risk(1000.0), Severity::Critical);
    }

    #[test]
    fn flood_risk_is_monotone() {
        let mut last = Severity::Low;
        for d in (0..2000).step_by(10) {
            let r = flood_risk(d as f64);
            assert!(r >= last, "risk dipped at discharge {d}");
            last = r;
        }
    }

    #[test]
    fn rain_intensity_band_edges() {
        assert_eq!(rain_intensity(0.0).label(), "No Rain");
        assert_eq!(rain_intensity(0.4).label(), "Light Drizzle");
        assert_eq!(rain_intensity(2.4).label(), "Light Rain");
        assert_eq!(rain_intensity(7.4).label(), "Moderate Rain");
        assert_eq!(rain_intensity(34.9).label(), "Heavy Rain");
        assert_eq!(rain_intensity(35.0).label(), "Violent Rain");
    }

    #[test]
    fn classification_is_deterministic() {
        for _ in 0..2 {
            assert_eq!(seismic_severity(5.5), Severity::High);
            assert_eq!(flood_risk(750.0), Severity::High);
            assert_eq!(rain_intensity(1.0), RainIntensity::LightRain);
        }
    }

    #[test]
    fn every_bucket_has_a_color() {
        assert_eq!(Severity::Low.color(), "#22c55e");
        assert_eq!(Severity::Critical.color(), "#dc2626");
        assert!(rain_intensity(50.0).color().starts_with('#'));
    }
}

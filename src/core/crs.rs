//! KBS-Einheiten und daraus abgeleitete Anzeige-Kalibrierung.
//!
//! Aus der Grundeinheit eines Referenz-KBS ergeben sich Toleranz,
//! Anzeigegenauigkeit und Standard-Schrittweite für Stationierungs-Eingaben.

use serde::{Deserialize, Serialize};

/// Grundeinheit eines Koordinatenbezugssystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    Feet,
    Yards,
    Miles,
    NauticalMiles,
    Degrees,
    Centimeters,
    Millimeters,
    Inches,
    Unknown,
}

impl DistanceUnit {
    /// Kurzsymbol für die Anzeige.
    pub fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Yards => "yd",
            DistanceUnit::Miles => "mi",
            DistanceUnit::NauticalMiles => "NM",
            DistanceUnit::Degrees => "°",
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Millimeters => "mm",
            DistanceUnit::Inches => "in",
            DistanceUnit::Unknown => "",
        }
    }

    /// Kalibrierung (Toleranz, Anzeige-Nachkommastellen, Schrittweite).
    ///
    /// Die Toleranz entspricht 10 cm in der jeweiligen Einheit.
    pub fn calibration(self) -> CrsCalibration {
        let (tolerance, precision, default_step) = match self {
            DistanceUnit::Meters => (0.1, 2, 1.0),
            DistanceUnit::Kilometers => (0.0001, 3, 0.001),
            DistanceUnit::Feet => (0.1 / 0.3048, 1, 1.0),
            DistanceUnit::Yards => (0.1 / 0.9144, 1, 0.001),
            DistanceUnit::Miles => (0.1 / 1609.344, 3, 0.001),
            DistanceUnit::NauticalMiles => (0.1 / 1852.0, 3, 0.001),
            DistanceUnit::Degrees => (1e-5, 5, 1e-4),
            DistanceUnit::Centimeters => (10.0, 0, 10.0),
            DistanceUnit::Millimeters => (100.0, 0, 100.0),
            DistanceUnit::Inches => (0.1 / 0.0254, 0, 10.0),
            DistanceUnit::Unknown => (0.1, 0, 1.0),
        };
        CrsCalibration {
            unit: self,
            tolerance,
            display_precision: precision,
            default_step,
        }
    }

    /// Grobe Einheiten-Schätzung für bekannte EPSG-Codes.
    ///
    /// Wird vom Default-`CrsTransformer::map_units` benutzt, wenn der Host
    /// keine eigene Auskunft liefert.
    pub fn guess_from_authid(authid: &str) -> Self {
        let Some(code) = authid
            .strip_prefix("EPSG:")
            .and_then(|code| code.trim().parse::<u32>().ok())
        else {
            return DistanceUnit::Unknown;
        };

        match code {
            // Geographische Systeme (WGS84, ETRS89, NAD83, GDA94, ...)
            4326 | 4258 | 4269 | 4283 | 4230 | 4314 | 4171 | 4674 => DistanceUnit::Degrees,
            // UTM (WGS84 Nord/Süd, ETRS89), Web-Mercator, Gauß-Krüger, CH, UK
            32601..=32660 | 32701..=32760 | 25828..=25838 | 3857 | 31466..=31469 | 2056
            | 27700 | 3035 => DistanceUnit::Meters,
            // US State Plane (Fuß-Varianten)
            2225..=2284 => DistanceUnit::Feet,
            _ => DistanceUnit::Unknown,
        }
    }
}

/// Aus der KBS-Einheit abgeleitete Anzeige-/Eingabe-Werte.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrsCalibration {
    pub unit: DistanceUnit,
    /// Toleranz für numerische Gleichheit von Stationierungen
    pub tolerance: f64,
    /// Anzahl Nachkommastellen in der Anzeige
    pub display_precision: u32,
    /// Standard-Schrittweite für Stationierungs-Eingaben
    pub default_step: f64,
}

impl CrsCalibration {
    /// `true` für Systeme in Grad.
    pub fn is_geographic(&self) -> bool {
        self.unit == DistanceUnit::Degrees
    }

    /// Toleranz `10^-precision` für "liegt auf der Linie"-Prüfungen.
    pub fn position_tolerance(&self) -> f64 {
        10f64.powi(-(self.display_precision as i32))
    }

    /// Formatiert einen Wert mit fester Nachkommastellenzahl.
    ///
    /// Nicht-endliche Werte werden als `-` dargestellt.
    pub fn format(&self, value: f64, with_unit: bool) -> String {
        if !value.is_finite() {
            return "-".to_string();
        }
        let prec = self.display_precision as usize;
        let symbol = self.unit.symbol();
        if with_unit && !symbol.is_empty() {
            format!("{value:.prec$} {symbol}")
        } else {
            format!("{value:.prec$}")
        }
    }
}

impl Default for CrsCalibration {
    fn default() -> Self {
        DistanceUnit::Unknown.calibration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kalibrierung_tabelle() {
        let m = DistanceUnit::Meters.calibration();
        assert_eq!((m.tolerance, m.display_precision, m.default_step), (0.1, 2, 1.0));

        let ft = DistanceUnit::Feet.calibration();
        assert_relative_eq!(ft.tolerance, 0.328, epsilon = 1e-3);
        assert_eq!(ft.display_precision, 1);

        let yd = DistanceUnit::Yards.calibration();
        assert_relative_eq!(yd.tolerance, 0.109, epsilon = 1e-3);
        assert_eq!(yd.default_step, 0.001);

        let mi = DistanceUnit::Miles.calibration();
        assert_relative_eq!(mi.tolerance, 6.2e-5, epsilon = 1e-6);

        let nm = DistanceUnit::NauticalMiles.calibration();
        assert_relative_eq!(nm.tolerance, 5.4e-5, epsilon = 1e-6);

        let deg = DistanceUnit::Degrees.calibration();
        assert_eq!((deg.tolerance, deg.display_precision, deg.default_step), (1e-5, 5, 1e-4));
        assert!(deg.is_geographic());

        let inch = DistanceUnit::Inches.calibration();
        assert_relative_eq!(inch.tolerance, 3.94, epsilon = 1e-2);
        assert_eq!((inch.display_precision, inch.default_step), (0, 10.0));

        let cm = DistanceUnit::Centimeters.calibration();
        assert_eq!((cm.tolerance, cm.display_precision, cm.default_step), (10.0, 0, 10.0));
        let mm = DistanceUnit::Millimeters.calibration();
        assert_eq!((mm.tolerance, mm.display_precision, mm.default_step), (100.0, 0, 100.0));
        let km = DistanceUnit::Kilometers.calibration();
        assert_eq!((km.tolerance, km.display_precision, km.default_step), (0.0001, 3, 0.001));

        let unknown = DistanceUnit::Unknown.calibration();
        assert_eq!(
            (unknown.tolerance, unknown.display_precision, unknown.default_step),
            (0.1, 0, 1.0)
        );
    }

    #[test]
    fn test_einheit_aus_authid() {
        assert_eq!(DistanceUnit::guess_from_authid("EPSG:4326"), DistanceUnit::Degrees);
        assert_eq!(DistanceUnit::guess_from_authid("EPSG:25832"), DistanceUnit::Meters);
        assert_eq!(DistanceUnit::guess_from_authid("EPSG:2227"), DistanceUnit::Feet);
        assert_eq!(DistanceUnit::guess_from_authid("USER:100000"), DistanceUnit::Unknown);
        assert_eq!(DistanceUnit::guess_from_authid(""), DistanceUnit::Unknown);
    }

    #[test]
    fn test_format_mit_einheit() {
        let m = DistanceUnit::Meters.calibration();
        assert_eq!(m.format(12.3456, true), "12.35 m");
        assert_eq!(m.format(12.3456, false), "12.35");
        assert_eq!(m.format(f64::NAN, true), "-");
        assert_eq!(DistanceUnit::Unknown.calibration().format(3.6, true), "4");
        assert_relative_eq!(m.position_tolerance(), 0.01);
    }
}

//! Einzelner Stützpunkt einer Polylinie mit optionalem Z und M.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stützpunkt `(x, y, z?, m?)`.
///
/// Ob Z/M vorhanden sind, legt die umgebende `Polyline` einheitlich fest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    /// Höhe (nur bei Z-Geometrien)
    pub z: Option<f64>,
    /// Messwert (nur bei M-Geometrien)
    pub m: Option<f64>,
}

impl Vertex {
    /// Erstellt einen 2D-Stützpunkt ohne Z/M.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// Erstellt einen Stützpunkt mit M-Wert.
    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }

    /// Erstellt einen Stützpunkt mit Z-Wert.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    /// Erstellt einen Stützpunkt mit Z- und M-Wert.
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    /// Erstellt einen 2D-Stützpunkt aus einem Vektor.
    pub fn from_xy(p: DVec2) -> Self {
        Self::new(p.x, p.y)
    }

    /// 2D-Position als Vektor.
    pub fn xy(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Gleiche Z/M-Werte, neue 2D-Position.
    pub fn with_xy(self, p: DVec2) -> Self {
        Self {
            x: p.x,
            y: p.y,
            ..self
        }
    }

    /// 2D-Abstand zu einem anderen Stützpunkt.
    pub fn distance(&self, other: &Vertex) -> f64 {
        self.xy().distance(other.xy())
    }

    /// Lineare Interpolation aller vorhandenen Dimensionen.
    ///
    /// Bei `t >= 1` wird `other` exakt zurückgegeben, bei `t <= 0` `self`.
    pub fn lerp(&self, other: &Vertex, t: f64) -> Vertex {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        Vertex {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: lerp_opt(self.z, other.z, t),
            m: lerp_opt(self.m, other.m, t),
        }
    }

    /// Prüft 2D-Gleichheit innerhalb einer absoluten Toleranz.
    pub fn coincides(&self, other: &Vertex, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

fn lerp_opt(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_interpoliert_z_und_m() {
        let a = Vertex::xyzm(0.0, 0.0, 100.0, 0.0);
        let b = Vertex::xyzm(10.0, 0.0, 110.0, 20.0);

        let mid = a.lerp(&b, 0.5);
        assert_relative_eq!(mid.x, 5.0);
        assert_relative_eq!(mid.z.expect("Z erwartet"), 105.0);
        assert_relative_eq!(mid.m.expect("M erwartet"), 10.0);
    }

    #[test]
    fn test_lerp_grenzen_exakt() {
        let a = Vertex::xym(0.1, 0.2, 0.3);
        let b = Vertex::xym(0.7, 0.9, 1.1);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}

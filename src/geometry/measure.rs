//! Längenmessung entlang der Linie: Interpolation bei N und Lotfußpunkt-Suche.

use glam::DVec2;

use crate::core::{LrError, Polyline, Vertex};

/// Summe der 2D-Segmentlängen.
pub fn length(line: &Polyline) -> f64 {
    line.length()
}

/// Prüft `value ∈ [lo, hi]` mit relativer Rundungstoleranz und klemmt.
///
/// Liefert `None`, wenn der Wert außerhalb liegt.
pub(crate) fn clamp_with_rounding(value: f64, lo: f64, hi: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let tolerance = (hi - lo).abs() * 1e-12;
    if value < lo - tolerance || value > hi + tolerance {
        return None;
    }
    Some(value.clamp(lo, hi))
}

/// Interpoliert den Stützpunkt bei N-Stationierung `n`.
///
/// Mehrteilige Linien werden als Verkettung ihrer Teile behandelt.
/// `n = 0` und `n = length` liefern exakt den ersten bzw. letzten Stützpunkt.
pub fn interpolate_n(line: &Polyline, n: f64) -> Result<Vertex, LrError> {
    let total = line.length();
    let n = clamp_with_rounding(n, 0.0, total).ok_or(LrError::StationingOutOfRange)?;

    let first = line.first_vertex().ok_or(LrError::InterpolationFailed)?;
    let last = line.last_vertex().ok_or(LrError::InterpolationFailed)?;
    if n <= 0.0 {
        return Ok(*first);
    }
    if n >= total {
        return Ok(*last);
    }

    let mut accumulated = 0.0;
    for part in line.parts() {
        for segment in part.windows(2) {
            let (a, b) = (&segment[0], &segment[1]);
            let seg_len = a.distance(b);
            if seg_len <= 0.0 {
                continue;
            }
            if n <= accumulated + seg_len {
                let t = (n - accumulated) / seg_len;
                return Ok(a.lerp(b, t));
            }
            accumulated += seg_len;
        }
    }

    // Nur durch Rundung der Summen erreichbar
    Ok(*last)
}

/// Lotfußpunkt von `q` auf der Linie als N-Stationierung.
///
/// Bei gleich weit entfernten Kandidaten gewinnt die kleinste Stationierung.
/// Das Ergebnis liegt immer in `[0, length(line)]`, auch wenn die aufsummierten
/// Segmentlängen um Rundungsfehler davon abweichen.
/// `None` bei leerer Geometrie.
pub fn locate_point(line: &Polyline, q: DVec2) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    let mut accumulated = 0.0;

    for part in line.parts() {
        for segment in part.windows(2) {
            let a = segment[0].xy();
            let b = segment[1].xy();
            let (t, dist_sq) = project_on_segment(a, b, q);
            let seg_len = a.distance(b);
            consider(&mut best, dist_sq, accumulated + t * seg_len);
            accumulated += seg_len;
        }
    }

    let total = line.length();
    best.map(|(_, n)| n.clamp(0.0, total))
}

fn consider(best: &mut Option<(f64, f64)>, dist_sq: f64, n: f64) {
    match best {
        Some((best_dist, _)) if dist_sq >= *best_dist => {}
        _ => *best = Some((dist_sq, n)),
    }
}

/// Projiziert `q` auf das Segment `[a, b]`.
///
/// Rückgabe: Parameter `t ∈ [0, 1]` und quadrierter Abstand.
pub(crate) fn project_on_segment(a: DVec2, b: DVec2, q: DVec2) -> (f64, f64) {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((q - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let foot = a + ab * t;
    (t, foot.distance_squared(q))
}

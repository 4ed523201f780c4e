//! Teilstück einer Linie zwischen zwei N-Stationierungen.

use crate::core::{LrError, Polyline};

use super::measure::{clamp_with_rounding, interpolate_n};
use super::validity::merge_connected;

/// Schneidet das Teilstück `[n_from, n_to]` aus der Linie.
///
/// Die Reihenfolge wird vorab normalisiert, das Ergebnis läuft immer von
/// kleinerem zu größerem N. Stützpunkte echt innerhalb des Bereichs werden
/// unverändert (inkl. Z/M) übernommen, Anfang und Ende interpoliert.
/// `n_from == n_to` liefert eine Linie aus zwei identischen Stützpunkten.
pub fn curve_substring(line: &Polyline, n_from: f64, n_to: f64) -> Result<Polyline, LrError> {
    let merged = merge_connected(line)?;
    let total = merged.length();

    let (lo, hi) = if n_from <= n_to {
        (n_from, n_to)
    } else {
        (n_to, n_from)
    };
    let lo = clamp_with_rounding(lo, 0.0, total).ok_or(LrError::StationingOutOfRange)?;
    let hi = clamp_with_rounding(hi, 0.0, total).ok_or(LrError::StationingOutOfRange)?;

    let vertices = merged.single_part().ok_or(LrError::CurveSubstringFailed)?;
    let start = interpolate_n(&merged, lo)?;
    let end = interpolate_n(&merged, hi)?;

    let mut out = Vec::with_capacity(vertices.len() + 2);
    out.push(start);

    let mut accumulated = 0.0;
    for (index, vertex) in vertices.iter().enumerate() {
        if index > 0 {
            accumulated += vertices[index - 1].distance(vertex);
        }
        if accumulated > lo && accumulated < hi {
            out.push(*vertex);
        }
    }
    out.push(end);

    Polyline::line_string(out).map_err(|_| LrError::CurveSubstringFailed)
}

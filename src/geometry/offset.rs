//! Parallele Versatzlinie mit runden Außenecken.
//!
//! Vorzeichen: positiver Abstand = links in Laufrichtung, negativ = rechts.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use crate::core::{LrError, Polyline, Vertex};

use super::validity::merge_connected;

/// Bogensegmente je Viertelkreis an Außenecken.
pub const ARC_SEGMENTS_PER_QUARTER: usize = 8;

/// |sin| des Knickwinkels, unter dem zwei Segmente als kollinear gelten.
const COLLINEAR_SIN: f64 = 1e-12;

/// Toleranz für Schnittparameter an Innenecken.
const PARAM_TOLERANCE: f64 = 1e-9;

/// Um `distance` parallel verschobenes Segment.
#[derive(Debug, Clone, Copy)]
struct OffsetSegment {
    start: DVec2,
    end: DVec2,
    /// Einheitsvektor in Laufrichtung
    dir: DVec2,
    /// Versatzvektor (linke Normale × Abstand)
    normal: DVec2,
}

/// Berechnet die Versatzlinie im Abstand `distance`.
///
/// `distance == 0` gibt die Eingabe unverändert zurück. Innenecken werden auf
/// den Schnittpunkt der benachbarten Versatzsegmente gekürzt; fällt dieser
/// außerhalb eines der Segmente, würde sich die Versatzlinie selbst schneiden
/// und es wird `OffsetCurveFailed` geliefert.
pub fn offset_curve(line: &Polyline, distance: f64) -> Result<Polyline, LrError> {
    if distance == 0.0 {
        return Ok(line.clone());
    }
    if !distance.is_finite() {
        return Err(LrError::OffsetCurveFailed);
    }

    let merged = merge_connected(line).map_err(|_| LrError::OffsetCurveFailed)?;
    let source = merged.single_part().ok_or(LrError::OffsetCurveFailed)?;

    // ── Phase A: doppelte Stützpunkte entfernen, Segmente versetzen ──
    let mut vertices: Vec<Vertex> = Vec::with_capacity(source.len());
    for vertex in source {
        match vertices.last() {
            Some(last) if last.xy() == vertex.xy() => {}
            _ => vertices.push(*vertex),
        }
    }
    if vertices.len() < 2 {
        return Err(LrError::OffsetCurveFailed);
    }

    let segments: Vec<OffsetSegment> = vertices
        .windows(2)
        .map(|w| {
            let (a, b) = (w[0].xy(), w[1].xy());
            let dir = (b - a).normalize();
            let normal = dir.perp() * distance;
            OffsetSegment {
                start: a + normal,
                end: b + normal,
                dir,
                normal,
            }
        })
        .collect();

    // ── Phase B: Ecken verbinden ──
    let mut out = Vec::with_capacity(vertices.len() * 2);
    out.push(vertices[0].with_xy(segments[0].start));

    // Parameter, ab dem das aktuelle Segment nach einer Innenecke beginnt
    let mut entry_param = 0.0;
    for (index, pair) in segments.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        let corner = vertices[index + 1];
        let cross = current.dir.perp_dot(next.dir);
        let dot = current.dir.dot(next.dir);

        if cross.abs() <= COLLINEAR_SIN {
            if dot > 0.0 {
                out.push(corner.with_xy(current.end));
            } else {
                // Kehrtwende: Halbkreis um die Spitze
                push_round_join(&mut out, &corner, current, next, -PI * distance.signum());
            }
            entry_param = 0.0;
            continue;
        }

        if cross * distance > 0.0 {
            // Innenecke
            let (exit_param, next_entry, point) =
                intersect(current, next).ok_or(LrError::OffsetCurveFailed)?;
            if exit_param < entry_param - PARAM_TOLERANCE {
                return Err(LrError::OffsetCurveFailed);
            }
            out.push(corner.with_xy(point));
            entry_param = next_entry;
        } else {
            let sweep = current.normal.perp_dot(next.normal).atan2(current.normal.dot(next.normal));
            push_round_join(&mut out, &corner, current, next, sweep);
            entry_param = 0.0;
        }
    }

    if entry_param > 1.0 + PARAM_TOLERANCE {
        return Err(LrError::OffsetCurveFailed);
    }
    let last_vertex = vertices[vertices.len() - 1];
    let last_segment = segments[segments.len() - 1];
    out.push(last_vertex.with_xy(last_segment.end));

    Polyline::line_string(out).map_err(|_| LrError::OffsetCurveFailed)
}

/// Schnitt zweier Versatzsegmente.
///
/// Rückgabe: Parameter auf `a`, Parameter auf `b`, Schnittpunkt. `None`, wenn
/// die Segmente parallel sind oder der Schnitt außerhalb eines Segments liegt.
fn intersect(a: &OffsetSegment, b: &OffsetSegment) -> Option<(f64, f64, DVec2)> {
    let r = a.end - a.start;
    let q = b.end - b.start;
    let denom = r.perp_dot(q);
    if denom.abs() <= f64::EPSILON {
        return None;
    }
    let w = b.start - a.start;
    let s = w.perp_dot(q) / denom;
    let u = w.perp_dot(r) / denom;

    let range = -PARAM_TOLERANCE..=1.0 + PARAM_TOLERANCE;
    if !range.contains(&s) || !range.contains(&u) {
        return None;
    }
    Some((s, u, a.start + r * s))
}

/// Fügt einen Kreisbogen um `corner` von `current.end` bis `next.start` ein.
fn push_round_join(
    out: &mut Vec<Vertex>,
    corner: &Vertex,
    current: &OffsetSegment,
    next: &OffsetSegment,
    sweep: f64,
) {
    let steps = ((sweep.abs() / FRAC_PI_2) * ARC_SEGMENTS_PER_QUARTER as f64)
        .ceil()
        .max(1.0) as usize;
    let center = corner.xy();

    out.push(corner.with_xy(current.end));
    for step in 1..steps {
        let angle = sweep * step as f64 / steps as f64;
        let point = center + DVec2::from_angle(angle).rotate(current.normal);
        out.push(corner.with_xy(point));
    }
    out.push(corner.with_xy(next.start));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corner_line() -> Polyline {
        // Linkskurve: erst nach Osten, dann nach Norden
        Polyline::from_xy(&[(5.0, 0.0), (10.0, 0.0), (10.0, 5.0)]).expect("gültig")
    }

    fn assert_xy(v: &Vertex, x: f64, y: f64) {
        assert_relative_eq!(v.x, x, epsilon = 1e-9);
        assert_relative_eq!(v.y, y, epsilon = 1e-9);
    }

    #[test]
    fn test_null_versatz_gibt_eingabe_zurueck() {
        let line = corner_line();
        assert_eq!(offset_curve(&line, 0.0), Ok(line));
    }

    #[test]
    fn test_gerade_links_und_rechts() {
        let line = Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0)]).expect("gültig");

        let left = offset_curve(&line, 2.0).expect("Versatz erwartet");
        let v = left.single_part().expect("einteilig");
        assert_xy(&v[0], 0.0, 2.0);
        assert_xy(&v[1], 10.0, 2.0);

        let right = offset_curve(&line, -2.0).expect("Versatz erwartet");
        let v = right.single_part().expect("einteilig");
        assert_xy(&v[0], 0.0, -2.0);
        assert_xy(&v[1], 10.0, -2.0);
    }

    #[test]
    fn test_innenecke_wird_gekuerzt() {
        let seg = offset_curve(&corner_line(), 1.0).expect("Versatz erwartet");
        let v = seg.single_part().expect("einteilig");
        assert_eq!(v.len(), 3);
        assert_xy(&v[0], 5.0, 1.0);
        assert_xy(&v[1], 9.0, 1.0);
        assert_xy(&v[2], 9.0, 5.0);
    }

    #[test]
    fn test_aussenecke_mit_rundem_bogen() {
        let seg = offset_curve(&corner_line(), -1.0).expect("Versatz erwartet");
        let v = seg.single_part().expect("einteilig");

        // Start + Viertelkreis (8 Segmente = 9 Punkte) + Ende
        assert_eq!(v.len(), 11);
        assert_xy(&v[0], 5.0, -1.0);
        assert_xy(&v[1], 10.0, -1.0);
        assert_xy(&v[9], 11.0, 0.0);
        assert_xy(&v[10], 11.0, 5.0);

        // Alle Bogenpunkte im Abstand 1 zur Ecke
        for p in &v[1..=9] {
            assert_relative_eq!(p.xy().distance(DVec2::new(10.0, 0.0)), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_kehrtwende_halbkreis_vorne() {
        let line = Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)]).expect("gültig");
        let seg = offset_curve(&line, 1.0).expect("Versatz erwartet");
        let v = seg.single_part().expect("einteilig");

        // 16 Bogensegmente für 180°
        assert_eq!(v.len(), 2 + 17);
        let tip = v[9];
        assert_xy(&tip, 11.0, 0.0);
        assert_xy(&v[v.len() - 1], 0.0, -1.0);
    }

    #[test]
    fn test_zu_kurzes_mittelsegment_schlaegt_fehl() {
        // Schmale U-Form: Versatz nach innen größer als die halbe Breite
        let line = Polyline::from_xy(&[(0.0, 10.0), (0.0, 0.0), (1.0, 0.0), (1.0, 10.0)])
            .expect("gültig");
        assert_eq!(offset_curve(&line, 2.0), Err(LrError::OffsetCurveFailed));
    }

    #[test]
    fn test_m_werte_bleiben_erhalten() {
        let line = Polyline::from_xym(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]).expect("gültig");
        let seg = offset_curve(&line, 1.0).expect("Versatz erwartet");
        assert!(seg.has_m());
        assert_eq!(seg.last_vertex().and_then(|v| v.m), Some(10.0));
    }

    #[test]
    fn test_entartete_linie_schlaegt_fehl() {
        let line = Polyline::from_xy(&[(3.0, 3.0), (3.0, 3.0)]).expect("gültig");
        assert_eq!(offset_curve(&line, 1.0), Err(LrError::OffsetCurveFailed));
    }
}

//! Line-on-Line: Abschnitt zwischen zwei Stationierungen derselben Referenzlinie.

use serde::{Deserialize, Serialize};

use super::pol::{LrMode, PolFeature};
use super::segment::segment_geom_n;
use crate::core::{LrError, Polyline};
use crate::host::MapHost;

/// Endpunkt eines Abschnitts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    From,
    To,
}

impl Endpoint {
    /// Der jeweils andere Endpunkt.
    pub fn other(self) -> Self {
        match self {
            Endpoint::From => Endpoint::To,
            Endpoint::To => Endpoint::From,
        }
    }
}

/// Line-on-Line-Datensatz.
///
/// `is_valid` gilt genau dann, wenn beide Endpunkte gültig sind und auf
/// dieselbe Referenzlinie zeigen. Die Deltas sind `to - from` ohne
/// Richtungs-Normalisierung.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LolFeature {
    pub data_fid: Option<i64>,
    pub pol_from: PolFeature,
    pub pol_to: PolFeature,
    /// Seitlicher Versatz, positiv = links der Digitalisierungsrichtung
    pub offset: f64,
    pub delta_n_abs: Option<f64>,
    pub delta_n_fract: Option<f64>,
    pub delta_m_abs: Option<f64>,
    pub delta_m_fract: Option<f64>,
    pub delta_z: Option<f64>,
    pub is_valid: bool,
    pub last_error: Option<LrError>,
}

impl LolFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt einen Abschnitt aus zwei Endpunkten.
    pub fn from_pols(pol_from: PolFeature, pol_to: PolFeature, offset: f64) -> Self {
        let mut lol = Self {
            pol_from,
            pol_to,
            offset,
            ..Self::default()
        };
        lol.refresh();
        lol
    }

    pub fn pol(&self, endpoint: Endpoint) -> &PolFeature {
        match endpoint {
            Endpoint::From => &self.pol_from,
            Endpoint::To => &self.pol_to,
        }
    }

    pub fn set_pol_from(&mut self, pol: &PolFeature) {
        self.pol_from = pol.clone();
        self.refresh();
    }

    pub fn set_pol_to(&mut self, pol: &PolFeature) {
        self.pol_to = pol.clone();
        self.refresh();
    }

    pub fn set_pol(&mut self, endpoint: Endpoint, pol: &PolFeature) {
        match endpoint {
            Endpoint::From => self.set_pol_from(pol),
            Endpoint::To => self.set_pol_to(pol),
        }
    }

    /// Vertauscht Anfang und Ende; die Deltas wechseln das Vorzeichen.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.pol_from, &mut self.pol_to);
        self.refresh();
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Abstand der Endpunkte entlang der Linie (`to - from`).
    pub fn distance(&self) -> Option<f64> {
        self.delta_n_abs
    }

    /// Untere und obere N-Stationierung.
    pub fn n_range(&self) -> Option<(f64, f64)> {
        let from = self.pol_from.snap_n_abs?;
        let to = self.pol_to.snap_n_abs?;
        Some((from.min(to), from.max(to)))
    }

    /// Referenzlinie (über den Anfangspunkt).
    pub fn reference_geom<'a>(&'a self, host: &'a dyn MapHost) -> Result<&'a Polyline, LrError> {
        self.pol_from.reference_geom(host)
    }

    /// Abschnitts-Geometrie inkl. Versatz.
    ///
    /// Schlägt die Ableitung fehl, bleibt der Datensatz selbst gültig.
    pub fn segment_geom(&self, host: &dyn MapHost) -> Result<Polyline, LrError> {
        if !self.is_valid {
            return Err(self.last_error.unwrap_or(LrError::ReferenceFeatureInvalid));
        }
        let (n_from, n_to) = match (self.pol_from.snap_n_abs, self.pol_to.snap_n_abs) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(LrError::InterpolationFailed),
        };
        let geom = self.reference_geom(host)?;
        segment_geom_n(geom, n_from, n_to, self.offset)
    }

    /// Stationiert einen Endpunkt neu; übernommen wird nur ein gültiges Ergebnis.
    pub fn recalc_endpoint(
        &mut self,
        host: &dyn MapHost,
        endpoint: Endpoint,
        value: f64,
        mode: LrMode,
        sync_canvas: bool,
    ) -> Result<(), LrError> {
        let mut pol = self.pol(endpoint).clone();
        if !pol.recalc_by_stationing(host, value, mode, sync_canvas) {
            return Err(pol.last_error.unwrap_or(LrError::InterpolationFailed));
        }
        self.set_pol(endpoint, &pol);
        Ok(())
    }

    /// Setzt beide Endpunkte per N-Stationierung; nur gemeinsam übernommen.
    pub fn set_n_stationings(
        &mut self,
        host: &dyn MapHost,
        n_from: f64,
        n_to: f64,
        sync_canvas: bool,
    ) -> Result<(), LrError> {
        let mut from = self.pol_from.clone();
        let mut to = self.pol_to.clone();
        for (pol, n) in [(&mut from, n_from), (&mut to, n_to)] {
            if !pol.recalc_by_stationing(host, n, LrMode::NAbs, sync_canvas) {
                return Err(pol.last_error.unwrap_or(LrError::InterpolationFailed));
            }
        }
        self.pol_from = from;
        self.pol_to = to;
        self.refresh();
        Ok(())
    }

    /// Deltas und Gültigkeit aus den Endpunkten neu berechnen.
    fn refresh(&mut self) {
        self.delta_n_abs = None;
        self.delta_n_fract = None;
        self.delta_m_abs = None;
        self.delta_m_fract = None;
        self.delta_z = None;

        let validity = if !self.pol_from.is_valid {
            Err(self
                .pol_from
                .last_error
                .unwrap_or(LrError::ReferenceFeatureInvalid))
        } else if !self.pol_to.is_valid {
            Err(self
                .pol_to
                .last_error
                .unwrap_or(LrError::ReferenceFeatureInvalid))
        } else if !self.pol_from.same_reference(&self.pol_to) {
            Err(LrError::FidMismatch)
        } else {
            Ok(())
        };

        if let Err(e) = validity {
            self.is_valid = false;
            self.last_error = Some(e);
            return;
        }

        let delta = |from: Option<f64>, to: Option<f64>| Some(to? - from?);
        self.delta_n_abs = delta(self.pol_from.snap_n_abs, self.pol_to.snap_n_abs);
        self.delta_n_fract = delta(self.pol_from.snap_n_fract, self.pol_to.snap_n_fract);
        self.delta_m_abs = delta(self.pol_from.snap_m, self.pol_to.snap_m);
        self.delta_m_fract = delta(self.pol_from.snap_m_fract, self.pol_to.snap_m_fract);
        self.delta_z = delta(self.pol_from.snap_z, self.pol_to.snap_z);
        self.is_valid = true;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WkbType;
    use crate::host::{MemoryHost, MemoryLayer};
    use approx::assert_relative_eq;

    const LAYER: &str = "roads";

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new("EPSG:25832");
        host.add_layer(
            MemoryLayer::new(LAYER, WkbType::line_string(false, true), Some("EPSG:25832"))
                .with_feature(
                    1,
                    Polyline::from_xym(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0), (10.0, 10.0, 25.0)])
                        .expect("gültig"),
                )
                .with_feature(
                    2,
                    Polyline::from_xym(&[(0.0, 20.0, 0.0), (30.0, 20.0, 30.0)]).expect("gültig"),
                ),
        );
        host
    }

    fn pol_at(host: &MemoryHost, fid: i64, n: f64) -> PolFeature {
        let mut pol = PolFeature::new();
        assert!(pol.set_ref_fid(host, LAYER, fid));
        assert!(pol.recalc_by_stationing(host, n, LrMode::NAbs, false));
        pol
    }

    #[test]
    fn test_deltas_ohne_normalisierung() {
        let host = host();
        let lol = LolFeature::from_pols(pol_at(&host, 1, 15.0), pol_at(&host, 1, 5.0), 0.0);

        assert!(lol.is_valid);
        assert_relative_eq!(lol.delta_n_abs.expect("delta n"), -10.0);
        assert_relative_eq!(lol.delta_n_fract.expect("delta fract"), -0.5);
        assert_relative_eq!(lol.delta_m_abs.expect("delta m"), -12.5);
        assert!(lol.delta_z.is_none());
        assert_eq!(lol.n_range(), Some((5.0, 15.0)));
    }

    #[test]
    fn test_flip_dreht_vorzeichen() {
        let host = host();
        let mut lol = LolFeature::from_pols(pol_at(&host, 1, 5.0), pol_at(&host, 1, 15.0), 0.0);
        assert_relative_eq!(lol.distance().expect("Distanz"), 10.0);

        lol.flip();
        assert_relative_eq!(lol.distance().expect("Distanz"), -10.0);
        assert_eq!(lol.pol_from.snap_n_abs, Some(15.0));
    }

    #[test]
    fn test_unterschiedliche_referenz() {
        let host = host();
        let mut lol = LolFeature::new();
        lol.set_pol_from(&pol_at(&host, 1, 5.0));
        assert!(!lol.is_valid);

        lol.set_pol_to(&pol_at(&host, 2, 5.0));
        assert!(!lol.is_valid);
        assert_eq!(lol.last_error, Some(LrError::FidMismatch));
        assert!(lol.delta_n_abs.is_none());
    }

    #[test]
    fn test_ungueltiger_endpunkt_vererbt_fehler() {
        let host = host();
        let mut to = pol_at(&host, 1, 5.0);
        assert!(!to.recalc_by_stationing(&host, 99.0, LrMode::NAbs, false));

        let lol = LolFeature::from_pols(pol_at(&host, 1, 1.0), to, 0.0);
        assert_eq!(lol.last_error, Some(LrError::StationingOutOfRange));
        assert_eq!(lol.segment_geom(&host), Err(LrError::StationingOutOfRange));
    }

    #[test]
    fn test_segment_mit_versatz() {
        let host = host();
        let lol = LolFeature::from_pols(pol_at(&host, 1, 5.0), pol_at(&host, 1, 15.0), 1.0);
        let seg = lol.segment_geom(&host).expect("Abschnitt erwartet");
        assert_eq!(seg.vertex_count(), 3);
        let last = seg.last_vertex().expect("Endpunkt");
        assert_relative_eq!(last.x, 9.0);
        assert_relative_eq!(last.y, 5.0);
    }

    #[test]
    fn test_endpunkt_neu_stationieren() {
        let host = host();
        let mut lol = LolFeature::from_pols(pol_at(&host, 1, 5.0), pol_at(&host, 1, 15.0), 0.0);

        lol.recalc_endpoint(&host, Endpoint::To, 20.0, LrMode::MAbs, false)
            .expect("gültige Stationierung");
        assert_relative_eq!(lol.pol_to.snap_n_abs.expect("n"), 50.0 / 3.0, epsilon = 1e-9);

        assert_eq!(
            lol.recalc_endpoint(&host, Endpoint::From, 1.5, LrMode::NFract, false),
            Err(LrError::StationingOutOfRange)
        );
        // Bei Fehler bleibt der alte Endpunkt erhalten
        assert_eq!(lol.pol_from.snap_n_abs, Some(5.0));
        assert!(lol.is_valid);
    }

    #[test]
    fn test_beide_stationierungen_setzen() {
        let host = host();
        let mut lol = LolFeature::from_pols(pol_at(&host, 1, 5.0), pol_at(&host, 1, 15.0), 0.0);

        lol.set_n_stationings(&host, 0.0, 20.0, false)
            .expect("gültige Stationierung");
        assert_eq!(lol.distance(), Some(20.0));

        assert!(lol.set_n_stationings(&host, 10.0, 21.0, false).is_err());
        assert_eq!(lol.n_range(), Some((0.0, 20.0)));
    }
}

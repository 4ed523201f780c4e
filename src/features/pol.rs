//! Point-on-Line: Stationierung eines Punkts auf einer Referenzlinie.
//!
//! Ein `PolFeature` hält die Referenz (Layer + Feature oder eine mitgeführte
//! Geometrie) und die daraus berechneten `snap_*`-Werte. Fehler werden nicht
//! propagiert, sondern als `is_valid = false` + `last_error` gespeichert.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::{CrsCalibration, LrError, Polyline, Vertex};
use crate::geometry::{
    check_m_valid, check_n_valid, interpolate_n, is_m_valid, locate_n_from_m, locate_point,
    m_range,
};
use crate::host::{eval_crs_units, MapHost, MouseEvent, ReferenceLayer, ScopedTransform};

/// Herkunft der Referenz-Geometrie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeomSource {
    /// Geometrie wird bei jedem Aufruf über Layer-ID + Feature-ID geholt
    #[default]
    RefFid,
    /// Geometrie ist im Feature zwischengespeichert
    Cached,
}

/// Art eines Stationierungs-Werts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LrMode {
    /// Absolute Distanz vom Linienanfang
    NAbs,
    /// Relative Position 0..1 entlang der Länge
    NFract,
    /// Absoluter Messwert (M)
    MAbs,
    /// Relative Position 0..1 im M-Bereich
    MFract,
}

impl LrMode {
    pub const ALL: [LrMode; 4] = [LrMode::NAbs, LrMode::NFract, LrMode::MAbs, LrMode::MFract];

    /// Kurzname, wie er in Einstellungen und Formularen steht.
    pub fn tag(self) -> &'static str {
        match self {
            LrMode::NAbs => "Nabs",
            LrMode::NFract => "Nfract",
            LrMode::MAbs => "Mabs",
            LrMode::MFract => "Mfract",
        }
    }

    /// `true` für die M-basierten Modi.
    pub fn is_measure(self) -> bool {
        matches!(self, LrMode::MAbs | LrMode::MFract)
    }
}

impl fmt::Display for LrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LrMode {
    type Err = LrError;

    /// Akzeptiert `Nabs`, `N_ABS`, `nabs` usw.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "nabs" => Ok(LrMode::NAbs),
            "nfract" => Ok(LrMode::NFract),
            "mabs" => Ok(LrMode::MAbs),
            "mfract" => Ok(LrMode::MFract),
            _ => Err(LrError::LrModeNotImplemented),
        }
    }
}

/// Ergebnis einer Stationierung auf einer Geometrie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stationing {
    /// Punkt auf der Linie (Referenz-KBS) inkl. interpoliertem Z/M
    pub vertex: Vertex,
    pub n_abs: f64,
    pub n_fract: f64,
    /// Nur auf gültigen Trajektorien mit `m_last != m_first`
    pub m_fract: Option<f64>,
}

/// Stationiert `value` im Modus `mode` auf `geom`.
pub fn station(geom: &Polyline, value: f64, mode: LrMode) -> Result<Stationing, LrError> {
    check_n_valid(geom)?;
    let length = geom.length();
    let unit_range = 0.0..=1.0;

    let n_abs = match mode {
        LrMode::NAbs => {
            if !(0.0..=length).contains(&value) {
                return Err(LrError::StationingOutOfRange);
            }
            value
        }
        LrMode::NFract => {
            if !unit_range.contains(&value) {
                return Err(LrError::StationingOutOfRange);
            }
            (value * length).min(length)
        }
        LrMode::MAbs => {
            check_m_valid(geom)?;
            let (m_first, m_last) = m_range(geom).ok_or(LrError::GeometryNoM)?;
            if !(m_first..=m_last).contains(&value) {
                return Err(LrError::StationingOutOfRange);
            }
            locate_n_from_m(geom, value)?
        }
        LrMode::MFract => {
            check_m_valid(geom)?;
            let (m_first, m_last) = m_range(geom).ok_or(LrError::GeometryNoM)?;
            if !unit_range.contains(&value) {
                return Err(LrError::StationingOutOfRange);
            }
            let m = (m_first + value * (m_last - m_first)).clamp(m_first, m_last);
            locate_n_from_m(geom, m)?
        }
    };

    let vertex = interpolate_n(geom, n_abs)?;
    let n_fract = if length > 0.0 { n_abs / length } else { 0.0 };

    let m_fract = match (is_m_valid(geom), m_range(geom), vertex.m) {
        (true, Some((m_first, m_last)), Some(m)) if m_last != m_first => {
            Some((m - m_first) / (m_last - m_first))
        }
        _ => None,
    };

    Ok(Stationing {
        vertex,
        n_abs,
        n_fract,
        m_fract,
    })
}

/// Sucht den Referenz-Layer und prüft den Geometrietyp.
pub(crate) fn lookup_line_layer<'h>(
    host: &'h dyn MapHost,
    layer_id: &str,
) -> Result<&'h dyn ReferenceLayer, LrError> {
    let layer = host
        .map_layer(layer_id)
        .ok_or(LrError::ReferenceLayerNotFound)?;
    if !layer.wkb_type().is_line() {
        return Err(LrError::ReferenceLayerTypeUnsupported);
    }
    Ok(layer)
}

// ── PolFeature ──────────────────────────────────────────────────────

/// Point-on-Line-Datensatz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolFeature {
    /// Primärschlüssel des gespeicherten Datensatzes (Edit-Modus)
    pub data_fid: Option<i64>,
    pub ref_layer_id: Option<String>,
    pub ref_fid: Option<i64>,
    /// Authority-ID des Referenz-KBS
    pub ref_authid: Option<String>,
    pub geom_source: GeomSource,
    pub cached_geom: Option<Polyline>,
    /// Mausposition im Karten-KBS
    pub map_x: Option<f64>,
    pub map_y: Option<f64>,
    /// Punkt auf der Linie im Referenz-KBS
    pub snap_x: Option<f64>,
    pub snap_y: Option<f64>,
    pub snap_z: Option<f64>,
    pub snap_m: Option<f64>,
    pub snap_n_abs: Option<f64>,
    pub snap_n_fract: Option<f64>,
    pub snap_m_fract: Option<f64>,
    pub is_valid: bool,
    pub last_error: Option<LrError>,
}

impl PolFeature {
    /// Erstellt einen leeren, ungültigen Datensatz.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt alles auf den leeren Zustand zurück.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Punkt auf der Linie (Referenz-KBS), falls berechnet.
    pub fn snap_point(&self) -> Option<DVec2> {
        Some(DVec2::new(self.snap_x?, self.snap_y?))
    }

    /// Letzte Mausposition (Karten-KBS).
    pub fn map_point(&self) -> Option<DVec2> {
        Some(DVec2::new(self.map_x?, self.map_y?))
    }

    /// Verweist auf dieselbe Referenzlinie wie `other`.
    pub fn same_reference(&self, other: &PolFeature) -> bool {
        match (self.geom_source, other.geom_source) {
            (GeomSource::RefFid, GeomSource::RefFid) => {
                self.ref_layer_id.is_some()
                    && self.ref_fid.is_some()
                    && self.ref_layer_id == other.ref_layer_id
                    && self.ref_fid == other.ref_fid
            }
            (GeomSource::Cached, GeomSource::Cached) => {
                self.cached_geom.is_some() && self.cached_geom == other.cached_geom
            }
            _ => false,
        }
    }

    /// Referenz-Geometrie: mitgeführt oder aus dem Host-Layer.
    pub fn reference_geom<'a>(&'a self, host: &'a dyn MapHost) -> Result<&'a Polyline, LrError> {
        match self.geom_source {
            GeomSource::Cached => self
                .cached_geom
                .as_ref()
                .ok_or(LrError::ReferenceFeatureInvalid),
            GeomSource::RefFid => {
                let layer_id = self
                    .ref_layer_id
                    .as_deref()
                    .ok_or(LrError::ReferenceLayerNotFound)?;
                let layer = lookup_line_layer(host, layer_id)?;
                let fid = self.ref_fid.ok_or(LrError::ReferenceFidNotSet)?;
                layer
                    .feature(fid)
                    .and_then(|feature| feature.geometry())
                    .ok_or(LrError::ReferenceFeatureInvalid)
            }
        }
    }

    /// Länge der Referenzlinie.
    pub fn reference_length(&self, host: &dyn MapHost) -> Result<f64, LrError> {
        self.reference_geom(host).map(Polyline::length)
    }

    /// Anzeige-Kalibrierung des Referenz-KBS.
    pub fn calibration(&self, host: &dyn MapHost) -> CrsCalibration {
        eval_crs_units(self.ref_authid.as_deref(), host.transformer())
    }

    /// Setzt die Referenz auf ein Feature eines Layers, ohne zu stationieren.
    ///
    /// Gibt `true` zurück, wenn die Referenzlinie nutzbar ist.
    pub fn set_ref_fid(&mut self, host: &dyn MapHost, layer_id: &str, fid: i64) -> bool {
        let authid = match lookup_line_layer(host, layer_id) {
            Ok(layer) => layer.crs_authid().map(str::to_string),
            Err(e) => return self.fail(e),
        };
        self.set_reference(layer_id, fid, authid);
        self.is_valid = false;
        self.last_error = None;

        match self.reference_geom(host).and_then(check_n_valid) {
            Ok(()) => true,
            Err(e) => {
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Nutzt eine mitgeführte Geometrie statt einer Layer-Referenz.
    pub fn set_cached_geom(&mut self, geom: Polyline, authid: Option<&str>) {
        self.ref_layer_id = None;
        self.ref_fid = None;
        self.ref_authid = authid.map(str::to_string);
        self.geom_source = GeomSource::Cached;
        self.cached_geom = Some(geom);
        self.clear_stationing();
        self.is_valid = false;
        self.last_error = None;
    }

    /// Übernimmt einen Snap-Treffer auf den Referenz-Layer.
    ///
    /// Mit `filter_fid` muss der Treffer auf genau diesem Feature liegen.
    pub fn snap_to_layer(
        &mut self,
        host: &dyn MapHost,
        event: &MouseEvent,
        ref_layer_id: &str,
        filter_fid: Option<i64>,
    ) -> bool {
        let Some(snap) = event
            .snap_match()
            .filter(|snap| snap.is_valid && snap.layer_id == ref_layer_id)
        else {
            return self.fail(LrError::NoSnap);
        };
        if filter_fid.is_some_and(|fid| fid != snap.fid) {
            return self.fail(LrError::FidMismatch);
        }

        self.locate_canvas_point(host, ref_layer_id, snap.fid, event.map_point(), snap.point)
    }

    /// Projiziert die Mausposition auf das Feature `ref_fid`, unabhängig vom Abstand.
    pub fn line_locate_event(
        &mut self,
        host: &dyn MapHost,
        event: &MouseEvent,
        ref_layer_id: &str,
        ref_fid: i64,
    ) -> bool {
        let point = event.map_point();
        self.locate_canvas_point(host, ref_layer_id, ref_fid, point, point)
    }

    /// Stationiert den Lotfußpunkt von `q` (Referenz-KBS).
    pub fn recalc_by_point(&mut self, host: &dyn MapHost, q: DVec2) -> bool {
        self.map_x = Some(q.x);
        self.map_y = Some(q.y);

        let n = match self.reference_geom(host).and_then(|geom| locate(geom, q)) {
            Ok(n) => n,
            Err(e) => return self.fail(e),
        };
        self.recalc_by_stationing(host, n, LrMode::NAbs, false)
    }

    /// Stationiert `value` im Modus `mode` neu.
    ///
    /// Mit `sync_canvas` wird die Kartenposition auf den neuen Punkt gesetzt.
    pub fn recalc_by_stationing(
        &mut self,
        host: &dyn MapHost,
        value: f64,
        mode: LrMode,
        sync_canvas: bool,
    ) -> bool {
        let stationing = match self
            .reference_geom(host)
            .and_then(|geom| station(geom, value, mode))
        {
            Ok(stationing) => stationing,
            Err(e) => return self.fail(e),
        };
        self.apply_stationing(&stationing);

        if sync_canvas {
            match self.canvas_point(host) {
                Ok(point) => {
                    self.map_x = Some(point.x);
                    self.map_y = Some(point.y);
                }
                Err(e) => return self.fail(e),
            }
        }

        self.is_valid = true;
        self.last_error = None;
        log::trace!(
            "PoL stationiert: {} = {} -> n = {:.6}",
            mode,
            value,
            stationing.n_abs
        );
        true
    }

    /// Wert der aktuellen Stationierung im gewünschten Modus.
    pub fn stationing_value(&self, mode: LrMode) -> Option<f64> {
        match mode {
            LrMode::NAbs => self.snap_n_abs,
            LrMode::NFract => self.snap_n_fract,
            LrMode::MAbs => self.snap_m,
            LrMode::MFract => self.snap_m_fract,
        }
    }

    /// Punkt auf der Linie im Karten-KBS.
    pub fn canvas_point(&self, host: &dyn MapHost) -> Result<DVec2, LrError> {
        let authid = self
            .ref_authid
            .as_deref()
            .ok_or(LrError::ReferenceAuthidNotSet)?;
        let snap = self.snap_point().ok_or(LrError::InterpolationFailed)?;
        let to_canvas = ScopedTransform::new(host.transformer(), authid, host.canvas_authid());
        Ok(to_canvas.apply(snap))
    }

    // ── intern ──────────────────────────────────────────────────────

    fn locate_canvas_point(
        &mut self,
        host: &dyn MapHost,
        layer_id: &str,
        fid: i64,
        map_point: DVec2,
        canvas_point: DVec2,
    ) -> bool {
        let authid = match lookup_line_layer(host, layer_id) {
            Ok(layer) => layer.crs_authid().map(str::to_string),
            Err(e) => return self.fail(e),
        };
        self.set_reference(layer_id, fid, authid);
        self.map_x = Some(map_point.x);
        self.map_y = Some(map_point.y);

        let Some(authid) = self.ref_authid.as_deref() else {
            return self.fail(LrError::ReferenceAuthidNotSet);
        };
        let to_layer = ScopedTransform::new(host.transformer(), host.canvas_authid(), authid);
        let q = to_layer.apply(canvas_point);

        let n = match self.reference_geom(host).and_then(|geom| locate(geom, q)) {
            Ok(n) => n,
            Err(e) => return self.fail(e),
        };
        self.recalc_by_stationing(host, n, LrMode::NAbs, true)
    }

    /// Setzt eine Layer-Referenz; bei Wechsel der Linie werden alte Werte verworfen.
    fn set_reference(&mut self, layer_id: &str, fid: i64, authid: Option<String>) {
        let changed = self.geom_source != GeomSource::RefFid
            || self.ref_layer_id.as_deref() != Some(layer_id)
            || self.ref_fid != Some(fid);

        self.ref_layer_id = Some(layer_id.to_string());
        self.ref_fid = Some(fid);
        self.ref_authid = authid;
        self.geom_source = GeomSource::RefFid;
        self.cached_geom = None;

        if changed {
            self.clear_stationing();
        }
    }

    fn apply_stationing(&mut self, stationing: &Stationing) {
        let v = stationing.vertex;
        self.snap_x = Some(v.x);
        self.snap_y = Some(v.y);
        self.snap_z = v.z;
        self.snap_m = v.m;
        self.snap_n_abs = Some(stationing.n_abs);
        self.snap_n_fract = Some(stationing.n_fract);
        self.snap_m_fract = stationing.m_fract;
    }

    fn clear_stationing(&mut self) {
        self.snap_x = None;
        self.snap_y = None;
        self.snap_z = None;
        self.snap_m = None;
        self.snap_n_abs = None;
        self.snap_n_fract = None;
        self.snap_m_fract = None;
    }

    fn fail(&mut self, error: LrError) -> bool {
        log::debug!("PoL ungültig: {}", error.tag());
        self.is_valid = false;
        self.last_error = Some(error);
        false
    }
}

/// N-Validität prüfen und Lotfußpunkt stationieren.
fn locate(geom: &Polyline, q: DVec2) -> Result<f64, LrError> {
    check_n_valid(geom)?;
    locate_point(geom, q).ok_or(LrError::ReferenceFeatureInvalid)
}

//! In-Memory-Host: Layer, Features und Snapping ohne GIS-Anwendung.
//!
//! Dient Tests, Benchmarks und Einbettungen ohne eigene Layer-Verwaltung.
//! Snapping nutzt einen KD-Tree über den Segment-Mittelpunkten.

use glam::DVec2;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use super::{CrsTransformer, Feature, IdentityTransformer, MapHost, MouseEvent, ReferenceLayer};
use super::{ScopedTransform, SnapMatch};
use crate::core::{Polyline, WkbType};
use crate::geometry::project_on_segment;

/// Ergebnis einer Snap-Abfrage im Layer-KBS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMatch {
    pub fid: i64,
    /// Lotfußpunkt auf dem Segment
    pub point: DVec2,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct IndexedSegment {
    fid: i64,
    a: DVec2,
    b: DVec2,
}

/// Read-only Segment-Index über alle Features eines Layers.
#[derive(Debug, Clone)]
struct SegmentIndex {
    tree: KdTree<f64, 2>,
    segments: Vec<IndexedSegment>,
    /// Größte halbe Segmentlänge (Suchradius-Zuschlag)
    max_half_length: f64,
}

impl SegmentIndex {
    fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            segments: Vec::new(),
            max_half_length: 0.0,
        }
    }

    fn from_features(features: &IndexMap<i64, Feature>) -> Self {
        let segments: Vec<IndexedSegment> = features
            .values()
            .filter_map(|feature| feature.geometry().map(|geom| (feature.fid, geom)))
            .flat_map(|(fid, geom)| {
                geom.parts()
                    .iter()
                    .flat_map(|part| part.windows(2))
                    .map(move |w| IndexedSegment {
                        fid,
                        a: w[0].xy(),
                        b: w[1].xy(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let entries: Vec<[f64; 2]> = segments
            .iter()
            .map(|s| {
                let mid = (s.a + s.b) * 0.5;
                [mid.x, mid.y]
            })
            .collect();
        let max_half_length = segments
            .iter()
            .map(|s| s.a.distance(s.b) * 0.5)
            .fold(0.0, f64::max);

        Self {
            tree: (&entries).into(),
            segments,
            max_half_length,
        }
    }

    /// Nächstes Segment innerhalb von `tolerance`; bei Gleichstand das zuerst indexierte.
    fn nearest(&self, query: DVec2, tolerance: f64, filter_fid: Option<i64>) -> Option<SegmentMatch> {
        if self.segments.is_empty() || tolerance.is_sign_negative() {
            return None;
        }

        // Jeder Punkt eines Segments liegt höchstens eine halbe Länge vom Mittelpunkt
        let radius = tolerance + self.max_half_length;
        let mut candidates: Vec<usize> = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], radius * radius)
            .into_iter()
            .map(|entry| entry.item as usize)
            .collect();
        candidates.sort_unstable();

        let mut best: Option<SegmentMatch> = None;
        for index in candidates {
            let Some(segment) = self.segments.get(index) else {
                continue;
            };
            if filter_fid.is_some_and(|fid| fid != segment.fid) {
                continue;
            }
            let (t, dist_sq) = project_on_segment(segment.a, segment.b, query);
            let distance = dist_sq.sqrt();
            if distance > tolerance {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(SegmentMatch {
                    fid: segment.fid,
                    point: segment.a + (segment.b - segment.a) * t,
                    distance,
                });
            }
        }
        best
    }
}

// ── Layer ───────────────────────────────────────────────────────────

/// Vektor-Layer im Speicher.
#[derive(Debug, Clone)]
pub struct MemoryLayer {
    id: String,
    wkb_type: WkbType,
    authid: Option<String>,
    features: IndexMap<i64, Feature>,
    snap_index: SegmentIndex,
}

impl MemoryLayer {
    /// Erstellt einen leeren Layer mit deklariertem Geometrietyp.
    pub fn new(id: impl Into<String>, wkb_type: WkbType, authid: Option<&str>) -> Self {
        Self {
            id: id.into(),
            wkb_type,
            authid: authid.map(str::to_string),
            features: IndexMap::new(),
            snap_index: SegmentIndex::empty(),
        }
    }

    /// Fügt ein Feature hinzu (oder ersetzt es) und baut den Snap-Index neu.
    pub fn add_feature(&mut self, fid: i64, geometry: Option<Polyline>) {
        self.features.insert(fid, Feature::new(fid, geometry));
        self.rebuild_snap_index();
    }

    /// Builder-Variante von [`MemoryLayer::add_feature`].
    pub fn with_feature(mut self, fid: i64, geometry: Polyline) -> Self {
        self.add_feature(fid, Some(geometry));
        self
    }

    pub fn remove_feature(&mut self, fid: i64) -> Option<Feature> {
        let removed = self.features.shift_remove(&fid);
        if removed.is_some() {
            self.rebuild_snap_index();
        }
        removed
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Baut den Snap-Index aus den aktuellen Features neu auf.
    pub fn rebuild_snap_index(&mut self) {
        self.snap_index = SegmentIndex::from_features(&self.features);
    }

    /// Nächstes Segment zum Punkt (Layer-KBS) innerhalb der Toleranz.
    pub fn nearest_segment(
        &self,
        point: DVec2,
        tolerance: f64,
        filter_fid: Option<i64>,
    ) -> Option<SegmentMatch> {
        self.snap_index.nearest(point, tolerance, filter_fid)
    }
}

impl ReferenceLayer for MemoryLayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn wkb_type(&self) -> WkbType {
        self.wkb_type
    }

    fn crs_authid(&self) -> Option<&str> {
        self.authid.as_deref()
    }

    fn feature(&self, fid: i64) -> Option<&Feature> {
        self.features.get(&fid)
    }
}

// ── Host ────────────────────────────────────────────────────────────

/// Host mit Layern im Speicher und austauschbarem Transformer.
pub struct MemoryHost {
    canvas_authid: String,
    layers: IndexMap<String, MemoryLayer>,
    transformer: Box<dyn CrsTransformer>,
}

impl MemoryHost {
    /// Erstellt einen Host ohne Projektion (alle KBS identisch).
    pub fn new(canvas_authid: impl Into<String>) -> Self {
        Self::with_transformer(canvas_authid, Box::new(IdentityTransformer))
    }

    pub fn with_transformer(
        canvas_authid: impl Into<String>,
        transformer: Box<dyn CrsTransformer>,
    ) -> Self {
        Self {
            canvas_authid: canvas_authid.into(),
            layers: IndexMap::new(),
            transformer,
        }
    }

    pub fn add_layer(&mut self, layer: MemoryLayer) {
        self.layers.insert(layer.id.clone(), layer);
    }

    pub fn layer_mut(&mut self, layer_id: &str) -> Option<&mut MemoryLayer> {
        self.layers.get_mut(layer_id)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<MemoryLayer> {
        self.layers.shift_remove(layer_id)
    }

    /// Snap-Abfrage wie der Snap-Cache eines GIS.
    ///
    /// `canvas_point` liegt im Karten-KBS, `tolerance` gilt im jeweiligen
    /// Layer-KBS. Über alle (bzw. den gefilterten) Layer gewinnt der nächste Treffer.
    pub fn snap(
        &self,
        canvas_point: DVec2,
        tolerance: f64,
        layer_filter: Option<&str>,
    ) -> Option<SnapMatch> {
        let mut best: Option<(f64, SnapMatch)> = None;

        for layer in self.layers.values() {
            if layer_filter.is_some_and(|id| id != layer.id) || !layer.wkb_type.is_line() {
                continue;
            }
            let layer_authid = layer.authid.as_deref().unwrap_or(&self.canvas_authid);
            let to_layer = ScopedTransform::new(self.transformer.as_ref(), &self.canvas_authid, layer_authid);
            let to_canvas = ScopedTransform::new(self.transformer.as_ref(), layer_authid, &self.canvas_authid);

            let Some(hit) = layer.nearest_segment(to_layer.apply(canvas_point), tolerance, None)
            else {
                continue;
            };
            if best.as_ref().is_some_and(|(distance, _)| *distance <= hit.distance) {
                continue;
            }
            best = Some((
                hit.distance,
                SnapMatch {
                    layer_id: layer.id.clone(),
                    fid: hit.fid,
                    point: to_canvas.apply(hit.point),
                    is_valid: true,
                },
            ));
        }

        best.map(|(_, snap)| snap)
    }

    /// Baut ein Maus-Ereignis inkl. Snap-Treffer für einen Kartenpunkt.
    pub fn mouse_event(&self, canvas_point: DVec2, tolerance: f64) -> MouseEvent {
        MouseEvent::new(canvas_point, self.snap(canvas_point, tolerance, None))
    }
}

impl MapHost for MemoryHost {
    fn map_layer(&self, layer_id: &str) -> Option<&dyn ReferenceLayer> {
        self.layers
            .get(layer_id)
            .map(|layer| layer as &dyn ReferenceLayer)
    }

    fn canvas_authid(&self) -> &str {
        &self.canvas_authid
    }

    fn transformer(&self) -> &dyn CrsTransformer {
        self.transformer.as_ref()
    }
}

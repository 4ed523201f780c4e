//! Pro Aufruf erzeugte KBS-Transformation.

use glam::DVec2;

use super::CrsTransformer;

/// Transformation zwischen zwei festen KBS für die Dauer eines Aufrufs.
///
/// Leiht den Transformer des Hosts; wird am Ende des Aufrufs auf jedem Pfad
/// freigegeben. Gleiche Quell- und Ziel-KBS werden ohne Host-Aufruf durchgereicht.
pub struct ScopedTransform<'a> {
    transformer: &'a dyn CrsTransformer,
    src: &'a str,
    dst: &'a str,
}

impl<'a> ScopedTransform<'a> {
    pub fn new(transformer: &'a dyn CrsTransformer, src: &'a str, dst: &'a str) -> Self {
        Self {
            transformer,
            src,
            dst,
        }
    }

    pub fn apply(&self, point: DVec2) -> DVec2 {
        if self.src == self.dst {
            return point;
        }
        self.transformer.transform(self.src, self.dst, point)
    }
}

/// Transformer ohne Projektion (alle KBS identisch).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl CrsTransformer for IdentityTransformer {
    fn transform(&self, _src_authid: &str, _dst_authid: &str, point: DVec2) -> DVec2 {
        point
    }
}

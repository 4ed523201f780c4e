//! WKB-Grenze: Lesen und Schreiben von (Multi-)LineStrings.
//!
//! Gelesen werden Little- und Big-Endian, ISO-Codes (Z/M/ZM über +1000/2000/3000),
//! EWKB-Flags (Z, M, SRID) und 25D-Codes. Geschrieben wird ISO Little-Endian.

use std::io::{self, Write};

use thiserror::Error;

use super::{GeometryKind, Polyline, Vertex, WkbType};
use super::wkb_type::EWKB_SRID_FLAG;

/// Fehler beim Lesen/Schreiben von WKB.
#[derive(Debug, Error)]
pub enum WkbError {
    #[error("WKB endet vorzeitig (Offset {0})")]
    Truncated(usize),
    #[error("Ungültige Byte-Order-Markierung {0:#04x}")]
    InvalidByteOrder(u8),
    #[error("Nicht unterstützter Geometrietyp {0:?}")]
    UnsupportedType(GeometryKind),
    #[error("Ungültige Linien-Geometrie")]
    InvalidGeometry,
    #[error("Zu viele Elemente für WKB")]
    TooLarge,
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Liest eine Polylinie aus WKB.
pub fn read_polyline(bytes: &[u8]) -> Result<Polyline, WkbError> {
    let mut reader = WkbReader { bytes, offset: 0 };
    let header = reader.header()?;

    match header.kind {
        GeometryKind::LineString => {
            let vertices = reader.vertices(header)?;
            Polyline::line_string(vertices).map_err(|_| WkbError::InvalidGeometry)
        }
        GeometryKind::MultiLineString => {
            let count = reader.u32(header.little_endian)? as usize;
            let mut parts = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                let part_header = reader.header()?;
                if part_header.kind != GeometryKind::LineString {
                    return Err(WkbError::UnsupportedType(part_header.kind));
                }
                parts.push(reader.vertices(part_header)?);
            }
            Polyline::multi_line_string(parts).map_err(|_| WkbError::InvalidGeometry)
        }
        other => Err(WkbError::UnsupportedType(other)),
    }
}

/// Schreibt eine Polylinie als ISO-WKB (Little-Endian) in einen Puffer.
pub fn write_polyline(buf: &mut impl Write, line: &Polyline) -> Result<(), WkbError> {
    let wkb_type = line.wkb_type();
    if line.is_multi() {
        write_header(buf, wkb_type)?;
        write_count(buf, line.part_count())?;
        let part_type = WkbType::line_string(wkb_type.has_z, wkb_type.has_m);
        for part in line.parts() {
            write_line_string(buf, part_type, part)?;
        }
        Ok(())
    } else {
        // Einteilig: genau ein Teil vorhanden
        for part in line.parts() {
            write_line_string(buf, wkb_type, part)?;
        }
        Ok(())
    }
}

/// Komfort-Wrapper um [`write_polyline`] mit eigenem Puffer.
pub fn polyline_to_wkb(line: &Polyline) -> Result<Vec<u8>, WkbError> {
    let dims = 2 + usize::from(line.has_z()) + usize::from(line.has_m());
    let mut out = Vec::with_capacity(9 + line.part_count() * 9 + line.vertex_count() * dims * 8);
    write_polyline(&mut out, line)?;
    Ok(out)
}

fn write_header(buf: &mut impl Write, wkb_type: WkbType) -> Result<(), WkbError> {
    buf.write_all(&[0x01])?;
    buf.write_all(&wkb_type.iso_code().to_le_bytes())?;
    Ok(())
}

fn write_count(buf: &mut impl Write, count: usize) -> Result<(), WkbError> {
    let count: u32 = count.try_into().map_err(|_| WkbError::TooLarge)?;
    buf.write_all(&count.to_le_bytes())?;
    Ok(())
}

fn write_line_string(
    buf: &mut impl Write,
    wkb_type: WkbType,
    vertices: &[Vertex],
) -> Result<(), WkbError> {
    write_header(buf, wkb_type)?;
    write_count(buf, vertices.len())?;
    for v in vertices {
        buf.write_all(&v.x.to_le_bytes())?;
        buf.write_all(&v.y.to_le_bytes())?;
        if wkb_type.has_z {
            buf.write_all(&v.z.unwrap_or(f64::NAN).to_le_bytes())?;
        }
        if wkb_type.has_m {
            buf.write_all(&v.m.unwrap_or(f64::NAN).to_le_bytes())?;
        }
    }
    Ok(())
}

// ── Reader ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Header {
    little_endian: bool,
    kind: GeometryKind,
    has_z: bool,
    has_m: bool,
}

struct WkbReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl WkbReader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], WkbError> {
        let end = self.offset + N;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or(WkbError::Truncated(self.offset))?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(out)
    }

    fn u32(&mut self, little_endian: bool) -> Result<u32, WkbError> {
        let raw = self.take::<4>()?;
        Ok(if little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        })
    }

    fn f64(&mut self, little_endian: bool) -> Result<f64, WkbError> {
        let raw = self.take::<8>()?;
        Ok(if little_endian {
            f64::from_le_bytes(raw)
        } else {
            f64::from_be_bytes(raw)
        })
    }

    fn header(&mut self) -> Result<Header, WkbError> {
        let [order] = self.take::<1>()?;
        let little_endian = match order {
            0 => false,
            1 => true,
            other => return Err(WkbError::InvalidByteOrder(other)),
        };
        let code = self.u32(little_endian)?;
        if code & EWKB_SRID_FLAG != 0 {
            // SRID ist für die Stationierung ohne Belang
            self.u32(little_endian)?;
        }
        let wkb_type = WkbType::from_code(code);
        Ok(Header {
            little_endian,
            kind: wkb_type.kind,
            has_z: wkb_type.has_z,
            has_m: wkb_type.has_m,
        })
    }

    fn vertices(&mut self, header: Header) -> Result<Vec<Vertex>, WkbError> {
        let count = self.u32(header.little_endian)? as usize;
        let mut vertices = Vec::with_capacity(count.min(65_536));
        for _ in 0..count {
            let x = self.f64(header.little_endian)?;
            let y = self.f64(header.little_endian)?;
            let z = if header.has_z {
                Some(self.f64(header.little_endian)?)
            } else {
                None
            };
            let m = if header.has_m {
                Some(self.f64(header.little_endian)?)
            } else {
                None
            };
            vertices.push(Vertex { x, y, z, m });
        }
        Ok(vertices)
    }
}

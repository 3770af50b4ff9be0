// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! WKB/EWKB decoder
//!
//! A single-pass recursive-descent parser from the wire format to the
//! geometry tree. Purely functional over its input stream: no shared
//! mutable state, safely callable concurrently on independent inputs.
//! The decoder trusts well-formed input; structural invariants are the
//! caller's to verify via `Geometry::check_consistency`.

use geo_traits::Dimensions;

use crate::error::GeowireError;
use crate::geometry::{
    CircularString, CompoundCurve, Curve, CurvePolygon, CurveSegment, Geometry,
    GeometryCollection, LineString, LinearRing, MultiCurve, MultiLineString, MultiPoint,
    MultiPolygon, MultiSurface, Point, Polygon, Surface,
};
use crate::stream::{ByteSource, BytesSource, HexSource, ValueReader};
use crate::types::{dims_has_measure, dims_is_3d, GeometryTypeId, TypeWord};

/// Decode a geometry from EWKB (or plain WKB) bytes
pub fn read_geometry(buf: &[u8]) -> Result<Geometry, GeowireError> {
    let mut reader = ValueReader::new(BytesSource::new(buf));
    parse_geometry(&mut reader)
}

/// Decode a geometry from the hex-text envelope
pub fn read_geometry_hex(hex: &str) -> Result<Geometry, GeowireError> {
    let mut reader = ValueReader::new(HexSource::new(hex));
    parse_geometry(&mut reader)
}

fn parse_geometry<S: ByteSource>(reader: &mut ValueReader<S>) -> Result<Geometry, GeowireError> {
    reader.read_order()?;
    let word = TypeWord::unpack(reader.read_u32()?)?;

    let srid = if word.has_srid() {
        // Negative SRIDs are clamped to 0 (unknown)
        reader.read_i32()?.max(0)
    } else {
        0
    };

    let dims = word.dims();
    let mut geometry = match word.geometry_type() {
        GeometryTypeId::Point => Geometry::Point(read_slim_point(reader, dims)?),
        GeometryTypeId::LineString => {
            let points = read_slim_points(reader, dims)?;
            if points.is_empty() {
                Geometry::LineString(LineString::empty(dims))
            } else {
                Geometry::LineString(LineString::new(points))
            }
        }
        GeometryTypeId::CircularString => {
            let points = read_slim_points(reader, dims)?;
            if points.is_empty() {
                Geometry::CircularString(CircularString::empty(dims))
            } else {
                Geometry::CircularString(CircularString::new(points))
            }
        }
        GeometryTypeId::Polygon => Geometry::Polygon(read_polygon_body(reader, dims)?),
        GeometryTypeId::CompoundCurve => {
            let segments = read_elements(reader, |element| match element {
                Geometry::LineString(g) => Ok(CurveSegment::LineString(g)),
                Geometry::CircularString(g) => Ok(CurveSegment::CircularString(g)),
                other => Err(mismatch("LineString or CircularString", &other)),
            })?;
            if segments.is_empty() {
                Geometry::CompoundCurve(CompoundCurve::empty(dims))
            } else {
                Geometry::CompoundCurve(CompoundCurve::new(segments))
            }
        }
        GeometryTypeId::CurvePolygon => {
            let rings = read_elements(reader, curve_element)?;
            if rings.is_empty() {
                Geometry::CurvePolygon(CurvePolygon::empty(dims))
            } else {
                Geometry::CurvePolygon(CurvePolygon::new(rings))
            }
        }
        GeometryTypeId::MultiPoint => {
            let points = read_elements(reader, |element| match element {
                Geometry::Point(g) => Ok(g),
                other => Err(mismatch("Point", &other)),
            })?;
            if points.is_empty() {
                Geometry::MultiPoint(MultiPoint::empty(dims))
            } else {
                Geometry::MultiPoint(MultiPoint::new(points))
            }
        }
        GeometryTypeId::MultiLineString => {
            let lines = read_elements(reader, |element| match element {
                Geometry::LineString(g) => Ok(g),
                other => Err(mismatch("LineString", &other)),
            })?;
            if lines.is_empty() {
                Geometry::MultiLineString(MultiLineString::empty(dims))
            } else {
                Geometry::MultiLineString(MultiLineString::new(lines))
            }
        }
        GeometryTypeId::MultiPolygon => {
            let polygons = read_elements(reader, |element| match element {
                Geometry::Polygon(g) => Ok(g),
                other => Err(mismatch("Polygon", &other)),
            })?;
            if polygons.is_empty() {
                Geometry::MultiPolygon(MultiPolygon::empty(dims))
            } else {
                Geometry::MultiPolygon(MultiPolygon::new(polygons))
            }
        }
        GeometryTypeId::MultiCurve => {
            let curves = read_elements(reader, curve_element)?;
            if curves.is_empty() {
                Geometry::MultiCurve(MultiCurve::empty(dims))
            } else {
                Geometry::MultiCurve(MultiCurve::new(curves))
            }
        }
        GeometryTypeId::MultiSurface => {
            let surfaces = read_elements(reader, |element| match element {
                Geometry::Polygon(g) => Ok(Surface::Polygon(g)),
                Geometry::CurvePolygon(g) => Ok(Surface::CurvePolygon(g)),
                other => Err(mismatch("Polygon or CurvePolygon", &other)),
            })?;
            if surfaces.is_empty() {
                Geometry::MultiSurface(MultiSurface::empty(dims))
            } else {
                Geometry::MultiSurface(MultiSurface::new(surfaces))
            }
        }
        GeometryTypeId::GeometryCollection => {
            let geometries = read_elements(reader, Ok)?;
            if geometries.is_empty() {
                Geometry::GeometryCollection(GeometryCollection::empty(dims))
            } else {
                Geometry::GeometryCollection(GeometryCollection::new(geometries))
            }
        }
        // Code 0 never unpacks; rings are decoded slim inside polygons
        GeometryTypeId::LinearRing => unreachable!("ring type code is not a wire code"),
    };

    // The resolved SRID overwrites the whole subtree, so a top-level SRID
    // wins over anything the nested headers carried
    geometry.set_srid(srid);
    Ok(geometry)
}

fn curve_element(element: Geometry) -> Result<Curve, GeowireError> {
    match element {
        Geometry::LineString(g) => Ok(Curve::LineString(g)),
        Geometry::CircularString(g) => Ok(Curve::CircularString(g)),
        Geometry::CompoundCurve(g) => Ok(Curve::CompoundCurve(g)),
        other => Err(mismatch(
            "LineString, CircularString, or CompoundCurve",
            &other,
        )),
    }
}

fn mismatch(expected: &'static str, actual: &Geometry) -> GeowireError {
    GeowireError::TypeMismatch {
        expected,
        actual: actual.geometry_type().name(),
    }
}

/// Read a coordinate-only point, Z and M per the enclosing dimensions
fn read_slim_point<S: ByteSource>(
    reader: &mut ValueReader<S>,
    dims: Dimensions,
) -> Result<Point, GeowireError> {
    let x = reader.read_f64()?;
    let y = reader.read_f64()?;
    let z = if dims_is_3d(dims) {
        Some(reader.read_f64()?)
    } else {
        None
    };
    let m = if dims_has_measure(dims) {
        Some(reader.read_f64()?)
    } else {
        None
    };
    Ok(Point::xyzm(x, y, z, m))
}

/// Read a count-prefixed run of slim points
fn read_slim_points<S: ByteSource>(
    reader: &mut ValueReader<S>,
    dims: Dimensions,
) -> Result<Vec<Point>, GeowireError> {
    let count = read_count(reader, 16)?;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(read_slim_point(reader, dims)?);
    }
    Ok(points)
}

fn read_polygon_body<S: ByteSource>(
    reader: &mut ValueReader<S>,
    dims: Dimensions,
) -> Result<Polygon, GeowireError> {
    let count = read_count(reader, 4)?;
    let mut rings = Vec::with_capacity(count);
    for _ in 0..count {
        let points = read_slim_points(reader, dims)?;
        if points.is_empty() {
            rings.push(LinearRing::empty(dims));
        } else {
            rings.push(LinearRing::new(points));
        }
    }
    if rings.is_empty() {
        Ok(Polygon::empty(dims))
    } else {
        Ok(Polygon::new(rings))
    }
}

/// Read a count-prefixed run of fully-headered sub-geometries, converting
/// each through the collection's element contract
fn read_elements<S: ByteSource, T>(
    reader: &mut ValueReader<S>,
    convert: impl Fn(Geometry) -> Result<T, GeowireError>,
) -> Result<Vec<T>, GeowireError> {
    let count = read_count(reader, 5)?;
    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        elements.push(convert(parse_geometry(reader)?)?);
    }
    Ok(elements)
}

/// Read an element count, rejecting counts the remaining input cannot
/// possibly satisfy before any allocation happens
fn read_count<S: ByteSource>(
    reader: &mut ValueReader<S>,
    min_element_bytes: usize,
) -> Result<usize, GeowireError> {
    let count = reader.read_u32()? as usize;
    let need = count.saturating_mul(min_element_bytes);
    if need > reader.remaining() {
        return Err(GeowireError::Truncated {
            offset: reader.position(),
            needed: need - reader.remaining(),
        });
    }
    Ok(count)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stream::{ByteOrder, ValueWriter};
    use crate::types::SRID_FLAG_BIT;

    fn point_wkb(order: ByteOrder, x: f64, y: f64) -> Vec<u8> {
        let mut writer = ValueWriter::new(Vec::new(), order);
        writer.write_order();
        writer.write_u32(1);
        writer.write_f64(x);
        writer.write_f64(y);
        writer.into_inner()
    }

    #[test]
    fn point_both_orders() {
        for order in [ByteOrder::Ndr, ByteOrder::Xdr] {
            let geometry = read_geometry(&point_wkb(order, 1.0, 2.0)).unwrap();
            assert_eq!(geometry, Geometry::Point(Point::new(1.0, 2.0)));
        }
    }

    #[test]
    fn point_with_srid() {
        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_u32(1 | SRID_FLAG_BIT);
        writer.write_i32(4326);
        writer.write_f64(1.0);
        writer.write_f64(2.0);

        let geometry = read_geometry(&writer.into_inner()).unwrap();
        assert_eq!(geometry.srid(), 4326);
        assert_eq!(geometry, Geometry::Point(Point::new(1.0, 2.0).with_srid(4326)));
    }

    #[test]
    fn negative_srid_clamps_to_zero() {
        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_u32(1 | SRID_FLAG_BIT);
        writer.write_i32(-5);
        writer.write_f64(1.0);
        writer.write_f64(2.0);

        let geometry = read_geometry(&writer.into_inner()).unwrap();
        assert_eq!(geometry.srid(), 0);
    }

    #[test]
    fn unknown_type_code() {
        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_u32(99);

        let err = read_geometry(&writer.into_inner()).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported geometry type 99");
    }

    #[test]
    fn bad_endian_tag() {
        let err = read_geometry(&[0x17]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown byte-order tag 23");
    }

    #[test]
    fn multipoint_rejects_wrong_element() {
        // A MULTIPOINT whose single element is a LINESTRING header
        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_u32(4);
        writer.write_u32(1);
        writer.write_order();
        writer.write_u32(2);
        writer.write_u32(0);

        let err = read_geometry(&writer.into_inner()).unwrap_err();
        assert_eq!(
            err,
            GeowireError::TypeMismatch {
                expected: "Point",
                actual: "LineString",
            }
        );
    }

    #[test]
    fn truncated_point() {
        let wkb = point_wkb(ByteOrder::Ndr, 1.0, 2.0);
        for i in 0..wkb.len() {
            assert!(
                read_geometry(&wkb[0..i]).is_err(),
                "0..{i} unexpectedly succeeded"
            );
        }
    }

    #[test]
    fn oversized_count_fails_before_allocation() {
        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_u32(2);
        writer.write_u32(u32::MAX);

        let err = read_geometry(&writer.into_inner()).unwrap_err();
        assert!(matches!(err, GeowireError::Truncated { .. }));
    }

    #[test]
    fn hex_entry_point() {
        // POINT (1 2), little-endian
        let geometry = read_geometry_hex("0101000000000000000000F03F0000000000000040").unwrap();
        assert_eq!(geometry, Geometry::Point(Point::new(1.0, 2.0)));
    }

    #[test]
    fn mixed_endian_collection() {
        // A little-endian GEOMETRYCOLLECTION wrapping one big-endian point
        let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Ndr);
        writer.write_order();
        writer.write_u32(7);
        writer.write_u32(1);
        let mut bytes = writer.into_inner();
        bytes.extend_from_slice(&point_wkb(ByteOrder::Xdr, 1.0, 2.0));

        let geometry = read_geometry(&bytes).unwrap();
        assert_eq!(geometry.num_points(), 1);
        assert_eq!(geometry.point_n(0).unwrap().x(), 1.0);
    }
}

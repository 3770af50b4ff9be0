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

//! WKB/EWKB encoder
//!
//! Mirrors the decoder's bit layout exactly: the SRID flag is emitted
//! whenever `srid != 0`, the Z flag for 3D geometries, the M flag for
//! measured ones. The encoder performs no validation — the caller is
//! expected to have run `Geometry::check_consistency` once — and an
//! inconsistent tree may therefore produce structurally invalid bytes.
//! Every ring and curve variant the decoder can produce is encodable;
//! the only unencodable value is a standalone [LinearRing].

use geo_traits::Dimensions;

use crate::error::GeowireError;
use crate::geometry::{
    CircularString, CompoundCurve, Curve, CurvePolygon, CurveSegment, Geometry,
    GeometryCollection, LineString, LinearRing, MultiCurve, MultiLineString, MultiPoint,
    MultiPolygon, MultiSurface, Point, Polygon, Surface,
};
use crate::stream::{ByteOrder, ByteSink, ValueWriter};
use crate::types::{dims_has_measure, dims_is_3d, GeometryTypeId, TypeWord};

/// Encode a geometry as EWKB bytes
pub fn write_geometry(geometry: &Geometry, order: ByteOrder) -> Result<Vec<u8>, GeowireError> {
    let mut writer = ValueWriter::new(Vec::with_capacity(estimate_bytes(geometry)), order);
    write_into(&mut writer, geometry)?;
    Ok(writer.into_inner())
}

/// Encode a geometry as the uppercase hex-text envelope
///
/// An exact byte-for-byte dump of the binary form: coordinates pass through
/// as their 64-bit bit patterns, never re-rounded through decimal text.
pub fn write_geometry_hex(geometry: &Geometry, order: ByteOrder) -> Result<String, GeowireError> {
    let mut writer = ValueWriter::new(
        String::with_capacity(estimate_bytes(geometry) * 2),
        order,
    );
    write_into(&mut writer, geometry)?;
    Ok(writer.into_inner())
}

/// The exact number of bytes [write_geometry] will produce
///
/// Used to pre-size output buffers before a single write happens.
pub fn estimate_bytes(geometry: &Geometry) -> usize {
    match geometry {
        Geometry::Point(g) => header_size(g.srid()) + slim_point_size(g.dims()),
        Geometry::LineString(g) => line_string_size(g),
        Geometry::LinearRing(g) => slim_ring_size(g),
        Geometry::Polygon(g) => polygon_size(g),
        Geometry::MultiPoint(g) => {
            let per_point = header_size(g.srid()) + slim_point_size(g.dims());
            header_size(g.srid()) + 4 + g.num_geometries() * per_point
        }
        Geometry::MultiLineString(g) => {
            header_size(g.srid()) + 4 + g.elements().iter().map(line_string_size).sum::<usize>()
        }
        Geometry::MultiPolygon(g) => {
            header_size(g.srid()) + 4 + g.elements().iter().map(polygon_size).sum::<usize>()
        }
        Geometry::GeometryCollection(g) => {
            header_size(g.srid()) + 4 + g.elements().iter().map(estimate_bytes).sum::<usize>()
        }
        Geometry::CircularString(g) => circular_string_size(g),
        Geometry::CompoundCurve(g) => compound_curve_size(g),
        Geometry::CurvePolygon(g) => curve_polygon_size(g),
        Geometry::MultiCurve(g) => {
            header_size(g.srid()) + 4 + g.elements().iter().map(curve_size).sum::<usize>()
        }
        Geometry::MultiSurface(g) => {
            header_size(g.srid()) + 4 + g.elements().iter().map(surface_size).sum::<usize>()
        }
    }
}

fn header_size(srid: i32) -> usize {
    if srid != 0 {
        9
    } else {
        5
    }
}

fn slim_point_size(dims: Dimensions) -> usize {
    8 * (2 + dims_is_3d(dims) as usize + dims_has_measure(dims) as usize)
}

fn line_string_size(g: &LineString) -> usize {
    header_size(g.srid()) + 4 + g.num_points() * slim_point_size(g.dims())
}

fn circular_string_size(g: &CircularString) -> usize {
    header_size(g.srid()) + 4 + g.num_points() * slim_point_size(g.dims())
}

fn slim_ring_size(g: &LinearRing) -> usize {
    4 + g.num_points() * slim_point_size(g.dims())
}

fn polygon_size(g: &Polygon) -> usize {
    header_size(g.srid()) + 4 + g.rings().iter().map(slim_ring_size).sum::<usize>()
}

fn compound_curve_size(g: &CompoundCurve) -> usize {
    let segments: usize = g
        .segments()
        .iter()
        .map(|s| match s {
            CurveSegment::LineString(l) => line_string_size(l),
            CurveSegment::CircularString(c) => circular_string_size(c),
        })
        .sum();
    header_size(g.srid()) + 4 + segments
}

fn curve_size(c: &Curve) -> usize {
    match c {
        Curve::LineString(g) => line_string_size(g),
        Curve::CircularString(g) => circular_string_size(g),
        Curve::CompoundCurve(g) => compound_curve_size(g),
    }
}

fn curve_polygon_size(g: &CurvePolygon) -> usize {
    header_size(g.srid()) + 4 + g.rings().iter().map(curve_size).sum::<usize>()
}

fn surface_size(s: &Surface) -> usize {
    match s {
        Surface::Polygon(g) => polygon_size(g),
        Surface::CurvePolygon(g) => curve_polygon_size(g),
    }
}

fn write_into<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    geometry: &Geometry,
) -> Result<(), GeowireError> {
    match geometry {
        Geometry::Point(g) => write_point(writer, g),
        Geometry::LineString(g) => write_line_string(writer, g),
        Geometry::Polygon(g) => write_polygon(writer, g),
        Geometry::MultiPoint(g) => write_multi_point(writer, g),
        Geometry::MultiLineString(g) => write_multi_line_string(writer, g),
        Geometry::MultiPolygon(g) => write_multi_polygon(writer, g),
        Geometry::GeometryCollection(g) => write_geometry_collection(writer, g),
        Geometry::CircularString(g) => write_circular_string(writer, g),
        Geometry::CompoundCurve(g) => write_compound_curve(writer, g),
        Geometry::CurvePolygon(g) => write_curve_polygon(writer, g),
        Geometry::MultiCurve(g) => write_multi_curve(writer, g),
        Geometry::MultiSurface(g) => write_multi_surface(writer, g),
        // Rings only exist inside polygons; they have no wire header
        Geometry::LinearRing(_) => Err(GeowireError::UnsupportedType(
            GeometryTypeId::LinearRing.name().to_string(),
        )),
    }
}

fn write_header<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    geometry_type: GeometryTypeId,
    dims: Dimensions,
    srid: i32,
) {
    writer.write_order();
    writer.write_u32(TypeWord::new(geometry_type, dims, srid != 0).pack());
    if srid != 0 {
        writer.write_i32(srid);
    }
}

/// Write one coordinate tuple, padding an absent Z or M with NaN when the
/// enclosing dimensions call for it
fn write_slim_point<S: ByteSink>(writer: &mut ValueWriter<S>, point: &Point, dims: Dimensions) {
    writer.write_f64(point.x());
    writer.write_f64(point.y());
    if dims_is_3d(dims) {
        writer.write_f64(point.z().unwrap_or(f64::NAN));
    }
    if dims_has_measure(dims) {
        writer.write_f64(point.m().unwrap_or(f64::NAN));
    }
}

fn write_count<S: ByteSink>(writer: &mut ValueWriter<S>, count: usize) -> Result<(), GeowireError> {
    let count: u32 = count.try_into().map_err(|_| {
        GeowireError::Format("Collection contains too many elements for WKB format".to_string())
    })?;
    writer.write_u32(count);
    Ok(())
}

fn write_point<S: ByteSink>(writer: &mut ValueWriter<S>, g: &Point) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::Point, g.dims(), g.srid());
    write_slim_point(writer, g, g.dims());
    Ok(())
}

fn write_slim_points<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    points: &[Point],
    dims: Dimensions,
) -> Result<(), GeowireError> {
    write_count(writer, points.len())?;
    for point in points {
        write_slim_point(writer, point, dims);
    }
    Ok(())
}

fn write_line_string<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &LineString,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::LineString, g.dims(), g.srid());
    write_slim_points(writer, g.points(), g.dims())
}

fn write_circular_string<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &CircularString,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::CircularString, g.dims(), g.srid());
    write_slim_points(writer, g.points(), g.dims())
}

fn write_polygon<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &Polygon,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::Polygon, g.dims(), g.srid());
    write_count(writer, g.num_rings())?;
    for ring in g.rings() {
        write_slim_points(writer, ring.points(), g.dims())?;
    }
    Ok(())
}

fn write_compound_curve<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &CompoundCurve,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::CompoundCurve, g.dims(), g.srid());
    write_count(writer, g.num_segments())?;
    for segment in g.segments() {
        match segment {
            CurveSegment::LineString(l) => write_line_string(writer, l)?,
            CurveSegment::CircularString(c) => write_circular_string(writer, c)?,
        }
    }
    Ok(())
}

fn write_curve<S: ByteSink>(writer: &mut ValueWriter<S>, curve: &Curve) -> Result<(), GeowireError> {
    match curve {
        Curve::LineString(g) => write_line_string(writer, g),
        Curve::CircularString(g) => write_circular_string(writer, g),
        Curve::CompoundCurve(g) => write_compound_curve(writer, g),
    }
}

fn write_curve_polygon<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &CurvePolygon,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::CurvePolygon, g.dims(), g.srid());
    write_count(writer, g.num_rings())?;
    for ring in g.rings() {
        write_curve(writer, ring)?;
    }
    Ok(())
}

fn write_multi_point<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &MultiPoint,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::MultiPoint, g.dims(), g.srid());
    write_count(writer, g.num_geometries())?;
    for point in g.elements() {
        write_point(writer, point)?;
    }
    Ok(())
}

fn write_multi_line_string<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &MultiLineString,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::MultiLineString, g.dims(), g.srid());
    write_count(writer, g.num_geometries())?;
    for line in g.elements() {
        write_line_string(writer, line)?;
    }
    Ok(())
}

fn write_multi_polygon<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &MultiPolygon,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::MultiPolygon, g.dims(), g.srid());
    write_count(writer, g.num_geometries())?;
    for polygon in g.elements() {
        write_polygon(writer, polygon)?;
    }
    Ok(())
}

fn write_multi_curve<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &MultiCurve,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::MultiCurve, g.dims(), g.srid());
    write_count(writer, g.num_geometries())?;
    for curve in g.elements() {
        write_curve(writer, curve)?;
    }
    Ok(())
}

fn write_multi_surface<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &MultiSurface,
) -> Result<(), GeowireError> {
    write_header(writer, GeometryTypeId::MultiSurface, g.dims(), g.srid());
    write_count(writer, g.num_geometries())?;
    for surface in g.elements() {
        match surface {
            Surface::Polygon(p) => write_polygon(writer, p)?,
            Surface::CurvePolygon(p) => write_curve_polygon(writer, p)?,
        }
    }
    Ok(())
}

fn write_geometry_collection<S: ByteSink>(
    writer: &mut ValueWriter<S>,
    g: &GeometryCollection,
) -> Result<(), GeowireError> {
    write_header(
        writer,
        GeometryTypeId::GeometryCollection,
        g.dims(),
        g.srid(),
    );
    write_count(writer, g.num_geometries())?;
    for geometry in g.elements() {
        write_into(writer, geometry)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ewkb_reader::read_geometry;
    use crate::types::SRID_FLAG_BIT;

    #[test]
    fn point_bytes() {
        let geometry = Geometry::Point(Point::new(0.0, 1.0));
        let wkb = write_geometry(&geometry, ByteOrder::Ndr).unwrap();

        let mut expected = vec![0x01, 0x01, 0x00, 0x00, 0x00];
        expected.extend_from_slice(&0.0f64.to_le_bytes());
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        assert_eq!(wkb, expected);
    }

    #[test]
    fn point_bytes_big_endian() {
        let geometry = Geometry::Point(Point::new(0.0, 1.0));
        let wkb = write_geometry(&geometry, ByteOrder::Xdr).unwrap();

        let mut expected = vec![0x00, 0x00, 0x00, 0x00, 0x01];
        expected.extend_from_slice(&0.0f64.to_be_bytes());
        expected.extend_from_slice(&1.0f64.to_be_bytes());
        assert_eq!(wkb, expected);
    }

    #[test]
    fn srid_flag_emitted_when_nonzero() {
        let geometry = Geometry::Point(Point::new(1.0, 2.0).with_srid(4326));
        let wkb = write_geometry(&geometry, ByteOrder::Ndr).unwrap();

        let mut expected = vec![0x01];
        expected.extend_from_slice(&(1u32 | SRID_FLAG_BIT).to_le_bytes());
        expected.extend_from_slice(&4326u32.to_le_bytes());
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.extend_from_slice(&2.0f64.to_le_bytes());
        assert_eq!(wkb, expected);
    }

    #[test]
    fn linear_ring_is_not_encodable() {
        let ring = LinearRing::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        ]);
        let err = write_geometry(&Geometry::LinearRing(ring), ByteOrder::Ndr).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported geometry type LinearRing");
    }

    #[test]
    fn hex_is_uppercase_byte_dump() {
        let geometry = Geometry::Point(Point::new(1.0, 2.0));
        let wkb = write_geometry(&geometry, ByteOrder::Ndr).unwrap();
        let hex = write_geometry_hex(&geometry, ByteOrder::Ndr).unwrap();

        assert_eq!(hex, "0101000000000000000000F03F0000000000000040");
        assert_eq!(hex.len(), wkb.len() * 2);
    }

    #[test]
    fn estimate_matches_output_exactly() {
        let polygon = Polygon::new(vec![LinearRing::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        ])]);
        let samples = [
            Geometry::Point(Point::new_z(1.0, 2.0, 3.0).with_srid(3857)),
            Geometry::Polygon(polygon.clone()),
            Geometry::MultiPolygon(MultiPolygon::new(vec![polygon.clone()])),
            Geometry::GeometryCollection(GeometryCollection::new(vec![
                Geometry::Point(Point::new(0.0, 0.0)),
                Geometry::Polygon(polygon),
            ])),
            Geometry::CurvePolygon(CurvePolygon::new(vec![Curve::CircularString(
                CircularString::new(vec![
                    Point::new(0.0, 0.0),
                    Point::new(1.0, 1.0),
                    Point::new(2.0, 0.0),
                ]),
            )])),
        ];

        for geometry in samples {
            let wkb = write_geometry(&geometry, ByteOrder::Ndr).unwrap();
            assert_eq!(
                estimate_bytes(&geometry),
                wkb.len(),
                "estimate mismatch for {:?}",
                geometry.geometry_type()
            );
        }
    }

    #[test]
    fn curve_polygon_rings_cover_every_curve_form() {
        // One ring of each form: straight, arc, compound
        let straight = Curve::LineString(LineString::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 0.0),
        ]));
        let arc = Curve::CircularString(CircularString::new(vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
        ]));
        let compound = Curve::CompoundCurve(CompoundCurve::new(vec![
            CurveSegment::LineString(LineString::new(vec![
                Point::new(5.0, 5.0),
                Point::new(6.0, 5.0),
            ])),
            CurveSegment::CircularString(CircularString::new(vec![
                Point::new(6.0, 5.0),
                Point::new(6.5, 5.5),
                Point::new(5.0, 5.0),
            ])),
        ]));
        let geometry = Geometry::CurvePolygon(CurvePolygon::new(vec![straight, arc, compound]));

        let wkb = write_geometry(&geometry, ByteOrder::Ndr).unwrap();
        let back = read_geometry(&wkb).unwrap();
        assert_eq!(back, geometry);
    }

    #[test]
    fn empty_point_is_nan_nan() {
        let wkb = write_geometry(&Geometry::Point(Point::empty()), ByteOrder::Ndr).unwrap();
        let back = read_geometry(&wkb).unwrap();
        assert!(back.is_empty());
        assert_eq!(back, Geometry::Point(Point::empty()));
    }
}

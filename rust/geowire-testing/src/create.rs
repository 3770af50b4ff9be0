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

//! Construction helpers for geometry-valued test cases

use geo_traits::Dimensions;
use geowire_geometry::geometry::{
    CircularString, CompoundCurve, Curve, CurvePolygon, CurveSegment, Geometry,
    GeometryCollection, LineString, LinearRing, MultiCurve, MultiLineString, MultiPoint,
    MultiPolygon, MultiSurface, Point, Polygon, Surface,
};

/// A 2D point
pub fn xy(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// A 3D point
pub fn xyz(x: f64, y: f64, z: f64) -> Point {
    Point::new_z(x, y, z)
}

/// A LineString through 2D coordinates
pub fn line(coords: &[(f64, f64)]) -> LineString {
    LineString::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

/// A LinearRing through 2D coordinates
pub fn ring(coords: &[(f64, f64)]) -> LinearRing {
    LinearRing::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

/// A CircularString through 2D coordinates
pub fn arc(coords: &[(f64, f64)]) -> CircularString {
    CircularString::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

/// A unit triangle with one hole
pub fn triangle_with_hole() -> Polygon {
    Polygon::new(vec![
        ring(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]),
        ring(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0), (1.0, 1.0)]),
    ])
}

/// A compound curve chaining one straight and one arc segment
pub fn straight_then_arc() -> CompoundCurve {
    CompoundCurve::new(vec![
        CurveSegment::LineString(line(&[(0.0, 0.0), (1.0, 0.0)])),
        CurveSegment::CircularString(arc(&[(1.0, 0.0), (1.5, 0.5), (2.0, 0.0)])),
    ])
}

/// A curve polygon carrying one ring of each curve form
pub fn curve_polygon_all_ring_forms() -> CurvePolygon {
    CurvePolygon::new(vec![
        Curve::LineString(line(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)])),
        Curve::CircularString(arc(&[(1.0, 1.0), (2.0, 2.0), (1.0, 1.0)])),
        Curve::CompoundCurve(CompoundCurve::new(vec![
            CurveSegment::LineString(line(&[(3.0, 3.0), (3.5, 3.0)])),
            CurveSegment::CircularString(arc(&[(3.5, 3.0), (3.25, 3.25), (3.0, 3.0)])),
        ])),
    ])
}

/// One geometry of every serializable variant, including Z/M carriers,
/// nested collections, and empty values
///
/// This is the matrix the round-trip tests sweep; every shape the decoder
/// can produce should have a representative here.
pub fn sample_geometries() -> Vec<Geometry> {
    vec![
        Geometry::Point(xy(1.0, 2.0)),
        Geometry::Point(xyz(1.0, 2.0, 3.0)),
        Geometry::Point(xy(1.0, 2.0).with_m(4.0)),
        Geometry::Point(xyz(1.0, 2.0, 3.0).with_m(4.0)),
        Geometry::Point(Point::empty()),
        Geometry::LineString(line(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)])),
        Geometry::LineString(LineString::new(vec![
            xyz(0.0, 0.0, 0.0),
            xyz(1.0, 1.0, 1.0),
        ])),
        Geometry::LineString(LineString::empty(Dimensions::Xy)),
        Geometry::Polygon(triangle_with_hole()),
        Geometry::Polygon(Polygon::empty(Dimensions::Xy)),
        Geometry::CircularString(arc(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])),
        Geometry::CompoundCurve(straight_then_arc()),
        Geometry::CurvePolygon(curve_polygon_all_ring_forms()),
        Geometry::MultiPoint(MultiPoint::new(vec![xy(1.0, 2.0), xy(3.0, 4.0)])),
        Geometry::MultiPoint(MultiPoint::empty(Dimensions::Xy)),
        Geometry::MultiLineString(MultiLineString::new(vec![
            line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            line(&[(3.0, 3.0), (4.0, 4.0)]),
        ])),
        Geometry::MultiPolygon(MultiPolygon::new(vec![
            triangle_with_hole(),
            Polygon::new(vec![ring(&[(20.0, 20.0), (21.0, 20.0), (20.0, 21.0), (20.0, 20.0)])]),
        ])),
        Geometry::MultiCurve(MultiCurve::new(vec![
            Curve::LineString(line(&[(0.0, 0.0), (1.0, 0.0)])),
            Curve::CircularString(arc(&[(1.0, 0.0), (1.5, 0.5), (2.0, 0.0)])),
            Curve::CompoundCurve(straight_then_arc()),
        ])),
        Geometry::MultiSurface(MultiSurface::new(vec![
            Surface::Polygon(triangle_with_hole()),
            Surface::CurvePolygon(curve_polygon_all_ring_forms()),
        ])),
        Geometry::GeometryCollection(GeometryCollection::new(vec![
            Geometry::Point(xy(1.0, 2.0)),
            Geometry::LineString(line(&[(0.0, 0.0), (1.0, 1.0)])),
            Geometry::GeometryCollection(GeometryCollection::new(vec![Geometry::Point(xy(
                9.0, 9.0,
            ))])),
        ])),
        Geometry::GeometryCollection(GeometryCollection::empty(Dimensions::Xy)),
    ]
}

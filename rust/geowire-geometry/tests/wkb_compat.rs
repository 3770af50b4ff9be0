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

//! Cross-validation of the XY subset against an independent WKB writer
//!
//! For geometries both stacks understand (no curves, no SRID, no Z/M), our
//! encoder must produce byte-identical output to the wkb crate fed by
//! wkt-parsed text, and our decoder must read the wkb crate's bytes back
//! into the equivalent tree.

use std::str::FromStr;

use wkb::writer::{write_geometry as write_reference_wkb, WriteOptions};
use wkt::Wkt;

use geowire_geometry::ewkb_reader::read_geometry;
use geowire_geometry::ewkb_writer::write_geometry;
use geowire_geometry::geometry::Geometry;
use geowire_geometry::stream::ByteOrder;
use geowire_testing::create::{line, ring, xy};
use geowire_geometry::geometry::{
    GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon,
};

fn reference_wkb(wkt_value: &str) -> Vec<u8> {
    let geom = Wkt::<f64>::from_str(wkt_value).unwrap();
    let mut buf: Vec<u8> = vec![];
    write_reference_wkb(&mut buf, &geom, &WriteOptions::default()).unwrap();
    buf
}

fn assert_matches_reference(geometry: Geometry, wkt_value: &str) {
    let expected = reference_wkb(wkt_value);
    let actual = write_geometry(&geometry, ByteOrder::Ndr).unwrap();
    assert_eq!(actual, expected, "byte mismatch for {wkt_value}");

    // And the reference bytes decode back into the same tree
    assert_eq!(read_geometry(&expected).unwrap(), geometry);
}

#[test]
fn point() {
    assert_matches_reference(Geometry::Point(xy(0.0, 1.0)), "POINT (0 1)");
}

#[test]
fn linestring() {
    assert_matches_reference(
        Geometry::LineString(line(&[(0.0, 1.0), (2.0, 3.0)])),
        "LINESTRING (0 1, 2 3)",
    );
    assert_matches_reference(
        Geometry::LineString(LineString::new(vec![])),
        "LINESTRING EMPTY",
    );
}

#[test]
fn polygon() {
    assert_matches_reference(
        Geometry::Polygon(Polygon::new(vec![ring(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ])])),
        "POLYGON ((0 0, 1 0, 0 1, 0 0))",
    );
    assert_matches_reference(Geometry::Polygon(Polygon::new(vec![])), "POLYGON EMPTY");
}

#[test]
fn polygon_with_hole() {
    assert_matches_reference(
        Geometry::Polygon(Polygon::new(vec![
            ring(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]),
            ring(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0), (1.0, 1.0)]),
        ])),
        "POLYGON ((0 0, 10 0, 0 10, 0 0), (1 1, 2 1, 1 2, 1 1))",
    );
}

#[test]
fn multipoint() {
    assert_matches_reference(
        Geometry::MultiPoint(MultiPoint::new(vec![xy(0.0, 0.0), xy(1.0, 1.0)])),
        "MULTIPOINT ((0 0), (1 1))",
    );
    assert_matches_reference(
        Geometry::MultiPoint(MultiPoint::new(vec![])),
        "MULTIPOINT EMPTY",
    );
}

#[test]
fn multilinestring() {
    assert_matches_reference(
        Geometry::MultiLineString(MultiLineString::new(vec![
            line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            line(&[(3.0, 3.0), (4.0, 4.0)]),
        ])),
        "MULTILINESTRING ((0 0, 1 1, 2 2), (3 3, 4 4))",
    );
}

#[test]
fn multipolygon() {
    assert_matches_reference(
        Geometry::MultiPolygon(MultiPolygon::new(vec![
            Polygon::new(vec![ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)])]),
            Polygon::new(vec![ring(&[(2.0, 2.0), (3.0, 2.0), (2.0, 3.0), (2.0, 2.0)])]),
        ])),
        "MULTIPOLYGON (((0 0, 1 0, 0 1, 0 0)), ((2 2, 3 2, 2 3, 2 2)))",
    );
}

#[test]
fn geometrycollection() {
    assert_matches_reference(
        Geometry::GeometryCollection(GeometryCollection::new(vec![
            Geometry::Point(xy(1.0, 2.0)),
            Geometry::LineString(line(&[(1.0, 2.0), (3.0, 4.0)])),
        ])),
        "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (1 2, 3 4))",
    );
    assert_matches_reference(
        Geometry::GeometryCollection(GeometryCollection::new(vec![])),
        "GEOMETRYCOLLECTION EMPTY",
    );
}

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

//! Hand-assembled WKB/EWKB byte fixtures
//!
//! Each constant is written out byte by byte so tests exercise the exact
//! wire layout rather than whatever an encoder happens to emit.

/// EWKB for POINT (1 2) with SRID 4326
/// Little endian, geometry type 1 (POINT) with SRID flag (0x20000000)
pub const POINT_WITH_SRID_4326_EWKB: [u8; 25] = [
    0x01, // byte-order
    0x01, 0x00, 0x00, 0x20, // geometry type 1 (POINT) with SRID flag
    0xe6, 0x10, 0x00, 0x00, // SRID 4326
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // y = 2.0
];

/// EWKB for POINT Z (1 2 3) with SRID 3857
/// Little endian, geometry type 1 with Z (0x80000000) and SRID flags
pub const POINT_Z_WITH_SRID_3857_EWKB: [u8; 33] = [
    0x01, // byte-order
    0x01, 0x00, 0x00, 0xa0, // geometry type
    0x11, 0x0f, 0x00, 0x00, // SRID 3857
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // y = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x40, // z = 3.0
];

/// EWKB for POINT ZM (1 2 3 4), no SRID
/// Little endian, geometry type 1 with Z (0x80000000) and M (0x40000000)
pub const POINT_ZM_EWKB: [u8; 37] = [
    0x01, // byte-order
    0x01, 0x00, 0x00, 0xc0, // geometry type
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // y = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x40, // z = 3.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x40, // m = 4.0
];

/// EWKB for POINT (1 2) whose SRID field is -5
/// Decoders clamp the negative SRID to 0 (unknown)
pub const POINT_WITH_NEGATIVE_SRID_EWKB: [u8; 25] = [
    0x01, // byte-order
    0x01, 0x00, 0x00, 0x20, // geometry type 1 (POINT) with SRID flag
    0xfb, 0xff, 0xff, 0xff, // SRID -5
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // y = 2.0
];

/// WKB for LINESTRING (1 2, 3 4) in big-endian (XDR) byte order
pub const LINESTRING_XDR_WKB: [u8; 41] = [
    0x00, // byte-order (XDR)
    0x00, 0x00, 0x00, 0x02, // geometry type 2 (LINESTRING)
    0x00, 0x00, 0x00, 0x02, // number of points (2)
    0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 1.0
    0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y1 = 2.0
    0x40, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x2 = 3.0
    0x40, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y2 = 4.0
];

/// WKB for CIRCULARSTRING (0 0, 1 1, 2 0)
/// Little endian, geometry type 8
pub const CIRCULARSTRING_WKB: [u8; 57] = [
    0x01, // byte-order
    0x08, 0x00, 0x00, 0x00, // geometry type 8 (CIRCULARSTRING)
    0x03, 0x00, 0x00, 0x00, // number of points (3)
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x2 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // y2 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // x3 = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y3 = 0.0
];

/// WKB for COMPOUNDCURVE (LINESTRING (0 0, 1 0), CIRCULARSTRING (1 0, 1.5 0.5, 2 0))
/// Little endian, geometry type 9; each segment carries its own header
pub const COMPOUNDCURVE_WKB: [u8; 107] = [
    0x01, // byte-order
    0x09, 0x00, 0x00, 0x00, // geometry type 9 (COMPOUNDCURVE)
    0x02, 0x00, 0x00, 0x00, // number of segments (2)
    // segment 1: LINESTRING (0 0, 1 0)
    0x01, // byte-order
    0x02, 0x00, 0x00, 0x00, // geometry type 2 (LINESTRING)
    0x02, 0x00, 0x00, 0x00, // number of points (2)
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x2 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y2 = 0.0
    // segment 2: CIRCULARSTRING (1 0, 1.5 0.5, 2 0)
    0x01, // byte-order
    0x08, 0x00, 0x00, 0x00, // geometry type 8 (CIRCULARSTRING)
    0x03, 0x00, 0x00, 0x00, // number of points (3)
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x1 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf8, 0x3f, // x2 = 1.5
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xe0, 0x3f, // y2 = 0.5
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // x3 = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y3 = 0.0
];

/// EWKB for CURVEPOLYGON (CIRCULARSTRING (0 0, 1 1, 0 0)) with SRID 4326
/// Little endian, geometry type 10 with SRID flag; the SRID appears only on
/// the outer header, as PostGIS emits it
pub const CURVEPOLYGON_WITH_SRID_4326_EWKB: [u8; 70] = [
    0x01, // byte-order
    0x0a, 0x00, 0x00, 0x20, // geometry type 10 (CURVEPOLYGON) with SRID flag
    0xe6, 0x10, 0x00, 0x00, // SRID 4326
    0x01, 0x00, 0x00, 0x00, // number of rings (1)
    // ring: CIRCULARSTRING (0 0, 1 1, 0 0)
    0x01, // byte-order
    0x08, 0x00, 0x00, 0x00, // geometry type 8 (CIRCULARSTRING)
    0x03, 0x00, 0x00, 0x00, // number of points (3)
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x2 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // y2 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x3 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y3 = 0.0
];

/// WKB for MULTISURFACE (POLYGON ((0 0, 1 0, 0 1, 0 0)))
/// Little endian, geometry type 12
pub const MULTISURFACE_WKB: [u8; 86] = [
    0x01, // byte-order
    0x0c, 0x00, 0x00, 0x00, // geometry type 12 (MULTISURFACE)
    0x01, 0x00, 0x00, 0x00, // number of surfaces (1)
    // surface 1: POLYGON ((0 0, 1 0, 0 1, 0 0))
    0x01, // byte-order
    0x03, 0x00, 0x00, 0x00, // geometry type 3 (POLYGON)
    0x01, 0x00, 0x00, 0x00, // number of rings (1)
    0x04, 0x00, 0x00, 0x00, // number of points in ring (4)
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // x2 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y2 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x3 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // y3 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x4 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y4 = 0.0
];

/// WKB for MULTIPOINT ((1 2)) where the outer header is little-endian but
/// the nested point header is big-endian
pub const MULTIPOINT_MIXED_ENDIAN_WKB: [u8; 30] = [
    0x01, // byte-order (NDR)
    0x04, 0x00, 0x00, 0x00, // geometry type 4 (MULTIPOINT)
    0x01, 0x00, 0x00, 0x00, // number of points (1)
    // nested point, big-endian
    0x00, // byte-order (XDR)
    0x00, 0x00, 0x00, 0x01, // geometry type 1 (POINT)
    0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x = 1.0
    0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y = 2.0
];

/// The hex-text envelope of [POINT_WITH_SRID_4326_EWKB]
pub const POINT_WITH_SRID_4326_HEX: &str =
    "0101000020E6100000000000000000F03F0000000000000040";

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
use geo_traits::Dimensions;

use crate::error::GeowireError;
use crate::types::{dims_has_measure, dims_is_3d, GeometryTypeId};

/// Coordinate equality with NaN treated as equal to NaN
///
/// Wire-format round trips must preserve the "absent" sentinel, so two NaN
/// coordinates compare equal here even though `f64::eq` says otherwise.
fn coord_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn opt_coord_eq(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => coord_eq(a, b),
        _ => false,
    }
}

fn clamp_srid(srid: i32) -> i32 {
    srid.max(0)
}

/// A single position, with optional Z and M
///
/// Z and M are modeled as `Option<f64>`; constructors normalize a NaN input
/// to `None`, preserving the wire convention that NaN marks an absent
/// dimension. The invariant that `Some(f64::NAN)` never exists in a Point is
/// what lets equality treat presence and dimensionality uniformly.
#[derive(Debug, Clone)]
pub struct Point {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
    srid: i32,
}

fn normalize_coord(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

impl Point {
    /// A 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Self::xyzm(x, y, None, None)
    }

    /// A 3D point
    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self::xyzm(x, y, Some(z), None)
    }

    /// A point with any combination of Z and M
    pub fn xyzm(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self {
        Self {
            x,
            y,
            z: normalize_coord(z),
            m: normalize_coord(m),
            srid: 0,
        }
    }

    /// The empty point: both X and Y are NaN
    pub fn empty() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> Option<f64> {
        self.z
    }

    pub fn m(&self) -> Option<f64> {
        self.m
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Replace the Z coordinate; NaN clears it
    pub fn set_z(&mut self, z: Option<f64>) {
        self.z = normalize_coord(z);
    }

    /// Replace the M coordinate; NaN clears it
    pub fn set_m(&mut self, m: Option<f64>) {
        self.m = normalize_coord(m);
    }

    /// Builder form of [Point::set_z]
    pub fn with_z(mut self, z: f64) -> Self {
        self.set_z(Some(z));
        self
    }

    /// Builder form of [Point::set_m]
    pub fn with_m(mut self, m: f64) -> Self {
        self.set_m(Some(m));
        self
    }

    /// Builder form of [Point::set_srid]
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.set_srid(srid);
        self
    }

    pub fn set_srid(&mut self, srid: i32) {
        self.srid = clamp_srid(srid);
    }

    /// Drop Z and M, leaving a plain 2D position
    pub fn force_2d(&mut self) {
        self.z = None;
        self.m = None;
    }

    pub fn dims(&self) -> Dimensions {
        match (self.z.is_some(), self.m.is_some()) {
            (false, false) => Dimensions::Xy,
            (true, false) => Dimensions::Xyz,
            (false, true) => Dimensions::Xym,
            (true, true) => Dimensions::Xyzm,
        }
    }

    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }

    pub fn has_measure(&self) -> bool {
        self.m.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_nan() && self.y.is_nan()
    }

    /// Coordinate-only equality: X and Y must match, Z and M must match
    /// when both operands carry them
    pub fn coords_equal(&self, other: &Point) -> bool {
        coord_eq(self.x, other.x)
            && coord_eq(self.y, other.y)
            && opt_coord_eq(self.z, other.z)
            && opt_coord_eq(self.m, other.m)
    }

    /// Euclidean distance to another point; 3D when both points carry Z
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        match (self.z, other.z) {
            (Some(za), Some(zb)) => {
                let dz = zb - za;
                (dx * dx + dy * dy + dz * dz).sqrt()
            }
            _ => dx.hypot(dy),
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.srid == other.srid && self.coords_equal(other)
    }
}

// Shared surface of the point-sequence geometries (LineString, LinearRing,
// CircularString). These have identical storage but distinct wire identities,
// so the common methods are stamped out rather than inherited.
macro_rules! point_sequence_impl {
    ($name:ident) => {
        impl $name {
            /// An empty sequence with a declared dimensionality
            pub fn empty(dims: Dimensions) -> Self {
                Self {
                    points: Vec::new(),
                    dims,
                    srid: 0,
                }
            }

            /// Build from points, inheriting dimensions and SRID from the
            /// first one (XY / SRID 0 when empty)
            pub fn new(points: Vec<Point>) -> Self {
                let dims = points.first().map(Point::dims).unwrap_or(Dimensions::Xy);
                let srid = points.first().map(Point::srid).unwrap_or(0);
                Self { points, dims, srid }
            }

            pub fn points(&self) -> &[Point] {
                &self.points
            }

            pub fn num_points(&self) -> usize {
                self.points.len()
            }

            pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
                self.points.get(n).ok_or(GeowireError::Index {
                    index: n,
                    size: self.points.len(),
                })
            }

            /// Append a point; the first point fixes the dimensionality of a
            /// previously empty sequence
            pub fn push(&mut self, point: Point) {
                if self.points.is_empty() {
                    self.dims = point.dims();
                }
                self.points.push(point);
            }

            pub fn dims(&self) -> Dimensions {
                self.dims
            }

            pub fn srid(&self) -> i32 {
                self.srid
            }

            pub fn is_empty(&self) -> bool {
                self.points.is_empty()
            }

            /// True when the first and last coordinates coincide (vacuously
            /// true for empty sequences)
            pub fn is_closed(&self) -> bool {
                match (self.points.first(), self.points.last()) {
                    (Some(first), Some(last)) => first.coords_equal(last),
                    _ => true,
                }
            }

            /// Reverse the point sequence in place
            pub fn reverse(&mut self) {
                self.points.reverse();
            }

            pub fn set_srid(&mut self, srid: i32) {
                let srid = clamp_srid(srid);
                self.srid = srid;
                for point in &mut self.points {
                    point.set_srid(srid);
                }
            }

            pub fn check_consistency(&self) -> bool {
                self.points
                    .iter()
                    .all(|p| p.dims() == self.dims && p.srid() == self.srid)
            }
        }
    };
}

/// An ordered sequence of points
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: Vec<Point>,
    dims: Dimensions,
    srid: i32,
}

point_sequence_impl!(LineString);

impl LineString {
    /// Append a copy of the first point if the last one differs from it
    pub fn close(&mut self) {
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            if !first.coords_equal(last) {
                let first = first.clone();
                self.points.push(first);
            }
        }
    }

    /// Sum of the straight-segment lengths
    ///
    /// Each segment contributes its Euclidean length (3D when both endpoints
    /// carry Z). Not meaningful for arcs; [CircularString] has no length.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}

/// A closed point sequence serving as one polygon ring
///
/// Rings exist only inside polygons: they are encoded "slim" (count plus
/// coordinates, no per-ring header) and carry the synthetic type code 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    points: Vec<Point>,
    dims: Dimensions,
    srid: i32,
}

point_sequence_impl!(LinearRing);

impl LinearRing {
    /// Append a copy of the first point if the last one differs from it
    pub fn close(&mut self) {
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            if !first.coords_equal(last) {
                let first = first.clone();
                self.points.push(first);
            }
        }
    }
}

/// An arc-interpolated curve
///
/// Points chain as start, arc-defining point, end per segment, so a
/// non-empty CircularString holds an odd number of points greater than one.
/// That invariant is verified by `check_consistency`, not by construction.
/// There is deliberately no `length`: a straight-segment sum would be wrong
/// for arcs, and true arc length is out of scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularString {
    points: Vec<Point>,
    dims: Dimensions,
    srid: i32,
}

point_sequence_impl!(CircularString);

impl CircularString {
    /// Odd point count greater than one (or empty), on top of the shared
    /// per-point checks
    pub fn check_arc_shape(&self) -> bool {
        self.points.is_empty() || (self.points.len() > 1 && self.points.len() % 2 == 1)
    }
}

/// One member of a [CompoundCurve]: straight or arc, never another compound
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    LineString(LineString),
    CircularString(CircularString),
}

impl CurveSegment {
    pub fn geometry_type(&self) -> GeometryTypeId {
        match self {
            Self::LineString(_) => GeometryTypeId::LineString,
            Self::CircularString(_) => GeometryTypeId::CircularString,
        }
    }

    pub fn dims(&self) -> Dimensions {
        match self {
            Self::LineString(g) => g.dims(),
            Self::CircularString(g) => g.dims(),
        }
    }

    pub fn srid(&self) -> i32 {
        match self {
            Self::LineString(g) => g.srid(),
            Self::CircularString(g) => g.srid(),
        }
    }

    pub fn set_srid(&mut self, srid: i32) {
        match self {
            Self::LineString(g) => g.set_srid(srid),
            Self::CircularString(g) => g.set_srid(srid),
        }
    }

    pub fn num_points(&self) -> usize {
        match self {
            Self::LineString(g) => g.num_points(),
            Self::CircularString(g) => g.num_points(),
        }
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        match self {
            Self::LineString(g) => g.point_n(n),
            Self::CircularString(g) => g.point_n(n),
        }
    }

    pub fn start_point(&self) -> Option<&Point> {
        match self {
            Self::LineString(g) => g.points().first(),
            Self::CircularString(g) => g.points().first(),
        }
    }

    pub fn end_point(&self) -> Option<&Point> {
        match self {
            Self::LineString(g) => g.points().last(),
            Self::CircularString(g) => g.points().last(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    pub fn reverse(&mut self) {
        match self {
            Self::LineString(g) => g.reverse(),
            Self::CircularString(g) => g.reverse(),
        }
    }

    pub fn check_consistency(&self) -> bool {
        match self {
            Self::LineString(g) => g.check_consistency(),
            Self::CircularString(g) => g.check_consistency() && g.check_arc_shape(),
        }
    }
}

/// A chain of straight and arc segments
///
/// Each segment's end point must coincide with the next segment's start
/// point; `check_consistency` verifies the chaining.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCurve {
    segments: Vec<CurveSegment>,
    dims: Dimensions,
    srid: i32,
}

impl CompoundCurve {
    pub fn empty(dims: Dimensions) -> Self {
        Self {
            segments: Vec::new(),
            dims,
            srid: 0,
        }
    }

    pub fn new(segments: Vec<CurveSegment>) -> Self {
        let dims = segments
            .first()
            .map(CurveSegment::dims)
            .unwrap_or(Dimensions::Xy);
        let srid = segments.first().map(CurveSegment::srid).unwrap_or(0);
        Self {
            segments,
            dims,
            srid,
        }
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn segment_n(&self, n: usize) -> Result<&CurveSegment, GeowireError> {
        self.segments.get(n).ok_or(GeowireError::Index {
            index: n,
            size: self.segments.len(),
        })
    }

    pub fn push(&mut self, segment: CurveSegment) {
        if self.segments.is_empty() {
            self.dims = segment.dims();
        }
        self.segments.push(segment);
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.segments.iter().map(CurveSegment::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for segment in &self.segments {
            let count = segment.num_points();
            if remaining < count {
                return segment.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    pub fn start_point(&self) -> Option<&Point> {
        self.segments.first().and_then(CurveSegment::start_point)
    }

    pub fn end_point(&self) -> Option<&Point> {
        self.segments.last().and_then(CurveSegment::end_point)
    }

    /// Reverse the segment order and each segment's own point sequence
    pub fn reverse(&mut self) {
        self.segments.reverse();
        for segment in &mut self.segments {
            segment.reverse();
        }
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for segment in &mut self.segments {
            segment.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        let uniform = self
            .segments
            .iter()
            .all(|s| s.dims() == self.dims && s.srid() == self.srid && s.check_consistency());
        let chained = self.segments.windows(2).all(|pair| {
            match (pair[0].end_point(), pair[1].start_point()) {
                (Some(end), Some(start)) => end.coords_equal(start),
                _ => false,
            }
        });
        uniform && chained
    }
}

/// Any curve usable as a CurvePolygon ring or MultiCurve element
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    LineString(LineString),
    CircularString(CircularString),
    CompoundCurve(CompoundCurve),
}

impl Curve {
    pub fn geometry_type(&self) -> GeometryTypeId {
        match self {
            Self::LineString(_) => GeometryTypeId::LineString,
            Self::CircularString(_) => GeometryTypeId::CircularString,
            Self::CompoundCurve(_) => GeometryTypeId::CompoundCurve,
        }
    }

    pub fn dims(&self) -> Dimensions {
        match self {
            Self::LineString(g) => g.dims(),
            Self::CircularString(g) => g.dims(),
            Self::CompoundCurve(g) => g.dims(),
        }
    }

    pub fn srid(&self) -> i32 {
        match self {
            Self::LineString(g) => g.srid(),
            Self::CircularString(g) => g.srid(),
            Self::CompoundCurve(g) => g.srid(),
        }
    }

    pub fn set_srid(&mut self, srid: i32) {
        match self {
            Self::LineString(g) => g.set_srid(srid),
            Self::CircularString(g) => g.set_srid(srid),
            Self::CompoundCurve(g) => g.set_srid(srid),
        }
    }

    pub fn num_points(&self) -> usize {
        match self {
            Self::LineString(g) => g.num_points(),
            Self::CircularString(g) => g.num_points(),
            Self::CompoundCurve(g) => g.num_points(),
        }
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        match self {
            Self::LineString(g) => g.point_n(n),
            Self::CircularString(g) => g.point_n(n),
            Self::CompoundCurve(g) => g.point_n(n),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    pub fn reverse(&mut self) {
        match self {
            Self::LineString(g) => g.reverse(),
            Self::CircularString(g) => g.reverse(),
            Self::CompoundCurve(g) => g.reverse(),
        }
    }

    pub fn check_consistency(&self) -> bool {
        match self {
            Self::LineString(g) => g.check_consistency(),
            Self::CircularString(g) => g.check_consistency() && g.check_arc_shape(),
            Self::CompoundCurve(g) => g.check_consistency(),
        }
    }
}

/// An areal geometry with straight rings; ring 0 is the shell, the rest holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<LinearRing>,
    dims: Dimensions,
    srid: i32,
}

impl Polygon {
    pub fn empty(dims: Dimensions) -> Self {
        Self {
            rings: Vec::new(),
            dims,
            srid: 0,
        }
    }

    pub fn new(rings: Vec<LinearRing>) -> Self {
        let dims = rings.first().map(LinearRing::dims).unwrap_or(Dimensions::Xy);
        let srid = rings.first().map(LinearRing::srid).unwrap_or(0);
        Self { rings, dims, srid }
    }

    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn ring_n(&self, n: usize) -> Result<&LinearRing, GeowireError> {
        self.rings.get(n).ok_or(GeowireError::Index {
            index: n,
            size: self.rings.len(),
        })
    }

    pub fn push_ring(&mut self, ring: LinearRing) {
        if self.rings.is_empty() {
            self.dims = ring.dims();
        }
        self.rings.push(ring);
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.rings.iter().map(LinearRing::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for ring in &self.rings {
            let count = ring.num_points();
            if remaining < count {
                return ring.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for ring in &mut self.rings {
            ring.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.rings
            .iter()
            .all(|r| r.dims() == self.dims && r.srid() == self.srid && r.check_consistency())
    }
}

/// An areal geometry whose rings may be any curve variant
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePolygon {
    rings: Vec<Curve>,
    dims: Dimensions,
    srid: i32,
}

impl CurvePolygon {
    pub fn empty(dims: Dimensions) -> Self {
        Self {
            rings: Vec::new(),
            dims,
            srid: 0,
        }
    }

    pub fn new(rings: Vec<Curve>) -> Self {
        let dims = rings.first().map(Curve::dims).unwrap_or(Dimensions::Xy);
        let srid = rings.first().map(Curve::srid).unwrap_or(0);
        Self { rings, dims, srid }
    }

    pub fn rings(&self) -> &[Curve] {
        &self.rings
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn ring_n(&self, n: usize) -> Result<&Curve, GeowireError> {
        self.rings.get(n).ok_or(GeowireError::Index {
            index: n,
            size: self.rings.len(),
        })
    }

    pub fn push_ring(&mut self, ring: Curve) {
        if self.rings.is_empty() {
            self.dims = ring.dims();
        }
        self.rings.push(ring);
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.rings.iter().map(Curve::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for ring in &self.rings {
            let count = ring.num_points();
            if remaining < count {
                return ring.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for ring in &mut self.rings {
            ring.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.rings
            .iter()
            .all(|r| r.dims() == self.dims && r.srid() == self.srid && r.check_consistency())
    }
}

/// A MultiSurface element: flat or curved
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Polygon(Polygon),
    CurvePolygon(CurvePolygon),
}

impl Surface {
    pub fn geometry_type(&self) -> GeometryTypeId {
        match self {
            Self::Polygon(_) => GeometryTypeId::Polygon,
            Self::CurvePolygon(_) => GeometryTypeId::CurvePolygon,
        }
    }

    pub fn dims(&self) -> Dimensions {
        match self {
            Self::Polygon(g) => g.dims(),
            Self::CurvePolygon(g) => g.dims(),
        }
    }

    pub fn srid(&self) -> i32 {
        match self {
            Self::Polygon(g) => g.srid(),
            Self::CurvePolygon(g) => g.srid(),
        }
    }

    pub fn set_srid(&mut self, srid: i32) {
        match self {
            Self::Polygon(g) => g.set_srid(srid),
            Self::CurvePolygon(g) => g.set_srid(srid),
        }
    }

    pub fn num_points(&self) -> usize {
        match self {
            Self::Polygon(g) => g.num_points(),
            Self::CurvePolygon(g) => g.num_points(),
        }
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        match self {
            Self::Polygon(g) => g.point_n(n),
            Self::CurvePolygon(g) => g.point_n(n),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Polygon(g) => g.is_empty(),
            Self::CurvePolygon(g) => g.is_empty(),
        }
    }

    pub fn check_consistency(&self) -> bool {
        match self {
            Self::Polygon(g) => g.check_consistency(),
            Self::CurvePolygon(g) => g.check_consistency(),
        }
    }
}

// The five homogeneous collections share the same skeleton over different
// element types.
macro_rules! collection_impl {
    ($name:ident, $elem:ty, $elem_dims:expr, $elem_srid:expr) => {
        impl $name {
            pub fn empty(dims: Dimensions) -> Self {
                Self {
                    elements: Vec::new(),
                    dims,
                    srid: 0,
                }
            }

            /// Build from elements, inheriting dimensions and SRID from the
            /// first one (XY / SRID 0 when empty)
            pub fn new(elements: Vec<$elem>) -> Self {
                let dims = elements.first().map($elem_dims).unwrap_or(Dimensions::Xy);
                let srid = elements.first().map($elem_srid).unwrap_or(0);
                Self {
                    elements,
                    dims,
                    srid,
                }
            }

            pub fn elements(&self) -> &[$elem] {
                &self.elements
            }

            pub fn num_geometries(&self) -> usize {
                self.elements.len()
            }

            pub fn geometry_n(&self, n: usize) -> Result<&$elem, GeowireError> {
                self.elements.get(n).ok_or(GeowireError::Index {
                    index: n,
                    size: self.elements.len(),
                })
            }

            pub fn push(&mut self, element: $elem) {
                if self.elements.is_empty() {
                    self.dims = $elem_dims(&element);
                }
                self.elements.push(element);
            }

            pub fn dims(&self) -> Dimensions {
                self.dims
            }

            pub fn srid(&self) -> i32 {
                self.srid
            }

            pub fn is_empty(&self) -> bool {
                self.elements.is_empty()
            }
        }
    };
}

/// An ordered collection of points
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    elements: Vec<Point>,
    dims: Dimensions,
    srid: i32,
}

collection_impl!(MultiPoint, Point, Point::dims, Point::srid);

impl MultiPoint {
    pub fn num_points(&self) -> usize {
        self.elements.len()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        self.elements.get(n).ok_or(GeowireError::Index {
            index: n,
            size: self.elements.len(),
        })
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for point in &mut self.elements {
            point.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.elements
            .iter()
            .all(|p| p.dims() == self.dims && p.srid() == self.srid)
    }
}

/// An ordered collection of line strings
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    elements: Vec<LineString>,
    dims: Dimensions,
    srid: i32,
}

collection_impl!(
    MultiLineString,
    LineString,
    LineString::dims,
    LineString::srid
);

impl MultiLineString {
    pub fn num_points(&self) -> usize {
        self.elements.iter().map(LineString::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for line in &self.elements {
            let count = line.num_points();
            if remaining < count {
                return line.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    /// Total straight-segment length across members
    pub fn length(&self) -> f64 {
        self.elements.iter().map(LineString::length).sum()
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for line in &mut self.elements {
            line.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.elements
            .iter()
            .all(|l| l.dims() == self.dims && l.srid() == self.srid && l.check_consistency())
    }
}

/// An ordered collection of polygons
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    elements: Vec<Polygon>,
    dims: Dimensions,
    srid: i32,
}

collection_impl!(MultiPolygon, Polygon, Polygon::dims, Polygon::srid);

impl MultiPolygon {
    pub fn num_points(&self) -> usize {
        self.elements.iter().map(Polygon::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for polygon in &self.elements {
            let count = polygon.num_points();
            if remaining < count {
                return polygon.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for polygon in &mut self.elements {
            polygon.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.elements
            .iter()
            .all(|p| p.dims() == self.dims && p.srid() == self.srid && p.check_consistency())
    }
}

/// An ordered collection of curves
#[derive(Debug, Clone, PartialEq)]
pub struct MultiCurve {
    elements: Vec<Curve>,
    dims: Dimensions,
    srid: i32,
}

collection_impl!(MultiCurve, Curve, Curve::dims, Curve::srid);

impl MultiCurve {
    pub fn num_points(&self) -> usize {
        self.elements.iter().map(Curve::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for curve in &self.elements {
            let count = curve.num_points();
            if remaining < count {
                return curve.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for curve in &mut self.elements {
            curve.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.elements
            .iter()
            .all(|c| c.dims() == self.dims && c.srid() == self.srid && c.check_consistency())
    }
}

/// An ordered collection of flat or curved surfaces
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSurface {
    elements: Vec<Surface>,
    dims: Dimensions,
    srid: i32,
}

collection_impl!(MultiSurface, Surface, Surface::dims, Surface::srid);

impl MultiSurface {
    pub fn num_points(&self) -> usize {
        self.elements.iter().map(Surface::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for surface in &self.elements {
            let count = surface.num_points();
            if remaining < count {
                return surface.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for surface in &mut self.elements {
            surface.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.elements
            .iter()
            .all(|s| s.dims() == self.dims && s.srid() == self.srid && s.check_consistency())
    }
}

/// An ordered, heterogeneous collection of geometries
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    elements: Vec<Geometry>,
    dims: Dimensions,
    srid: i32,
}

collection_impl!(
    GeometryCollection,
    Geometry,
    Geometry::dims,
    Geometry::srid
);

impl GeometryCollection {
    pub fn num_points(&self) -> usize {
        self.elements.iter().map(Geometry::num_points).sum()
    }

    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        let mut remaining = n;
        for geometry in &self.elements {
            let count = geometry.num_points();
            if remaining < count {
                return geometry.point_n(remaining);
            }
            remaining -= count;
        }
        Err(GeowireError::Index {
            index: n,
            size: self.num_points(),
        })
    }

    pub fn set_srid(&mut self, srid: i32) {
        let srid = clamp_srid(srid);
        self.srid = srid;
        for geometry in &mut self.elements {
            geometry.set_srid(srid);
        }
    }

    pub fn check_consistency(&self) -> bool {
        self.elements
            .iter()
            .all(|g| g.dims() == self.dims && g.srid() == self.srid && g.check_consistency())
    }
}

/// Any geometry
///
/// A closed union over the wire variants plus [LinearRing], which exists
/// only as polygon structure and cannot be independently serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
    CircularString(CircularString),
    CompoundCurve(CompoundCurve),
    CurvePolygon(CurvePolygon),
    MultiCurve(MultiCurve),
    MultiSurface(MultiSurface),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryTypeId {
        match self {
            Self::Point(_) => GeometryTypeId::Point,
            Self::LineString(_) => GeometryTypeId::LineString,
            Self::LinearRing(_) => GeometryTypeId::LinearRing,
            Self::Polygon(_) => GeometryTypeId::Polygon,
            Self::MultiPoint(_) => GeometryTypeId::MultiPoint,
            Self::MultiLineString(_) => GeometryTypeId::MultiLineString,
            Self::MultiPolygon(_) => GeometryTypeId::MultiPolygon,
            Self::GeometryCollection(_) => GeometryTypeId::GeometryCollection,
            Self::CircularString(_) => GeometryTypeId::CircularString,
            Self::CompoundCurve(_) => GeometryTypeId::CompoundCurve,
            Self::CurvePolygon(_) => GeometryTypeId::CurvePolygon,
            Self::MultiCurve(_) => GeometryTypeId::MultiCurve,
            Self::MultiSurface(_) => GeometryTypeId::MultiSurface,
        }
    }

    /// The numeric wire code of this variant
    pub fn type_code(&self) -> u32 {
        self.geometry_type().wkb_id()
    }

    pub fn dims(&self) -> Dimensions {
        match self {
            Self::Point(g) => g.dims(),
            Self::LineString(g) => g.dims(),
            Self::LinearRing(g) => g.dims(),
            Self::Polygon(g) => g.dims(),
            Self::MultiPoint(g) => g.dims(),
            Self::MultiLineString(g) => g.dims(),
            Self::MultiPolygon(g) => g.dims(),
            Self::GeometryCollection(g) => g.dims(),
            Self::CircularString(g) => g.dims(),
            Self::CompoundCurve(g) => g.dims(),
            Self::CurvePolygon(g) => g.dims(),
            Self::MultiCurve(g) => g.dims(),
            Self::MultiSurface(g) => g.dims(),
        }
    }

    pub fn srid(&self) -> i32 {
        match self {
            Self::Point(g) => g.srid(),
            Self::LineString(g) => g.srid(),
            Self::LinearRing(g) => g.srid(),
            Self::Polygon(g) => g.srid(),
            Self::MultiPoint(g) => g.srid(),
            Self::MultiLineString(g) => g.srid(),
            Self::MultiPolygon(g) => g.srid(),
            Self::GeometryCollection(g) => g.srid(),
            Self::CircularString(g) => g.srid(),
            Self::CompoundCurve(g) => g.srid(),
            Self::CurvePolygon(g) => g.srid(),
            Self::MultiCurve(g) => g.srid(),
            Self::MultiSurface(g) => g.srid(),
        }
    }

    pub fn is_3d(&self) -> bool {
        dims_is_3d(self.dims())
    }

    pub fn has_measure(&self) -> bool {
        dims_has_measure(self.dims())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point(g) => g.is_empty(),
            Self::LineString(g) => g.is_empty(),
            Self::LinearRing(g) => g.is_empty(),
            Self::Polygon(g) => g.is_empty(),
            Self::MultiPoint(g) => g.is_empty(),
            Self::MultiLineString(g) => g.is_empty(),
            Self::MultiPolygon(g) => g.is_empty(),
            Self::GeometryCollection(g) => g.is_empty(),
            Self::CircularString(g) => g.is_empty(),
            Self::CompoundCurve(g) => g.is_empty(),
            Self::CurvePolygon(g) => g.is_empty(),
            Self::MultiCurve(g) => g.is_empty(),
            Self::MultiSurface(g) => g.is_empty(),
        }
    }

    /// Set the SRID over the whole tree (top-down, eager; negatives clamp
    /// to 0)
    pub fn set_srid(&mut self, srid: i32) {
        match self {
            Self::Point(g) => g.set_srid(srid),
            Self::LineString(g) => g.set_srid(srid),
            Self::LinearRing(g) => g.set_srid(srid),
            Self::Polygon(g) => g.set_srid(srid),
            Self::MultiPoint(g) => g.set_srid(srid),
            Self::MultiLineString(g) => g.set_srid(srid),
            Self::MultiPolygon(g) => g.set_srid(srid),
            Self::GeometryCollection(g) => g.set_srid(srid),
            Self::CircularString(g) => g.set_srid(srid),
            Self::CompoundCurve(g) => g.set_srid(srid),
            Self::CurvePolygon(g) => g.set_srid(srid),
            Self::MultiCurve(g) => g.set_srid(srid),
            Self::MultiSurface(g) => g.set_srid(srid),
        }
    }

    /// Verify the structural invariants of the whole tree
    ///
    /// Never mutates; the decoder does not call this (it trusts well-formed
    /// input) and neither does the encoder, so callers wanting rejection of
    /// inconsistent trees run it themselves.
    pub fn check_consistency(&self) -> bool {
        match self {
            Self::Point(_) => true,
            Self::LineString(g) => g.check_consistency(),
            Self::LinearRing(g) => g.check_consistency(),
            Self::Polygon(g) => g.check_consistency(),
            Self::MultiPoint(g) => g.check_consistency(),
            Self::MultiLineString(g) => g.check_consistency(),
            Self::MultiPolygon(g) => g.check_consistency(),
            Self::GeometryCollection(g) => g.check_consistency(),
            Self::CircularString(g) => g.check_consistency() && g.check_arc_shape(),
            Self::CompoundCurve(g) => g.check_consistency(),
            Self::CurvePolygon(g) => g.check_consistency(),
            Self::MultiCurve(g) => g.check_consistency(),
            Self::MultiSurface(g) => g.check_consistency(),
        }
    }

    /// Number of points in the flattened view of the tree
    pub fn num_points(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::LineString(g) => g.num_points(),
            Self::LinearRing(g) => g.num_points(),
            Self::Polygon(g) => g.num_points(),
            Self::MultiPoint(g) => g.num_points(),
            Self::MultiLineString(g) => g.num_points(),
            Self::MultiPolygon(g) => g.num_points(),
            Self::GeometryCollection(g) => g.num_points(),
            Self::CircularString(g) => g.num_points(),
            Self::CompoundCurve(g) => g.num_points(),
            Self::CurvePolygon(g) => g.num_points(),
            Self::MultiCurve(g) => g.num_points(),
            Self::MultiSurface(g) => g.num_points(),
        }
    }

    /// The `n`-th point of the flattened view, addressed by a running
    /// counter across nested sub-geometries
    pub fn point_n(&self, n: usize) -> Result<&Point, GeowireError> {
        match self {
            Self::Point(g) => {
                if n == 0 {
                    Ok(g)
                } else {
                    Err(GeowireError::Index { index: n, size: 1 })
                }
            }
            Self::LineString(g) => g.point_n(n),
            Self::LinearRing(g) => g.point_n(n),
            Self::Polygon(g) => g.point_n(n),
            Self::MultiPoint(g) => g.point_n(n),
            Self::MultiLineString(g) => g.point_n(n),
            Self::MultiPolygon(g) => g.point_n(n),
            Self::GeometryCollection(g) => g.point_n(n),
            Self::CircularString(g) => g.point_n(n),
            Self::CompoundCurve(g) => g.point_n(n),
            Self::CurvePolygon(g) => g.point_n(n),
            Self::MultiCurve(g) => g.point_n(n),
            Self::MultiSurface(g) => g.point_n(n),
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Geometry::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}

impl From<CircularString> for Geometry {
    fn from(value: CircularString) -> Self {
        Geometry::CircularString(value)
    }
}

impl From<CompoundCurve> for Geometry {
    fn from(value: CompoundCurve) -> Self {
        Geometry::CompoundCurve(value)
    }
}

impl From<CurvePolygon> for Geometry {
    fn from(value: CurvePolygon) -> Self {
        Geometry::CurvePolygon(value)
    }
}

impl From<MultiCurve> for Geometry {
    fn from(value: MultiCurve) -> Self {
        Geometry::MultiCurve(value)
    }
}

impl From<MultiSurface> for Geometry {
    fn from(value: MultiSurface) -> Self {
        Geometry::MultiSurface(value)
    }
}

impl From<Curve> for Geometry {
    fn from(value: Curve) -> Self {
        match value {
            Curve::LineString(g) => Geometry::LineString(g),
            Curve::CircularString(g) => Geometry::CircularString(g),
            Curve::CompoundCurve(g) => Geometry::CompoundCurve(g),
        }
    }
}

impl From<CurveSegment> for Geometry {
    fn from(value: CurveSegment) -> Self {
        match value {
            CurveSegment::LineString(g) => Geometry::LineString(g),
            CurveSegment::CircularString(g) => Geometry::CircularString(g),
        }
    }
}

impl From<Surface> for Geometry {
    fn from(value: Surface) -> Self {
        match value {
            Surface::Polygon(g) => Geometry::Polygon(g),
            Surface::CurvePolygon(g) => Geometry::CurvePolygon(g),
        }
    }
}

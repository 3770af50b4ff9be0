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

//! Axis-aligned bounding boxes and their fixed text format
//!
//! The wire form is `[SRID=<n>;]BOX(x y,x y)` for 2D boxes and
//! `[SRID=<n>;]BOX3D(x y z,x y z)` for 3D ones. `Display` and `FromStr`
//! are the canonical codec; serde passes through them.

use std::{fmt::Display, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::GeowireError;
use crate::geometry::Point;
use crate::tokenizer::tokenize;

/// A 2D axis-aligned box
///
/// Corner points are forced to 2D on every assignment; a parsed Z is
/// discarded.
#[derive(Debug, Clone, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct Box2d {
    ll: Point,
    ur: Point,
}

/// A 3D axis-aligned box
///
/// Corners may be 2D; the box is 3D when either corner carries a Z.
#[derive(Debug, Clone, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct Box3d {
    ll: Point,
    ur: Point,
}

impl Box2d {
    /// The text-format keyword for 2D boxes
    pub const PREFIX: &'static str = "BOX";

    pub fn new(mut ll: Point, mut ur: Point) -> Self {
        ll.force_2d();
        ur.force_2d();
        Self { ll, ur }
    }

    /// The lower-left corner
    pub fn ll(&self) -> &Point {
        &self.ll
    }

    /// The upper-right corner
    pub fn ur(&self) -> &Point {
        &self.ur
    }

    pub fn set_ll(&mut self, mut ll: Point) {
        ll.force_2d();
        self.ll = ll;
    }

    pub fn set_ur(&mut self, mut ur: Point) {
        ur.force_2d();
        self.ur = ur;
    }

    pub fn srid(&self) -> i32 {
        self.ll.srid()
    }

    pub fn set_srid(&mut self, srid: i32) {
        self.ll.set_srid(srid);
        self.ur.set_srid(srid);
    }

    pub fn is_3d(&self) -> bool {
        false
    }
}

impl Box3d {
    /// The text-format keyword for 3D boxes
    pub const PREFIX: &'static str = "BOX3D";

    pub fn new(ll: Point, ur: Point) -> Self {
        Self { ll, ur }
    }

    /// The lower-left corner
    pub fn ll(&self) -> &Point {
        &self.ll
    }

    /// The upper-right corner
    pub fn ur(&self) -> &Point {
        &self.ur
    }

    pub fn set_ll(&mut self, ll: Point) {
        self.ll = ll;
    }

    pub fn set_ur(&mut self, ur: Point) {
        self.ur = ur;
    }

    pub fn srid(&self) -> i32 {
        self.ll.srid()
    }

    pub fn set_srid(&mut self, srid: i32) {
        self.ll.set_srid(srid);
        self.ur.set_srid(srid);
    }

    pub fn is_3d(&self) -> bool {
        self.ll.is_3d() || self.ur.is_3d()
    }
}

/// Parse `[SRID=<n>;]<PREFIX>(<point>,<point>)` into corners and SRID
fn parse_box(text: &str, prefix: &str) -> Result<(Point, Point, i32), GeowireError> {
    let text = text.trim();

    let (srid, rest) = match text.strip_prefix("SRID=") {
        Some(after) => match after.find(';') {
            Some(pos) => {
                let srid_text = &after[..pos];
                let srid: i32 = srid_text
                    .parse()
                    .map_err(|_| GeowireError::NumberFormat(srid_text.to_string()))?;
                (srid.max(0), &after[pos + 1..])
            }
            None => {
                return Err(GeowireError::Format(
                    "Unterminated SRID prefix: missing ';'".to_string(),
                ))
            }
        },
        None => (0, text),
    };

    let body = rest.strip_prefix(prefix).ok_or_else(|| {
        GeowireError::Format(format!("Expected box to start with '{prefix}': '{text}'"))
    })?;
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| {
            GeowireError::Format(format!("Expected parenthesized corner list: '{text}'"))
        })?;

    let corners = tokenize(inner, ',')?;
    if corners.len() != 2 {
        return Err(GeowireError::Format(format!(
            "Expected two corner points, got {}: '{text}'",
            corners.len()
        )));
    }

    let mut ll = parse_corner(&corners[0])?;
    let mut ur = parse_corner(&corners[1])?;
    ll.set_srid(srid);
    ur.set_srid(srid);
    Ok((ll, ur, srid))
}

/// Parse `x y[ z]` as a corner point
fn parse_corner(token: &str) -> Result<Point, GeowireError> {
    let parts: Vec<&str> = token.split_whitespace().collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(GeowireError::Format(format!(
            "Expected 2 or 3 coordinates in corner point, got {}: '{token}'",
            parts.len()
        )));
    }

    let mut coords = [0.0f64; 3];
    for (i, part) in parts.iter().enumerate() {
        coords[i] = part
            .parse()
            .map_err(|_| GeowireError::NumberFormat(part.to_string()))?;
    }

    let z = if parts.len() == 3 {
        Some(coords[2])
    } else {
        None
    };
    Ok(Point::xyzm(coords[0], coords[1], z, None))
}

fn fmt_corner(f: &mut std::fmt::Formatter<'_>, point: &Point) -> std::fmt::Result {
    // f64 Display drops a zero fractional part (1.0 prints as "1")
    write!(f, "{} {}", point.x(), point.y())?;
    if let Some(z) = point.z() {
        write!(f, " {z}")?;
    }
    Ok(())
}

fn fmt_box(
    f: &mut std::fmt::Formatter<'_>,
    prefix: &str,
    ll: &Point,
    ur: &Point,
    srid: i32,
) -> std::fmt::Result {
    if srid != 0 {
        write!(f, "SRID={srid};")?;
    }
    write!(f, "{prefix}(")?;
    fmt_corner(f, ll)?;
    f.write_str(",")?;
    fmt_corner(f, ur)?;
    f.write_str(")")
}

impl Display for Box2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_box(f, Self::PREFIX, &self.ll, &self.ur, self.srid())
    }
}

impl FromStr for Box2d {
    type Err = GeowireError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (ll, ur, _) = parse_box(value, Self::PREFIX)?;
        Ok(Self::new(ll, ur))
    }
}

impl Display for Box3d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_box(f, Self::PREFIX, &self.ll, &self.ur, self.srid())
    }
}

impl FromStr for Box3d {
    type Err = GeowireError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (ll, ur, _) = parse_box(value, Self::PREFIX)?;
        Ok(Self::new(ll, ur))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn box2d_parse() {
        let bbox = Box2d::from_str("BOX(1 2,3 4)").unwrap();
        assert_eq!(bbox.ll(), &Point::new(1.0, 2.0));
        assert_eq!(bbox.ur(), &Point::new(3.0, 4.0));
        assert!(!bbox.is_3d());
        assert_eq!(bbox.srid(), 0);
    }

    #[test]
    fn box2d_discards_z() {
        let bbox = Box2d::from_str("BOX(1 2 9,3 4 9)").unwrap();
        assert_eq!(bbox.ll(), &Point::new(1.0, 2.0));
        assert!(!bbox.is_3d());

        let mut bbox = bbox;
        bbox.set_ur(Point::new_z(5.0, 6.0, 7.0));
        assert_eq!(bbox.ur(), &Point::new(5.0, 6.0));
    }

    #[test]
    fn box3d_with_srid() {
        let bbox = Box3d::from_str("SRID=4326;BOX3D(1 2 3,4 5 6)").unwrap();
        assert_eq!(bbox.srid(), 4326);
        assert_eq!(bbox.ll().srid(), 4326);
        assert_eq!(bbox.ur().srid(), 4326);
        assert_eq!(bbox.ur().z(), Some(6.0));
        assert!(bbox.is_3d());
    }

    #[test]
    fn box3d_accepts_2d_corners() {
        let bbox = Box3d::from_str("BOX3D(1 2,3 4)").unwrap();
        assert!(!bbox.is_3d());
        assert_eq!(bbox.to_string(), "BOX3D(1 2,3 4)");
    }

    #[test]
    fn display_roundtrip() {
        for text in [
            "BOX(1 2,3 4)",
            "BOX(-1.5 0.25,3.75 4.125)",
            "SRID=3857;BOX(1 2,3 4)",
        ] {
            let bbox = Box2d::from_str(text).unwrap();
            assert_eq!(bbox.to_string(), text);
            assert_eq!(Box2d::from_str(&bbox.to_string()).unwrap(), bbox);
        }

        for text in ["BOX3D(1 2 3,4 5 6)", "SRID=4326;BOX3D(1 2 3,4 5 6)"] {
            let bbox = Box3d::from_str(text).unwrap();
            assert_eq!(bbox.to_string(), text);
        }
    }

    #[test]
    fn whole_coordinates_print_without_fraction() {
        let bbox = Box2d::new(Point::new(1.0, 2.0), Point::new(3.0, 4.5));
        assert_eq!(bbox.to_string(), "BOX(1 2,3 4.5)");
    }

    #[test]
    fn unterminated_srid_prefix() {
        let err = Box2d::from_str("SRID=4326BOX(1 2,3 4)").unwrap_err();
        assert_eq!(err.to_string(), "Unterminated SRID prefix: missing ';'");
    }

    #[test]
    fn non_numeric_coordinate() {
        let err = Box2d::from_str("BOX(1 banana,3 4)").unwrap_err();
        assert_eq!(err, GeowireError::NumberFormat("banana".to_string()));
    }

    #[test]
    fn wrong_prefix() {
        let err = Box2d::from_str("SQUARE(1 2,3 4)").unwrap_err();
        assert!(matches!(err, GeowireError::Format(_)));
    }

    #[test]
    fn wrong_corner_count() {
        let err = Box2d::from_str("BOX(1 2)").unwrap_err();
        assert!(matches!(err, GeowireError::Format(_)));

        let err = Box2d::from_str("BOX(1 2,3 4,5 6)").unwrap_err();
        assert!(matches!(err, GeowireError::Format(_)));
    }

    #[test]
    fn negative_parsed_srid_clamps() {
        let bbox = Box2d::from_str("SRID=-5;BOX(1 2,3 4)").unwrap();
        assert_eq!(bbox.srid(), 0);
    }

    #[test]
    fn serde_through_text_form() {
        let bbox = Box3d::from_str("SRID=4326;BOX3D(1 2 3,4 5 6)").unwrap();
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "\"SRID=4326;BOX3D(1 2 3,4 5 6)\"");

        let back: Box3d = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bbox);
    }
}

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
use std::{fmt::Display, str::FromStr};

use geo_traits::Dimensions;
use serde::{Deserialize, Serialize};

use crate::error::GeowireError;

/// EWKB type-word flag: the geometry carries Z coordinates
pub const Z_FLAG_BIT: u32 = 0x80000000;
/// EWKB type-word flag: the geometry carries M (measure) coordinates
pub const M_FLAG_BIT: u32 = 0x40000000;
/// EWKB type-word flag: a 4-byte SRID follows the type word
pub const SRID_FLAG_BIT: u32 = 0x20000000;
/// Mask selecting the geometry type code from an EWKB type word
pub const TYPE_CODE_MASK: u32 = 0x1FFFFFFF;

/// Geometry types
///
/// The set of natively supported geometry types, numbered per the
/// OGC/PostGIS wire codes. [GeometryTypeId::LinearRing] is synthetic: rings
/// exist only inside polygons and are never independently serialized, so
/// code 0 never appears in a type word.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Hash, Clone, Copy)]
pub enum GeometryTypeId {
    /// Synthetic polygon-ring type, never on the wire
    LinearRing,
    /// Point geometry type
    Point,
    /// LineString geometry type
    LineString,
    /// Polygon geometry type
    Polygon,
    /// MultiPoint geometry type
    MultiPoint,
    /// MultiLineString geometry type
    MultiLineString,
    /// MultiPolygon geometry type
    MultiPolygon,
    /// GeometryCollection geometry type
    GeometryCollection,
    /// CircularString geometry type (arc-interpolated curve)
    CircularString,
    /// CompoundCurve geometry type (chained straight and arc segments)
    CompoundCurve,
    /// CurvePolygon geometry type (polygon whose rings may be curves)
    CurvePolygon,
    /// MultiCurve geometry type
    MultiCurve,
    /// MultiSurface geometry type
    MultiSurface,
}

impl GeometryTypeId {
    /// Construct a geometry type from the code portion of a WKB type word
    ///
    /// Accepts the wire codes 1 (Point) through 12 (MultiSurface). Code 0 is
    /// rejected along with every other unknown value; rings never carry a
    /// type word of their own.
    pub fn try_from_wkb_id(wkb_id: u32) -> Result<Self, GeowireError> {
        match wkb_id {
            1 => Ok(Self::Point),
            2 => Ok(Self::LineString),
            3 => Ok(Self::Polygon),
            4 => Ok(Self::MultiPoint),
            5 => Ok(Self::MultiLineString),
            6 => Ok(Self::MultiPolygon),
            7 => Ok(Self::GeometryCollection),
            8 => Ok(Self::CircularString),
            9 => Ok(Self::CompoundCurve),
            10 => Ok(Self::CurvePolygon),
            11 => Ok(Self::MultiCurve),
            12 => Ok(Self::MultiSurface),
            _ => Err(GeowireError::UnsupportedType(wkb_id.to_string())),
        }
    }

    /// WKB integer identifier
    ///
    /// The type-code portion of the WKB type word (e.g., 1 for Point...12 for
    /// MultiSurface). LinearRing reports its synthetic code 0.
    pub fn wkb_id(&self) -> u32 {
        match self {
            Self::LinearRing => 0,
            Self::Point => 1,
            Self::LineString => 2,
            Self::Polygon => 3,
            Self::MultiPoint => 4,
            Self::MultiLineString => 5,
            Self::MultiPolygon => 6,
            Self::GeometryCollection => 7,
            Self::CircularString => 8,
            Self::CompoundCurve => 9,
            Self::CurvePolygon => 10,
            Self::MultiCurve => 11,
            Self::MultiSurface => 12,
        }
    }

    /// Canonical string identifier for this geometry type
    pub fn name(&self) -> &'static str {
        match self {
            Self::LinearRing => "LinearRing",
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
            Self::CircularString => "CircularString",
            Self::CompoundCurve => "CompoundCurve",
            Self::CurvePolygon => "CurvePolygon",
            Self::MultiCurve => "MultiCurve",
            Self::MultiSurface => "MultiSurface",
        }
    }
}

impl Display for GeometryTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryTypeId {
    type Err = GeowireError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value_lower = value.to_ascii_lowercase();
        match value_lower.as_str() {
            "linearring" => Ok(Self::LinearRing),
            "point" => Ok(Self::Point),
            "linestring" => Ok(Self::LineString),
            "polygon" => Ok(Self::Polygon),
            "multipoint" => Ok(Self::MultiPoint),
            "multilinestring" => Ok(Self::MultiLineString),
            "multipolygon" => Ok(Self::MultiPolygon),
            "geometrycollection" => Ok(Self::GeometryCollection),
            "circularstring" => Ok(Self::CircularString),
            "compoundcurve" => Ok(Self::CompoundCurve),
            "curvepolygon" => Ok(Self::CurvePolygon),
            "multicurve" => Ok(Self::MultiCurve),
            "multisurface" => Ok(Self::MultiSurface),
            _ => Err(GeowireError::Format(format!(
                "Invalid geometry type string: '{value}'"
            ))),
        }
    }
}

/// Returns true if the given dimensions carry a Z coordinate
pub fn dims_is_3d(dims: Dimensions) -> bool {
    matches!(dims, Dimensions::Xyz | Dimensions::Xyzm)
}

/// Returns true if the given dimensions carry an M coordinate
pub fn dims_has_measure(dims: Dimensions) -> bool {
    matches!(dims, Dimensions::Xym | Dimensions::Xyzm)
}

/// The coordinate dimension count (2 or 3) of the given dimensions
///
/// M does not contribute: an XYM geometry is two-dimensional with a measure
/// attached to each position.
pub fn dims_coordinate_dimension(dims: Dimensions) -> u8 {
    if dims_is_3d(dims) {
        3
    } else {
        2
    }
}

/// A decoded EWKB type word
///
/// The low 29 bits of the wire word hold the geometry type code; the three
/// high bits flag SRID presence, M presence, and Z presence.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TypeWord {
    geometry_type: GeometryTypeId,
    dims: Dimensions,
    has_srid: bool,
}

impl TypeWord {
    /// Create a type word from its parts
    pub fn new(geometry_type: GeometryTypeId, dims: Dimensions, has_srid: bool) -> Self {
        Self {
            geometry_type,
            dims,
            has_srid,
        }
    }

    /// Split a wire type word into code and flags
    pub fn unpack(word: u32) -> Result<Self, GeowireError> {
        let geometry_type = GeometryTypeId::try_from_wkb_id(word & TYPE_CODE_MASK)?;
        let dims = match (word & Z_FLAG_BIT != 0, word & M_FLAG_BIT != 0) {
            (false, false) => Dimensions::Xy,
            (true, false) => Dimensions::Xyz,
            (false, true) => Dimensions::Xym,
            (true, true) => Dimensions::Xyzm,
        };

        Ok(Self {
            geometry_type,
            dims,
            has_srid: word & SRID_FLAG_BIT != 0,
        })
    }

    /// Assemble the wire form of this type word
    pub fn pack(&self) -> u32 {
        let mut word = self.geometry_type.wkb_id();
        if dims_is_3d(self.dims) {
            word |= Z_FLAG_BIT;
        }
        if dims_has_measure(self.dims) {
            word |= M_FLAG_BIT;
        }
        if self.has_srid {
            word |= SRID_FLAG_BIT;
        }
        word
    }

    /// The geometry type code
    pub fn geometry_type(&self) -> GeometryTypeId {
        self.geometry_type
    }

    /// The coordinate dimensions flagged by this word
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Whether a 4-byte SRID follows this word on the wire
    pub fn has_srid(&self) -> bool {
        self.has_srid
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rstest::rstest;
    use Dimensions::*;
    use GeometryTypeId::*;

    #[rstest]
    fn geometry_type_wkb_id_roundtrip(
        #[values(
            (Point, 1),
            (LineString, 2),
            (Polygon, 3),
            (MultiPoint, 4),
            (MultiLineString, 5),
            (MultiPolygon, 6),
            (GeometryCollection, 7),
            (CircularString, 8),
            (CompoundCurve, 9),
            (CurvePolygon, 10),
            (MultiCurve, 11),
            (MultiSurface, 12)
        )]
        geometry_type_and_id: (GeometryTypeId, u32),
    ) {
        let (geometry_type, wkb_id) = geometry_type_and_id;
        assert_eq!(geometry_type.wkb_id(), wkb_id);
        assert_eq!(
            GeometryTypeId::try_from_wkb_id(wkb_id).unwrap(),
            geometry_type
        );
    }

    #[test]
    fn geometry_type_wkb_id_err() {
        let err = GeometryTypeId::try_from_wkb_id(99).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported geometry type 99");

        // The synthetic ring code is not a valid wire code
        let err = GeometryTypeId::try_from_wkb_id(0).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported geometry type 0");
        assert_eq!(LinearRing.wkb_id(), 0);
    }

    #[rstest]
    fn geometry_type_str_roundtrip(
        #[values(
            (Point, "Point"),
            (LineString, "LineString"),
            (Polygon, "Polygon"),
            (MultiPoint, "MultiPoint"),
            (MultiLineString, "MultiLineString"),
            (MultiPolygon, "MultiPolygon"),
            (GeometryCollection, "GeometryCollection"),
            (CircularString, "CircularString"),
            (CompoundCurve, "CompoundCurve"),
            (CurvePolygon, "CurvePolygon"),
            (MultiCurve, "MultiCurve"),
            (MultiSurface, "MultiSurface")
        )]
        geometry_type_and_str: (GeometryTypeId, &str),
    ) {
        let (geometry_type, string) = geometry_type_and_str;
        assert_eq!(geometry_type.name(), string);
        assert_eq!(geometry_type.to_string(), string);
        assert_eq!(GeometryTypeId::from_str(string).unwrap(), geometry_type);
        assert_eq!(
            GeometryTypeId::from_str(&string.to_uppercase()).unwrap(),
            geometry_type
        );
    }

    #[test]
    fn geometry_type_str_err() {
        let err = GeometryTypeId::from_str("gazornenplat").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid geometry type string: 'gazornenplat'"
        );
    }

    #[test]
    fn geometry_type_serde() {
        let json = serde_json::to_string(&CircularString).unwrap();
        assert_eq!(json, "\"CircularString\"");
        let back: GeometryTypeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CircularString);
    }

    #[rstest]
    fn type_word_roundtrip(
        #[values(Point, LineString, Polygon, MultiPoint, CircularString, MultiSurface)]
        geometry_type: GeometryTypeId,
        #[values(Xy, Xyz, Xym, Xyzm)] dims: Dimensions,
        #[values(false, true)] has_srid: bool,
    ) {
        let word = TypeWord::new(geometry_type, dims, has_srid);
        assert_eq!(TypeWord::unpack(word.pack()).unwrap(), word);
    }

    #[test]
    fn type_word_bits() {
        let word = TypeWord::new(Point, Xyzm, true);
        assert_eq!(word.pack(), 1 | Z_FLAG_BIT | M_FLAG_BIT | SRID_FLAG_BIT);

        let word = TypeWord::unpack(0x20000002).unwrap();
        assert_eq!(word.geometry_type(), LineString);
        assert_eq!(word.dims(), Xy);
        assert!(word.has_srid());
    }

    #[test]
    fn type_word_unknown_code() {
        let err = TypeWord::unpack(99).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported geometry type 99");

        // Flags do not rescue an unknown code
        let err = TypeWord::unpack(99 | SRID_FLAG_BIT).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported geometry type 99");
    }

    #[test]
    fn dims_helpers() {
        assert!(!dims_is_3d(Xy));
        assert!(dims_is_3d(Xyz));
        assert!(!dims_is_3d(Xym));
        assert!(dims_is_3d(Xyzm));

        assert!(!dims_has_measure(Xy));
        assert!(!dims_has_measure(Xyz));
        assert!(dims_has_measure(Xym));
        assert!(dims_has_measure(Xyzm));

        assert_eq!(dims_coordinate_dimension(Xy), 2);
        assert_eq!(dims_coordinate_dimension(Xym), 2);
        assert_eq!(dims_coordinate_dimension(Xyz), 3);
        assert_eq!(dims_coordinate_dimension(Xyzm), 3);
    }
}

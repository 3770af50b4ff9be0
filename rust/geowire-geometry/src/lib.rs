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

//! Simple-features geometry model and PostGIS EWKB wire codec
//!
//! The geometry tree ([geometry::Geometry]) round-trips losslessly through
//! the PostGIS EWKB binary format ([ewkb_reader], [ewkb_writer]) and its
//! uppercase hex-text envelope, and the [bounding_box] types round-trip
//! through the `BOX`/`BOX3D` text format.

pub mod bounding_box;
pub mod error;
pub mod ewkb_reader;
pub mod ewkb_writer;
pub mod geometry;
pub mod stream;
pub mod tokenizer;
pub mod types;

// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error type shared by every fallible radar operation.

use thiserror::Error;

/// Errors surfaced synchronously by the radar engine.
///
/// None of these are retried internally; the call that produced one has
/// left the display state untouched.
#[derive(Debug, Error, PartialEq)]
pub enum RadarError {
    #[error("invalid site: {0}")]
    InvalidSite(String),

    #[error("drawing surface not supported: {0}")]
    SurfaceUnsupported(String),

    #[error("invalid argument: expected {expected}, got {got}")]
    InvalidArgument {
        expected: &'static str,
        got: &'static str,
    },

    #[error("invalid range configuration: step {step} NM, max {max} NM")]
    InvalidRange { step: u32, max: u32 },
}

/// Name of a JSON value's kind, for [`RadarError::InvalidArgument`].
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

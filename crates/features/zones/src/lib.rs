//! # Zone Pipeline
//!
//! This crate turns a template's zone schema plus an editor-supplied value
//! payload into validated, renderable page fragments.
//!
//! ## Architecture
//!
//! The pipeline has three stages:
//!
//! 1.  **Parsing ([`ZoneValue`]):** a raw JSON value is parsed against its
//!     zone's declared [`ZoneKind`](tessera_domain::zone::ZoneKind) into a
//!     typed variant. A failed parse *is* the shape mismatch; there is no
//!     separate "unrecognized type" path left open.
//! 2.  **Validation ([`validator`]):** required zones must parse; optional
//!     zones are never checked. The aggregate answer is a single boolean,
//!     with [`validator::violations`] re-deriving per-zone detail for
//!     edit-time error messages.
//! 3.  **Rendering ([`renderer`]):** each zone produces an HTML fragment.
//!     Missing or malformed values degrade to an empty fragment; rendering
//!     never fails. Corrupt data is rejected earlier, at save time, by the
//!     validator.
//!
//! Rich-text and conditional values, and embed codes, are passed through
//! unescaped since they are pre-sanitized editor HTML. All other
//! interpolated fields are HTML-escaped.

mod value;

pub mod renderer;
pub mod validator;

pub use crate::value::ZoneValue;

/// Raw zone payload as saved by an editor: zone key to JSON value.
pub type ZoneValues = serde_json::Map<String, serde_json::Value>;

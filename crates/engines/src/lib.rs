#![deny(unsafe_code)]
//! Engine registry plus the caller-side glue around the evaluator: CPU pixel
//! mapping, PNG snapshots, the field cache, and the playback state record.
//!
//! This crate sits between `cornerfield-core` (which defines the `Engine`
//! trait) and the evaluator crate (`cornerfield-unfold`). The CLI depends on
//! this crate so dispatch, caching, and rendering logic live in one place.

pub mod cache;
pub mod pixel;
pub mod playback;

#[cfg(feature = "png")]
pub mod snapshot;

use cornerfield_core::error::FieldError;
use cornerfield_core::field::TimeField;
use cornerfield_core::Engine;
use serde_json::Value;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["corner-time"];

/// Enumeration of all available field engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction (CLI).
pub enum EngineKind {
    /// Corner-alignment time field via the unfolding technique.
    CornerTime(cornerfield_unfold::CornerTime),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `FieldError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        resolution: usize,
        params: &Value,
    ) -> Result<Self, FieldError> {
        match name {
            "corner-time" => Ok(EngineKind::CornerTime(
                cornerfield_unfold::CornerTime::from_json(resolution, params)?,
            )),
            _ => Err(FieldError::UnknownEngine(name.to_string())),
        }
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), FieldError> {
        match self {
            EngineKind::CornerTime(e) => e.step(),
        }
    }

    fn field(&self) -> &TimeField {
        match self {
            EngineKind::CornerTime(e) => e.field(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::CornerTime(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::CornerTime(e) => e.param_schema(),
        }
    }

    fn set_params(&mut self, params: &Value) -> Result<(), FieldError> {
        match self {
            EngineKind::CornerTime(e) => e.set_params(params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_name_corner_time_succeeds() {
        assert!(EngineKind::from_name("corner-time", 16, &json!({})).is_ok());
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EngineKind::from_name("nonexistent", 16, &json!({}));
        assert!(matches!(result, Err(FieldError::UnknownEngine(_))));
    }

    #[test]
    fn from_name_propagates_bad_resolution() {
        assert!(EngineKind::from_name("corner-time", 1, &json!({})).is_err());
    }

    #[test]
    fn list_engines_includes_corner_time() {
        assert!(EngineKind::list_engines().contains(&"corner-time"));
    }

    #[test]
    fn trait_delegation_step_and_field() {
        let mut engine = EngineKind::from_name("corner-time", 16, &json!({})).unwrap();
        assert_eq!(engine.field().width(), 16);
        assert_eq!(engine.field().height(), 16);
        engine.step().unwrap();
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let engine = EngineKind::from_name("corner-time", 16, &json!({})).unwrap();
        assert!(engine.params().get("theta").is_some());
        assert!(engine.param_schema().get("theta").is_some());
    }

    #[test]
    fn trait_delegation_set_params() {
        let mut engine = EngineKind::from_name("corner-time", 16, &json!({})).unwrap();
        engine.set_params(&json!({"theta": 1.5})).unwrap();
        assert!((engine.params()["theta"].as_f64().unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn determinism_across_instances() {
        let a = EngineKind::from_name("corner-time", 24, &json!({"theta": 2.0})).unwrap();
        let b = EngineKind::from_name("corner-time", 24, &json!({"theta": 2.0})).unwrap();
        assert!(a
            .field()
            .data()
            .iter()
            .zip(b.field().data().iter())
            .all(|(va, vb)| va.to_bits() == vb.to_bits()));
    }

    #[test]
    fn object_safety() {
        let engine = EngineKind::from_name("corner-time", 8, &json!({})).unwrap();
        let boxed: Box<dyn Engine> = Box::new(engine);
        assert_eq!(boxed.field().width(), 8);
    }
}

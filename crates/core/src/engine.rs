//! The `Engine` trait implemented by every field-producing engine.
//!
//! The trait is object-safe so engines can be driven as `dyn Engine` by the
//! registry, the playback loop, and the CLI without knowing the concrete type.

use crate::error::FieldError;
use crate::field::TimeField;
use serde_json::Value;

/// Core trait for corner-alignment field engines.
///
/// An engine owns its current parameters and a [`TimeField`] that is always
/// consistent with them. `step()` advances one animation frame; `set_params`
/// applies a partial update from a control surface (sliders, CLI flags).
///
/// This trait is **object-safe**: `Box<dyn Engine>` and `&dyn Engine` work.
pub trait Engine {
    /// Advance one animation frame and recompute the field.
    ///
    /// Returns an error only if the updated parameters fail validation,
    /// in which case the previous field is left untouched.
    fn step(&mut self) -> Result<(), FieldError>;

    /// The current scalar field of corner-alignment times.
    fn field(&self) -> &TimeField;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Applies a partial parameter update from a JSON object.
    ///
    /// Keys the engine does not recognize are ignored; recognized keys with
    /// invalid values are rejected before any state changes, so the engine
    /// never holds a field computed from a half-applied update.
    fn set_params(&mut self, params: &Value) -> Result<(), FieldError>;
}

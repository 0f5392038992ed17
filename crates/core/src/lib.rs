#![deny(unsafe_code)]
//! Core types for the cornerfield corner-alignment simulator.
//!
//! Provides the `Engine` trait, the `TimeField` scalar field, `Rectangle`
//! geometry, the `SampleGrid` of initial positions, color types (`Srgb`,
//! `LinearRgb`), `Palette`, the `FieldError` taxonomy, and parameter helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod palette;
pub mod params;

pub use color::{LinearRgb, Srgb};
pub use engine::Engine;
pub use error::FieldError;
pub use field::TimeField;
pub use geometry::Rectangle;
pub use grid::SampleGrid;
pub use palette::Palette;

#![deny(unsafe_code)]
//! Reflection-time field evaluator.
//!
//! Computes, for every start position on a sampling grid, the earliest time
//! at which a logo moving at constant speed and angle theta, reflecting
//! elastically off the screen edges, lands exactly in one of the four
//! corners. Uses the unfolding technique: a reflecting trajectory inside
//! `[0, L] x [0, M]` is a straight line through an infinite tiling of
//! mirrored copies of the rectangle, so corner alignment reduces to crossing
//! a mirrored grid line while the folded transverse coordinate sits within
//! tolerance of an edge.
//!
//! The primary output is a [`TimeField`] of minimum alignment times, which
//! the rendering pipeline log-compresses and maps to pixels via a palette.

use cornerfield_core::error::FieldError;
use cornerfield_core::field::TimeField;
use cornerfield_core::geometry::Rectangle;
use cornerfield_core::grid::SampleGrid;
use cornerfield_core::params::{param_f64, param_usize};
use cornerfield_core::Engine;
use serde_json::{json, Value};
use std::f64::consts::TAU;

/// Default travel speed in pixels per time unit.
const DEFAULT_SPEED: f64 = 500.0;
/// Default travel angle in radians (roughly the classic diagonal launch).
const DEFAULT_THETA: f64 = 0.785;
/// Default mirror-index search depth: candidate grid lines `[-K, K]` per axis.
const DEFAULT_MIRROR_RANGE: usize = 10;
/// Default alignment slack as a fraction of the travel span.
const DEFAULT_TOLERANCE: f64 = 0.02;
/// Default "unreachable within search depth" marker time.
const DEFAULT_SENTINEL: f64 = 10_000.0;
/// Default theta advance per animation frame, in radians.
const DEFAULT_THETA_STEP: f64 = 0.1;
/// Velocity components below this magnitude are clamped to it, keeping their
/// sign, so grid-line crossing times stay finite for axis-aligned angles.
const VELOCITY_EPSILON: f64 = 1e-6;

/// Evaluator parameters.
///
/// Bundles the geometry and the six tunables that shape the field. Use
/// [`Default`] for the drop-in 1920x1080 configuration at the classic
/// diagonal angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnfoldParams {
    /// Screen-and-logo geometry.
    pub rectangle: Rectangle,
    /// Travel speed in pixels per time unit.
    pub speed: f64,
    /// Travel angle in radians; any real value is accepted and wrapped into `[0, 2pi)`.
    pub theta: f64,
    /// Mirror-index search depth K; candidates are enumerated over `[-K, K]`.
    pub mirror_range: usize,
    /// Alignment slack as a fraction of the travel span, in `(0, 0.5)`.
    pub tolerance: f64,
    /// Marker value reported for cells with no alignment within the search depth.
    pub sentinel: f64,
    /// Theta advance per animation frame, in radians.
    pub theta_step: f64,
}

impl Default for UnfoldParams {
    fn default() -> Self {
        Self {
            rectangle: Rectangle::default(),
            speed: DEFAULT_SPEED,
            theta: DEFAULT_THETA,
            mirror_range: DEFAULT_MIRROR_RANGE,
            tolerance: DEFAULT_TOLERANCE,
            sentinel: DEFAULT_SENTINEL,
            theta_step: DEFAULT_THETA_STEP,
        }
    }
}

impl UnfoldParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self::default().merged(params)
    }

    /// Returns a copy with any keys present in `params` overriding `self`.
    ///
    /// Accepted keys: `speed`, `theta`, `mirror_range`, `tolerance`,
    /// `sentinel`, `theta_step`, `outer_width`, `outer_height`,
    /// `logo_width`, `logo_height`. Theta is wrapped into `[0, 2pi)`.
    pub fn merged(&self, params: &Value) -> Self {
        Self {
            rectangle: Rectangle {
                outer_width: param_f64(params, "outer_width", self.rectangle.outer_width),
                outer_height: param_f64(params, "outer_height", self.rectangle.outer_height),
                logo_width: param_f64(params, "logo_width", self.rectangle.logo_width),
                logo_height: param_f64(params, "logo_height", self.rectangle.logo_height),
            },
            speed: param_f64(params, "speed", self.speed),
            theta: param_f64(params, "theta", self.theta).rem_euclid(TAU),
            mirror_range: param_usize(params, "mirror_range", self.mirror_range),
            tolerance: param_f64(params, "tolerance", self.tolerance),
            sentinel: param_f64(params, "sentinel", self.sentinel),
            theta_step: param_f64(params, "theta_step", self.theta_step),
        }
    }

    /// Validates every invariant the evaluator relies on.
    ///
    /// Rejections happen here, before any computation begins, so a caller
    /// never receives a partially computed field.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.rectangle.validate()?;
        if !(self.speed > 0.0) || !self.speed.is_finite() {
            return Err(FieldError::InvalidSpeed(self.speed));
        }
        if self.mirror_range < 1 {
            return Err(FieldError::InvalidMirrorRange(self.mirror_range));
        }
        if !(self.tolerance > 0.0 && self.tolerance < 0.5) {
            return Err(FieldError::InvalidTolerance(self.tolerance));
        }
        if !(self.sentinel > 0.0) || !self.sentinel.is_finite() {
            return Err(FieldError::InvalidSentinel(self.sentinel));
        }
        Ok(())
    }
}

/// Velocity components derived from `(speed, theta)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    vx: f64,
    vy: f64,
}

impl Velocity {
    /// Derives components, clamping near-zero magnitudes to
    /// [`VELOCITY_EPSILON`] with the sign preserved.
    ///
    /// The clamp trades a bounded time-estimation error for near-axis
    /// angles against NaN/Inf-free division everywhere.
    fn from_polar(speed: f64, theta: f64) -> Self {
        let mut vx = speed * theta.cos();
        let mut vy = speed * theta.sin();
        if vx.abs() < VELOCITY_EPSILON {
            vx = VELOCITY_EPSILON.copysign(vx);
        }
        if vy.abs() < VELOCITY_EPSILON {
            vy = VELOCITY_EPSILON.copysign(vy);
        }
        Self { vx, vy }
    }
}

/// A computed field together with the grid it was sampled on:
/// the full result triple `(p_coords, q_coords, field)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSolution {
    pub grid: SampleGrid,
    pub field: TimeField,
}

/// Evaluates the minimum corner-alignment time for every grid cell.
///
/// `grid` must have been built for `params.rectangle` (use [`solve`] to do
/// both in one call).
///
/// Pure: same inputs produce bit-identical output, no side effects. Every
/// output value lies in `[0, sentinel]`: the per-cell minimum starts at the
/// sentinel and only shrinks, so candidates slower than the sentinel are
/// never reported.
pub fn evaluate_field(grid: &SampleGrid, params: &UnfoldParams) -> Result<TimeField, FieldError> {
    params.validate()?;

    let span_x = params.rectangle.span_x();
    let span_y = params.rectangle.span_y();
    let vel = Velocity::from_polar(params.speed, params.theta.rem_euclid(TAU));
    let resolution = grid.resolution();

    let mut field = TimeField::new(resolution, resolution)?;
    let data = field.data_mut();
    for (j, &q) in grid.q_coords().iter().enumerate() {
        for (i, &p) in grid.p_coords().iter().enumerate() {
            data[j * resolution + i] = min_corner_time(p, q, vel, span_x, span_y, params);
        }
    }
    Ok(field)
}

/// Builds the grid and evaluates the field in one call.
pub fn solve(resolution: usize, params: &UnfoldParams) -> Result<FieldSolution, FieldError> {
    let grid = SampleGrid::build(&params.rectangle, resolution)?;
    let field = evaluate_field(&grid, params)?;
    Ok(FieldSolution { grid, field })
}

/// Minimum valid alignment time for one start position, or `sentinel`.
///
/// Horizontal pass: the trajectory crosses the unfolded vertical line
/// `x = n * span_x` at `t_h = (n * span_x - p) / vx`; the crossing is an
/// alignment when the folded transverse coordinate `(q + vy * t_h) mod span_y`
/// sits within `tolerance * span_y` of a fold boundary. The vertical pass is
/// the mirror image. Candidates with `t <= 0` are non-causal and skipped,
/// so a start position exactly in a corner reports its next return, not zero.
///
/// The fold test uses `rem_euclid` (range `[0, span)`) against the `0`
/// boundary only; approaches to a fold line from below land near `span` and
/// are not detected. A start sitting exactly on the far edge still folds to
/// `0` and is caught.
fn min_corner_time(
    p: f64,
    q: f64,
    vel: Velocity,
    span_x: f64,
    span_y: f64,
    params: &UnfoldParams,
) -> f64 {
    let mut best = params.sentinel;
    let k = params.mirror_range as i64;

    for n in -k..=k {
        let t_h = (n as f64 * span_x - p) / vel.vx;
        if t_h <= 0.0 {
            continue;
        }
        let q_at_t = q + vel.vy * t_h;
        if q_at_t.rem_euclid(span_y) < params.tolerance * span_y {
            best = best.min(t_h);
        }
    }

    for m in -k..=k {
        let t_v = (m as f64 * span_y - q) / vel.vy;
        if t_v <= 0.0 {
            continue;
        }
        let p_at_t = p + vel.vx * t_v;
        if p_at_t.rem_euclid(span_x) < params.tolerance * span_x {
            best = best.min(t_v);
        }
    }

    best
}

/// Corner-alignment time-field engine.
///
/// Owns the current parameters, the sampling grid, and a field that is
/// always consistent with both. `step()` advances theta by `theta_step`
/// (wrapping at 2pi) and recomputes: one animation frame.
pub struct CornerTime {
    resolution: usize,
    params: UnfoldParams,
    grid: SampleGrid,
    field: TimeField,
}

impl CornerTime {
    /// Creates an engine and computes its initial field eagerly, so a
    /// constructed engine always holds a valid field.
    pub fn new(resolution: usize, params: UnfoldParams) -> Result<Self, FieldError> {
        let params = UnfoldParams {
            theta: params.theta.rem_euclid(TAU),
            ..params
        };
        let FieldSolution { grid, field } = solve(resolution, &params)?;
        Ok(Self {
            resolution,
            params,
            grid,
            field,
        })
    }

    /// Creates an engine from a JSON params object.
    ///
    /// Extracts the keys listed on [`UnfoldParams::merged`], falling back to
    /// defaults for missing keys.
    pub fn from_json(resolution: usize, json_params: &Value) -> Result<Self, FieldError> {
        Self::new(resolution, UnfoldParams::from_json(json_params))
    }

    /// Samples per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Current travel angle in `[0, 2pi)`.
    pub fn theta(&self) -> f64 {
        self.params.theta
    }

    /// The sampling grid the field was computed on.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Current evaluator parameters.
    pub fn unfold_params(&self) -> &UnfoldParams {
        &self.params
    }

    /// Sets the travel angle directly (the paused, user-driven path) and
    /// recomputes the field.
    pub fn set_theta(&mut self, theta: f64) -> Result<(), FieldError> {
        let params = UnfoldParams {
            theta: theta.rem_euclid(TAU),
            ..self.params
        };
        self.field = evaluate_field(&self.grid, &params)?;
        self.params = params;
        Ok(())
    }
}

impl Engine for CornerTime {
    fn step(&mut self) -> Result<(), FieldError> {
        let theta = (self.params.theta + self.params.theta_step).rem_euclid(TAU);
        self.set_theta(theta)
    }

    fn field(&self) -> &TimeField {
        &self.field
    }

    fn params(&self) -> Value {
        json!({
            "resolution": self.resolution,
            "theta": self.params.theta,
            "speed": self.params.speed,
            "mirror_range": self.params.mirror_range,
            "tolerance": self.params.tolerance,
            "sentinel": self.params.sentinel,
            "theta_step": self.params.theta_step,
            "outer_width": self.params.rectangle.outer_width,
            "outer_height": self.params.rectangle.outer_height,
            "logo_width": self.params.rectangle.logo_width,
            "logo_height": self.params.rectangle.logo_height,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "resolution": {
                "type": "integer",
                "default": 100,
                "min": 2,
                "description": "Samples per axis of the start-position grid"
            },
            "theta": {
                "type": "number",
                "default": DEFAULT_THETA,
                "min": 0.0,
                "max": TAU,
                "description": "Travel angle in radians (wraps at 2pi)"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 1.0,
                "max": 5000.0,
                "description": "Travel speed in pixels per time unit"
            },
            "mirror_range": {
                "type": "integer",
                "default": DEFAULT_MIRROR_RANGE,
                "min": 1,
                "max": 100,
                "description": "Mirror-index search depth K (candidates over [-K, K])"
            },
            "tolerance": {
                "type": "number",
                "default": DEFAULT_TOLERANCE,
                "min": 0.001,
                "max": 0.499,
                "description": "Alignment slack as a fraction of the travel span"
            },
            "sentinel": {
                "type": "number",
                "default": DEFAULT_SENTINEL,
                "min": 1.0,
                "description": "Time reported for cells with no alignment in range"
            },
            "theta_step": {
                "type": "number",
                "default": DEFAULT_THETA_STEP,
                "min": 0.001,
                "max": 1.0,
                "description": "Theta advance per animation frame, in radians"
            },
            "outer_width": {
                "type": "number",
                "default": 1920.0,
                "description": "Screen width in pixels"
            },
            "outer_height": {
                "type": "number",
                "default": 1080.0,
                "description": "Screen height in pixels"
            },
            "logo_width": {
                "type": "number",
                "default": 300.0,
                "description": "Logo width in pixels"
            },
            "logo_height": {
                "type": "number",
                "default": 200.0,
                "description": "Logo height in pixels"
            }
        })
    }

    fn set_params(&mut self, json_params: &Value) -> Result<(), FieldError> {
        let resolution = param_usize(json_params, "resolution", self.resolution);
        let params = self.params.merged(json_params);
        if resolution == self.resolution && params == self.params {
            return Ok(());
        }
        // Validate and recompute into locals first; the engine state only
        // changes once the whole update has succeeded.
        let FieldSolution { grid, field } = solve(resolution, &params)?;
        self.resolution = resolution;
        self.params = params;
        self.grid = grid;
        self.field = field;
        Ok(())
    }
}

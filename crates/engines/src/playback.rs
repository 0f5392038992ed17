//! Playback state for the theta-sweep animation.
//!
//! An explicit state record owned by the driving loop: a playing flag and
//! the current angle. While playing, each scheduler tick calls [`advance`]
//! to move theta one step (wrapping at 2pi); while paused, the angle is set
//! directly by the user. Stopping playback is simply not calling `advance`
//! again; field computations are short and synchronous, so there is
//! nothing in flight to cancel.
//!
//! [`advance`]: Playback::advance

use std::f64::consts::TAU;

/// Default theta advance per tick, in radians.
pub const DEFAULT_THETA_STEP: f64 = 0.1;

/// Play/pause state and current angle for the animation loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    playing: bool,
    theta: f64,
    theta_step: f64,
}

impl Playback {
    /// Creates a paused playback at `theta`, advancing by `theta_step` per tick.
    ///
    /// Theta is wrapped into `[0, 2pi)`; a non-positive or non-finite step
    /// falls back to [`DEFAULT_THETA_STEP`].
    pub fn new(theta: f64, theta_step: f64) -> Self {
        let theta_step = if theta_step.is_finite() && theta_step > 0.0 {
            theta_step
        } else {
            DEFAULT_THETA_STEP
        };
        Self {
            playing: false,
            theta: theta.rem_euclid(TAU),
            theta_step,
        }
    }

    /// Current angle in `[0, 2pi)`.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Theta advance per tick.
    pub fn theta_step(&self) -> f64 {
        self.theta_step
    }

    /// True while automatic advancement is active.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Starts automatic advancement.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stops automatic advancement.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flips the playing flag and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Sets the angle directly (the paused, user-driven path).
    ///
    /// Accepts any real value and wraps it into `[0, 2pi)`.
    pub fn set_theta(&mut self, theta: f64) {
        self.theta = theta.rem_euclid(TAU);
    }

    /// Advances one tick while playing.
    ///
    /// Returns the new angle, or `None` when paused (the caller schedules
    /// no redraw in that case).
    pub fn advance(&mut self) -> Option<f64> {
        if !self.playing {
            return None;
        }
        self.theta = (self.theta + self.theta_step).rem_euclid(TAU);
        Some(self.theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_paused_at_wrapped_theta() {
        let playback = Playback::new(TAU + 0.5, 0.1);
        assert!(!playback.is_playing());
        assert!((playback.theta() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn new_falls_back_to_default_step_for_bad_input() {
        assert_eq!(Playback::new(0.0, 0.0).theta_step(), DEFAULT_THETA_STEP);
        assert_eq!(Playback::new(0.0, -0.3).theta_step(), DEFAULT_THETA_STEP);
        assert_eq!(
            Playback::new(0.0, f64::NAN).theta_step(),
            DEFAULT_THETA_STEP
        );
    }

    #[test]
    fn advance_while_paused_returns_none_and_holds_theta() {
        let mut playback = Playback::new(1.0, 0.1);
        assert_eq!(playback.advance(), None);
        assert!((playback.theta() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn advance_while_playing_steps_theta() {
        let mut playback = Playback::new(1.0, 0.1);
        playback.play();
        let theta = playback.advance().unwrap();
        assert!((theta - 1.1).abs() < 1e-12);
        assert!((playback.theta() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn advance_wraps_at_two_pi() {
        let mut playback = Playback::new(TAU - 0.05, 0.1);
        playback.play();
        let theta = playback.advance().unwrap();
        assert!(theta < TAU);
        assert!((theta - 0.05).abs() < 1e-9);
    }

    #[test]
    fn full_sweep_returns_near_start() {
        let mut playback = Playback::new(0.0, 0.1);
        playback.play();
        for _ in 0..63 {
            playback.advance().unwrap();
        }
        // 63 * 0.1 = 6.3 wraps past 2pi to ~0.0168.
        assert!(playback.theta() < 0.1);
    }

    #[test]
    fn set_theta_wraps_negative_angles() {
        let mut playback = Playback::new(0.0, 0.1);
        playback.set_theta(-1.0);
        assert!((playback.theta() - (TAU - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn toggle_flips_and_reports_state() {
        let mut playback = Playback::new(0.0, 0.1);
        assert!(playback.toggle());
        assert!(playback.is_playing());
        assert!(!playback.toggle());
        assert!(!playback.is_playing());
    }

    #[test]
    fn pause_stops_advancement() {
        let mut playback = Playback::new(0.0, 0.1);
        playback.play();
        playback.advance().unwrap();
        playback.pause();
        assert_eq!(playback.advance(), None);
    }
}

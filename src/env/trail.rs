//! Meandering-trail task: follow a scented 2D path to its end

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{Environment, Step};

const SEGMENT_LEN: f64 = 1.0;
const MOVE_SPEED: f64 = 1.0;
const TURN_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Difficulty parameterization of a meandering trail.
///
/// Schedules of `TrailParams` with growing `length` and `heading_noise`
/// form the rungs of a trail curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailParams {
    /// Arc length of the trail
    pub length: f64,
    /// Odor falloff radius around the trail
    pub width: f64,
    /// Heading wobble per trail segment, in radians
    pub heading_noise: f64,
    /// Arrival radius around the trail end
    pub reward_dist: f64,
}

impl TrailParams {
    /// Trail of the given length with gentle defaults.
    pub fn new(length: f64) -> Self {
        Self { length, width: 3.0, heading_noise: 0.2, reward_dist: 2.0 }
    }

    /// Set the odor falloff radius.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the per-segment heading wobble.
    pub fn with_heading_noise(mut self, heading_noise: f64) -> Self {
        self.heading_noise = heading_noise;
        self
    }

    /// Set the arrival radius.
    pub fn with_reward_dist(mut self, reward_dist: f64) -> Self {
        self.reward_dist = reward_dist;
        self
    }
}

/// Action repertoire of the trail task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailAction {
    Left,
    Forward,
    Right,
}

/// A 2D trail-following task. The trail meanders from the origin with
/// per-segment heading wobble; the agent starts at the origin heading
/// along the trail and must reach the far end within a step budget.
/// Observations are a small feature vector: odor intensity at the current
/// position plus the heading direction.
///
/// The trail is sampled once per instance from the seeded generator, so a
/// fresh instance per training round means a fresh map while `reset`
/// replays the same map from the start.
#[derive(Debug, Clone)]
pub struct MeanderTrailEnv {
    params: TrailParams,
    waypoints: Vec<(f64, f64)>,
    pos: (f64, f64),
    heading: f64,
    steps: usize,
    max_steps: usize,
    history: Vec<bool>,
}

impl MeanderTrailEnv {
    /// Sample a trail for `params` from a seeded generator.
    pub fn new(params: TrailParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let waypoints = sample_trail(&mut rng, &params);
        let max_steps = (params.length * 4.0).ceil() as usize + 20;
        let mut env = Self {
            params,
            waypoints,
            pos: (0.0, 0.0),
            heading: std::f64::consts::FRAC_PI_2,
            steps: 0,
            max_steps,
            history: Vec::new(),
        };
        env.reset();
        env
    }

    /// Odor intensity at a position: Gaussian falloff from the nearest
    /// trail waypoint.
    pub fn odor_at(&self, pos: (f64, f64)) -> f64 {
        let d2 = self
            .waypoints
            .iter()
            .map(|w| dist2(pos, *w))
            .fold(f64::INFINITY, f64::min);
        (-d2 / (2.0 * self.params.width * self.params.width)).exp()
    }

    fn observe(&self) -> [f64; 3] {
        [self.odor_at(self.pos), self.heading.sin(), self.heading.cos()]
    }

    fn dist_to_end(&self) -> f64 {
        match self.waypoints.last() {
            Some(&end) => dist2(self.pos, end).sqrt(),
            None => 0.0,
        }
    }
}

fn dist2(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

fn sample_trail(rng: &mut StdRng, params: &TrailParams) -> Vec<(f64, f64)> {
    let segments = (params.length / SEGMENT_LEN).ceil() as usize;
    let mut heading = std::f64::consts::FRAC_PI_2;
    let mut pos = (0.0, 0.0);
    let mut waypoints = vec![pos];
    for _ in 0..segments {
        heading += (rng.random::<f64>() - 0.5) * 2.0 * params.heading_noise;
        pos = (
            pos.0 + SEGMENT_LEN * heading.cos(),
            pos.1 + SEGMENT_LEN * heading.sin(),
        );
        waypoints.push(pos);
    }
    waypoints
}

impl Environment for MeanderTrailEnv {
    type Obs = [f64; 3];
    type Action = TrailAction;

    fn reset(&mut self) -> [f64; 3] {
        self.pos = (0.0, 0.0);
        self.heading = std::f64::consts::FRAC_PI_2;
        self.steps = 0;
        self.observe()
    }

    fn step(&mut self, action: TrailAction) -> Step<[f64; 3]> {
        match action {
            TrailAction::Left => self.heading += TURN_ANGLE,
            TrailAction::Right => self.heading -= TURN_ANGLE,
            TrailAction::Forward => {}
        }
        self.pos = (
            self.pos.0 + MOVE_SPEED * self.heading.cos(),
            self.pos.1 + MOVE_SPEED * self.heading.sin(),
        );
        self.steps += 1;

        let success = self.dist_to_end() <= self.params.reward_dist;
        let done = success || self.steps >= self.max_steps;
        let reward = if success { 1.0 } else { 0.0 };
        if done {
            self.history.push(success);
        }

        Step { obs: self.observe(), reward, done, success }
    }

    fn history(&self) -> &[bool] {
        &self.history
    }
}

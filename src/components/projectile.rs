//! Staged projectile ("plasma arrow") animation.
//!
//! A [`ProjectileAnimation`] describes one shot entirely through three
//! timestamps: when it started, when (if ever) it hit something, and the
//! time it is drawn at. Nothing advances between frames, so drawing the same
//! instant twice issues the same calls.
//!
//! # Timeline
//!
//! With `dt = now - ms_start`:
//!
//! - **igniting** while `dt < fire_ms`: muzzle fire and halo at the launch
//!   point, fading in. Overlaps the following phases.
//! - **travelling** while not hit and `dt <= travel_ms`: the projectile at
//!   `start + dt * velocity`, anchored by its top.
//! - **fading** while not hit and `travel_ms < dt <= travel_ms + fade_ms`:
//!   the projectile frozen where travel ended, alpha going linearly to zero.
//! - **splashing** once `now > ms_hit`: the splash where the projectile was at
//!   the hit, fading in over `splash_ms`.
//! - **ended** once `dt` exceeds the total duration:
//!   `ms_hit - ms_start + splash_ms` when hit, `travel_ms + fade_ms` otherwise.
//!
//! Drawing after the end reproduces the last frame, because `dt` is clamped
//! to the total duration before anything is positioned.
//!
//! # Hits
//!
//! The first accepted [`hit`](ProjectileAnimation::hit) wins. Hits on an inert
//! shot, a shot that has not started yet, an already hit shot, or a fading
//! shot are ignored.
//!
//! # Related
//!
//! - [`crate::resources::animationpool::AnimationPool`] – round-robin reuse

use log::debug;

use crate::components::sprite::SpriteHandle;
use crate::math::Vector2;
use crate::render::{SpriteRenderer, draw_faded, draw_oriented};
use crate::resources::worldtime::ms_since;

pub const DEFAULT_FIRE_MS: u32 = 50;
pub const DEFAULT_TRAVEL_MS: u32 = 300;
pub const DEFAULT_FADE_MS: u32 = 100;
pub const DEFAULT_SPLASH_MS: u32 = 100;

/// The four sprites a shot is made of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileImages {
    pub halo: SpriteHandle,
    pub fire: SpriteHandle,
    pub projectile: SpriteHandle,
    pub splash: SpriteHandle,
}

/// Phase lengths in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileDurations {
    pub fire_ms: u32,
    pub travel_ms: u32,
    pub fade_ms: u32,
    pub splash_ms: u32,
}

impl Default for ProjectileDurations {
    fn default() -> Self {
        Self {
            fire_ms: DEFAULT_FIRE_MS,
            travel_ms: DEFAULT_TRAVEL_MS,
            fade_ms: DEFAULT_FADE_MS,
            splash_ms: DEFAULT_SPLASH_MS,
        }
    }
}

/// Where and how a shot leaves the weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunch {
    pub position: Vector2,
    /// Units per millisecond.
    pub velocity: Vector2,
    /// Orientation the sprites are drawn at, in radians.
    pub angle: f32,
}

impl ProjectileLaunch {
    /// Launch along `angle` at `speed` units per millisecond.
    pub fn toward(position: Vector2, angle: f32, speed: f32) -> Self {
        Self {
            position,
            velocity: Vector2::from_angle(angle) * speed,
            angle,
        }
    }
}

/// Coarse state of a shot at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `now` is before the start, or the shot was never started.
    NotStarted,
    Running,
    Ended,
}

/// Fine-grained state of a shot at a given time. Igniting overlaps these and
/// is queried with [`ProjectileAnimation::is_igniting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inert,
    NotStarted,
    Travelling,
    Fading,
    Splashing,
    Ended,
}

#[derive(Debug, Clone)]
pub struct ProjectileAnimation {
    images: ProjectileImages,
    durations: ProjectileDurations,
    start_position: Vector2,
    velocity: Vector2,
    angle: f32,
    ms_start: Option<u32>,
    ms_hit: Option<u32>,
}

impl ProjectileAnimation {
    /// An inert animation; call [`start`](Self::start) to fire it.
    pub fn new(images: ProjectileImages, durations: ProjectileDurations) -> Self {
        Self {
            images,
            durations,
            start_position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            angle: 0.0,
            ms_start: None,
            ms_hit: None,
        }
    }

    pub fn images(&self) -> &ProjectileImages {
        &self.images
    }

    pub fn durations(&self) -> &ProjectileDurations {
        &self.durations
    }

    pub fn start_position(&self) -> Vector2 {
        self.start_position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn ms_start(&self) -> Option<u32> {
        self.ms_start
    }

    pub fn ms_hit(&self) -> Option<u32> {
        self.ms_hit
    }

    /// Activate the shot. Any previous timeline, hit included, is discarded.
    pub fn start(&mut self, launch: ProjectileLaunch, ms_now: u32) {
        self.start_position = launch.position;
        self.velocity = launch.velocity;
        self.angle = launch.angle;
        self.ms_start = Some(ms_now);
        self.ms_hit = None;
    }

    /// Return to the inert state.
    pub fn stop(&mut self) {
        self.ms_start = None;
        self.ms_hit = None;
    }

    /// Register a hit at `ms_hit`. Returns `false` when the hit is refused.
    pub fn hit(&mut self, ms_hit: u32) -> bool {
        if !self.can_be_hit(ms_hit) {
            debug!("Ignoring projectile hit at {} ms", ms_hit);
            return false;
        }
        self.ms_hit = Some(ms_hit);
        true
    }

    /// Started and not stopped. Stays true after the shot ends.
    pub fn is_active(&self) -> bool {
        self.ms_start.is_some()
    }

    /// True from the start time on, including after the end.
    pub fn has_started(&self, ms_now: u32) -> bool {
        self.elapsed(ms_now).is_some()
    }

    pub fn is_hit(&self) -> bool {
        self.ms_hit.is_some()
    }

    pub fn is_fading(&self, ms_now: u32) -> bool {
        self.elapsed(ms_now)
            .is_some_and(|dt| dt > self.durations.travel_ms)
    }

    pub fn can_be_hit(&self, ms_now: u32) -> bool {
        self.has_started(ms_now) && !self.is_hit() && !self.is_fading(ms_now)
    }

    pub fn is_igniting(&self, ms_now: u32) -> bool {
        self.clamped_elapsed(ms_now)
            .is_some_and(|dt| dt < self.durations.fire_ms)
    }

    /// Milliseconds since the start, `None` when inert or not started yet.
    /// Counts across a clock wrap.
    pub fn elapsed(&self, ms_now: u32) -> Option<u32> {
        self.ms_start.and_then(|start| ms_since(ms_now, start))
    }

    /// Length of the whole timeline as seen at `ms_now`.
    pub fn total_duration(&self, ms_now: u32) -> u32 {
        match self.hit_elapsed(ms_now) {
            Some(hit_dt) => hit_dt.saturating_add(self.durations.splash_ms),
            None => self
                .durations
                .travel_ms
                .saturating_add(self.durations.fade_ms),
        }
    }

    pub fn stage(&self, ms_now: u32) -> Stage {
        match self.elapsed(ms_now) {
            None => Stage::NotStarted,
            Some(dt) if dt > self.total_duration(ms_now) => Stage::Ended,
            Some(_) => Stage::Running,
        }
    }

    pub fn phase(&self, ms_now: u32) -> Phase {
        if !self.is_active() {
            return Phase::Inert;
        }
        let Some(dt) = self.elapsed(ms_now) else {
            return Phase::NotStarted;
        };
        if dt > self.total_duration(ms_now) {
            Phase::Ended
        } else if self.hit_elapsed(ms_now).is_some() {
            Phase::Splashing
        } else if dt > self.durations.travel_ms {
            Phase::Fading
        } else {
            Phase::Travelling
        }
    }

    /// Draw the shot as it looks at `ms_now`.
    pub fn draw<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R, ms_now: u32) {
        let Some(dt) = self.clamped_elapsed(ms_now) else {
            return;
        };
        let d = &self.durations;
        let img = &self.images;
        let unit = self.velocity.normalize_or_zero();

        if dt < d.fire_ms {
            let center = img.fire.center_for_base_at(self.start_position, unit);
            let fade_in = ratio(dt, d.fire_ms);
            draw_faded(renderer, &img.fire, center, self.angle, fade_in);
            draw_faded(renderer, &img.halo, center, self.angle, fade_in);
        }

        if let Some(hit_dt) = self.hit_elapsed(ms_now) {
            let top = self.top_at(hit_dt, unit);
            let center = img.splash.center_for_top_at(top, unit);
            let fade_in = ratio(dt.saturating_sub(hit_dt), d.splash_ms);
            draw_faded(renderer, &img.splash, center, self.angle, fade_in);
            return;
        }

        let top = self.top_at(dt.min(d.travel_ms), unit);
        let center = img.projectile.center_for_top_at(top, unit);
        if dt > d.travel_ms {
            let fade_out = 1.0 - ratio(dt - d.travel_ms, d.fade_ms);
            draw_faded(renderer, &img.projectile, center, self.angle, fade_out);
        } else {
            draw_oriented(renderer, &img.projectile, center, self.angle);
        }
    }

    /// Elapsed time clamped to the total duration.
    fn clamped_elapsed(&self, ms_now: u32) -> Option<u32> {
        self.elapsed(ms_now)
            .map(|dt| dt.min(self.total_duration(ms_now)))
    }

    /// Time from start to hit, once the hit is in the past.
    fn hit_elapsed(&self, ms_now: u32) -> Option<u32> {
        let start = self.ms_start?;
        self.ms_hit
            .filter(|&hit| ms_since(ms_now, hit).is_some_and(|dt| dt > 0))
            .map(|hit| hit.wrapping_sub(start))
    }

    /// Where the projectile's tip is after `dt` milliseconds of flight.
    fn top_at(&self, dt: u32, unit: Vector2) -> Vector2 {
        self.start_position + self.velocity * dt as f32 + unit * self.images.projectile.height
    }
}

fn ratio(part: u32, whole: u32) -> f32 {
    if whole == 0 {
        1.0
    } else {
        part as f32 / whole as f32
    }
}

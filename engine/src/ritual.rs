//! The clear-mind ritual: confirm, animate, then clear.
//!
//! Timing is modeled as explicit timers advanced by `tick(delta)`, so the
//! whole sequence is owned state — cancelling is a state transition, and a
//! second clear request during an in-flight ritual is ignored rather than
//! racing a detached timeout.

use std::time::Duration;

use mindsweep_types::ui::EffectTimer;
use mindsweep_types::{Bounds, Point};
use rand::Rng;

/// Decorative particles spawned when the user confirms.
pub const PARTICLE_COUNT: usize = 50;
/// Gap between consecutive bubble pops.
pub const POP_STAGGER: Duration = Duration::from_millis(100);
/// Length of a single bubble's pop.
pub const POP_DURATION: Duration = Duration::from_millis(300);
/// Total animation length before the collection is cleared.
pub const ANIMATION_TOTAL: Duration = Duration::from_secs(3);

const TWINKLE_PHASE_MAX_MS: u64 = 2000;

/// One decorative particle in the ritual overlay.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Point,
    /// Per-particle twinkle offset so the field doesn't blink in unison.
    pub phase: Duration,
}

#[derive(Debug, Default)]
enum RitualState {
    #[default]
    Inactive,
    Confirming,
    Animating {
        timer: EffectTimer,
        particles: Vec<Particle>,
    },
}

/// Outcome of advancing the ritual by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RitualTick {
    Idle,
    /// The animation just finished: the caller must clear the store now.
    /// Reported exactly once per cycle.
    Completed,
}

/// State machine: `Inactive` → `Confirming` → `Animating` → `Inactive`,
/// with a cancel edge from `Confirming` back to `Inactive`.
#[derive(Debug, Default)]
pub struct Ritual {
    state: RitualState,
}

impl Ritual {
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        matches!(self.state, RitualState::Inactive)
    }

    #[must_use]
    pub fn is_confirming(&self) -> bool {
        matches!(self.state, RitualState::Confirming)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, RitualState::Animating { .. })
    }

    /// Inactive → Confirming. Ignored while a cycle is already in flight.
    pub fn begin_confirm(&mut self) {
        if self.is_inactive() {
            self.state = RitualState::Confirming;
        }
    }

    /// Confirming → Inactive. No thought data is touched on this path.
    pub fn cancel(&mut self) {
        if self.is_confirming() {
            self.state = RitualState::Inactive;
        }
    }

    /// Confirming → Animating: spawn the particle field across `viewport`
    /// and start the staggered pop sequence.
    pub fn confirm(&mut self, viewport: Bounds) {
        if !self.is_confirming() {
            return;
        }

        let mut rng = rand::rng();
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                position: Point::new(
                    rng.random_range(viewport.x..=viewport.right()),
                    rng.random_range(viewport.y..=viewport.bottom()),
                ),
                phase: Duration::from_millis(rng.random_range(0..TWINKLE_PHASE_MAX_MS)),
            })
            .collect();

        self.state = RitualState::Animating {
            timer: EffectTimer::new(ANIMATION_TOTAL),
            particles,
        };
    }

    /// Advance the animation. Returns [`RitualTick::Completed`] exactly once,
    /// on the frame the total duration elapses; the particle field is dropped
    /// and the machine returns to `Inactive`.
    pub fn tick(&mut self, delta: Duration) -> RitualTick {
        let RitualState::Animating { timer, .. } = &mut self.state else {
            return RitualTick::Idle;
        };

        timer.advance(delta);
        if timer.is_finished() {
            self.state = RitualState::Inactive;
            return RitualTick::Completed;
        }
        RitualTick::Idle
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        match &self.state {
            RitualState::Animating { particles, .. } => particles,
            _ => &[],
        }
    }

    /// Elapsed animation time, while animating.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match &self.state {
            RitualState::Animating { timer, .. } => timer.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Pop progress for the bubble at render index `index`: `None` before its
    /// staggered start, then `0.0..=1.0` over [`POP_DURATION`].
    #[must_use]
    pub fn pop_progress(&self, index: usize) -> Option<f32> {
        let RitualState::Animating { timer, .. } = &self.state else {
            return None;
        };

        let start = POP_STAGGER.saturating_mul(index as u32);
        let elapsed = timer.elapsed();
        if elapsed < start {
            return None;
        }
        let into_pop = elapsed.saturating_sub(start);
        Some((into_pop.as_secs_f32() / POP_DURATION.as_secs_f32()).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::{ANIMATION_TOTAL, PARTICLE_COUNT, POP_STAGGER, Ritual, RitualTick};
    use mindsweep_types::Bounds;
    use std::time::Duration;

    const VIEWPORT: Bounds = Bounds::new(0, 0, 120, 40);

    #[test]
    fn cancel_returns_to_inactive() {
        let mut ritual = Ritual::default();
        ritual.begin_confirm();
        assert!(ritual.is_confirming());

        ritual.cancel();
        assert!(ritual.is_inactive());
    }

    #[test]
    fn confirm_spawns_particles_in_viewport() {
        let mut ritual = Ritual::default();
        ritual.begin_confirm();
        ritual.confirm(VIEWPORT);

        assert!(ritual.is_animating());
        assert_eq!(ritual.particles().len(), PARTICLE_COUNT);
        for particle in ritual.particles() {
            assert!(VIEWPORT.contains(particle.position));
        }
    }

    #[test]
    fn completes_exactly_once_after_total_duration() {
        let mut ritual = Ritual::default();
        ritual.begin_confirm();
        ritual.confirm(VIEWPORT);

        assert_eq!(ritual.tick(Duration::from_secs(1)), RitualTick::Idle);
        assert_eq!(ritual.tick(ANIMATION_TOTAL), RitualTick::Completed);
        assert!(ritual.is_inactive());
        assert!(ritual.particles().is_empty());
        assert_eq!(ritual.tick(Duration::from_secs(1)), RitualTick::Idle);
    }

    #[test]
    fn in_flight_cycle_ignores_new_requests() {
        let mut ritual = Ritual::default();
        ritual.begin_confirm();
        ritual.confirm(VIEWPORT);
        ritual.tick(Duration::from_millis(500));

        // A second clear request mid-animation neither restarts nor cancels.
        ritual.begin_confirm();
        assert!(ritual.is_animating());
        assert!(ritual.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn confirm_outside_confirming_is_a_no_op() {
        let mut ritual = Ritual::default();
        ritual.confirm(VIEWPORT);
        assert!(ritual.is_inactive());
    }

    #[test]
    fn pops_are_staggered_by_index() {
        let mut ritual = Ritual::default();
        ritual.begin_confirm();
        ritual.confirm(VIEWPORT);

        ritual.tick(Duration::from_millis(150));
        assert!(ritual.pop_progress(0).is_some());
        assert!(ritual.pop_progress(1).is_some());
        assert!(ritual.pop_progress(2).is_none());

        ritual.tick(POP_STAGGER);
        assert!(ritual.pop_progress(2).is_some());
    }

    #[test]
    fn pop_progress_clamps_to_one() {
        let mut ritual = Ritual::default();
        ritual.begin_confirm();
        ritual.confirm(VIEWPORT);

        ritual.tick(Duration::from_secs(2));
        assert!((ritual.pop_progress(0).expect("started") - 1.0).abs() < f32::EPSILON);
    }
}

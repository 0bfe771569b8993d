//! The one-shot evolution burst fired when adaptation reaches 100%.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    EVOLUTION_BASE_DELAY_MS, EVOLUTION_MARGIN, EVOLUTION_PARTICLES, EVOLUTION_SETTLE_MS,
    EVOLUTION_SPREAD_X, EVOLUTION_SPREAD_Y, EVOLUTION_STAGGER_MS,
};

/// One rising particle of the burst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionParticle {
    pub x: f32,
    pub y: f32,
    pub delay_ms: f32,
    /// Alternate between the two celebration tints.
    pub alt_tint: bool,
}

/// Scripted terminal animation data. Generated exactly once per session,
/// the instant the adaptation meter fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSequence {
    pub particles: Vec<EvolutionParticle>,
    pub duration_ms: f32,
}

impl EvolutionSequence {
    #[must_use]
    pub fn generate(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut particles = Vec::with_capacity(EVOLUTION_PARTICLES);
        for index in 0..EVOLUTION_PARTICLES {
            let stagger = u16::try_from(index).unwrap_or(u16::MAX);
            particles.push(EvolutionParticle {
                x: EVOLUTION_MARGIN + rng.gen_range(0.0..EVOLUTION_SPREAD_X),
                y: EVOLUTION_MARGIN + rng.gen_range(0.0..EVOLUTION_SPREAD_Y),
                delay_ms: EVOLUTION_BASE_DELAY_MS + f32::from(stagger) * EVOLUTION_STAGGER_MS,
                alt_tint: rng.gen_bool(0.5),
            });
        }
        let last_delay = particles.last().map_or(0.0, |particle| particle.delay_ms);
        Self {
            particles,
            duration_ms: last_delay + EVOLUTION_SETTLE_MS,
        }
    }
}

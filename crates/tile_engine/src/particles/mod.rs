//! Point-particle emitters
//!
//! An emitter owns a fixed pool of particles. Particles that outlive
//! `max_lifetime` are recycled in place at the emitter origin, so the pool
//! renews continuously without allocating.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::math::{utils::lerp_color, Vec2, Vec4};

/// A single point particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World position
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
    /// Seconds since the last recycle
    pub lifetime: f32,
}

impl Particle {
    /// Create a particle at rest
    pub fn new(position: Vec2, lifetime: f32) -> Self {
        Self { position, velocity: Vec2::zeros(), lifetime }
    }

    /// Send the particle back to `origin`
    ///
    /// `max_lifetime` is subtracted rather than the lifetime being zeroed, so
    /// overshoot carries into the next cycle.
    pub fn recycle(&mut self, origin: Vec2, velocity: Vec2, max_lifetime: f32) {
        self.position = origin;
        self.velocity = velocity;
        self.lifetime -= max_lifetime;
    }
}

/// Uniform sample in `[-1, 1]` in steps of 0.01
fn jitter<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(-100i32..=100) as f32 / 100.0
}

/// A pool of particles under constant gravity
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    /// Where particles are (re)emitted
    pub position: Vec2,
    /// Constant acceleration applied to every particle
    pub gravity: Vec2,
    /// Base emission velocity
    pub velocity: Vec2,
    /// Per-axis scale of the random velocity perturbation
    pub velocity_deviation: Vec2,
    /// Lifetime after which a particle is recycled
    pub max_lifetime: f32,
    /// Color of a newly emitted particle
    pub start_color: Vec4,
    /// Color of a particle about to be recycled
    pub end_color: Vec4,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleEmitter {
    /// Create an emitter seeded from system entropy
    pub fn new(count: usize, max_lifetime: f32, position: Vec2, gravity: Vec2) -> Self {
        Self::with_rng(count, max_lifetime, position, gravity, StdRng::from_entropy())
    }

    /// Create an emitter with a fixed seed
    pub fn seeded(count: usize, max_lifetime: f32, position: Vec2, gravity: Vec2, seed: u64) -> Self {
        Self::with_rng(count, max_lifetime, position, gravity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, max_lifetime: f32, position: Vec2, gravity: Vec2, mut rng: StdRng) -> Self {
        let velocity_deviation = Vec2::new(0.1, 0.1);
        let particles = (0..count)
            .map(|_| {
                // Stagger phases so the pool does not recycle in lockstep
                let phase = rng.gen_range(1..=100) as f32 / 100.0;
                let mut particle = Particle::new(position, phase * max_lifetime);
                particle.velocity += velocity_deviation * jitter(&mut rng);
                particle
            })
            .collect();

        Self {
            position,
            gravity,
            velocity: Vec2::zeros(),
            velocity_deviation,
            max_lifetime,
            start_color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            end_color: Vec4::new(0.0, 0.0, 1.0, 0.2),
            particles,
            rng,
        }
    }

    /// The particle pool
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the pool (its size is fixed)
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Advance every particle by `dt`
    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.velocity += self.gravity * dt;
            particle.position += particle.velocity * dt;

            particle.lifetime += dt;
            if particle.lifetime > self.max_lifetime {
                particle.recycle(self.position, self.velocity, self.max_lifetime);
                particle.velocity += self.velocity_deviation * jitter(&mut self.rng);
            }
        }
    }

    /// Render color of a particle, blended by its age
    pub fn particle_color(&self, particle: &Particle) -> Vec4 {
        let t = if self.max_lifetime > 0.0 { particle.lifetime / self.max_lifetime } else { 1.0 };
        lerp_color(self.start_color, self.end_color, t)
    }

    /// Interleaved `[x, y]` positions for a point-list draw
    pub fn point_positions(&self) -> Vec<[f32; 2]> {
        self.particles.iter().map(|p| [p.position.x, p.position.y]).collect()
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Particle field parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
pub struct ParticleOptions {
    /// Number of particles.
    #[schemars(skip)]
    pub count: u32,
    /// World-space particle size (attenuated with distance).
    #[schemars(title = "Size", range(min = 0.005, max = 0.2), extend("step" = 0.005))]
    pub size: f32,
    /// Width and depth of the particle volume.
    #[schemars(skip)]
    pub spread: f32,
    /// RNG seed; `None` scatters differently on every run.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 500,
            size: 0.03,
            spread: 10.0,
            seed: None,
        }
    }
}

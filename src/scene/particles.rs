use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::options::{MotionOptions, ParticleOptions};

/// Scatter particle positions through the volume covering every section.
///
/// X and Z are uniform in `±spread / 2`; Y runs from half a section above
/// the first object down past the last one.
#[must_use]
pub fn generate_particles(
    particles: &ParticleOptions,
    motion: &MotionOptions,
    section_count: usize,
) -> Vec<[f32; 3]> {
    let mut rng = match particles.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let spacing = motion.object_spacing;
    let depth = spacing * section_count as f32;

    (0..particles.count)
        .map(|_| {
            [
                (rng.random::<f32>() - 0.5) * particles.spread,
                spacing * 0.5 - rng.random::<f32>() * depth,
                (rng.random::<f32>() - 0.5) * particles.spread,
            ]
        })
        .collect()
}

/// Whether switching from `old` to `new` changes the scattered field
/// (count, spread, seed, or the section spacing that sets its depth).
#[must_use]
pub fn field_changed(
    old: (&ParticleOptions, &MotionOptions),
    new: (&ParticleOptions, &MotionOptions),
) -> bool {
    let (old_particles, old_motion) = old;
    let (new_particles, new_motion) = new;
    old_particles.count != new_particles.count
        || old_particles.spread != new_particles.spread
        || old_particles.seed != new_particles.seed
        || old_motion.object_spacing != new_motion.object_spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SECTION_COUNT;

    fn seeded(seed: u64) -> ParticleOptions {
        ParticleOptions {
            seed: Some(seed),
            ..ParticleOptions::default()
        }
    }

    #[test]
    fn fills_requested_count_within_bounds() {
        let motion = MotionOptions::default();
        let options = seeded(7);
        let positions = generate_particles(&options, &motion, SECTION_COUNT);
        assert_eq!(positions.len(), 500);

        for [x, y, z] in positions {
            assert!((-5.0..=5.0).contains(&x));
            assert!((-5.0..=5.0).contains(&z));
            // Top: half a section above mesh 0. Bottom: 3 sections below.
            assert!(y <= 2.0);
            assert!(y >= 2.0 - 12.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let motion = MotionOptions::default();
        let a = generate_particles(&seeded(42), &motion, SECTION_COUNT);
        let b = generate_particles(&seeded(42), &motion, SECTION_COUNT);
        let c = generate_particles(&seeded(43), &motion, SECTION_COUNT);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn only_layout_fields_rebuild_the_field() {
        let motion = MotionOptions::default();
        let base = seeded(1);

        let resized = ParticleOptions {
            size: 0.1,
            ..base.clone()
        };
        assert!(!field_changed((&base, &motion), (&resized, &motion)));

        let denser = ParticleOptions {
            count: 800,
            ..base.clone()
        };
        assert!(field_changed((&base, &motion), (&denser, &motion)));

        let spaced = MotionOptions {
            object_spacing: 6.0,
            ..motion.clone()
        };
        assert!(field_changed((&base, &motion), (&base, &spaced)));
    }

    #[test]
    fn zero_count_is_empty() {
        let options = ParticleOptions {
            count: 0,
            ..seeded(1)
        };
        let positions = generate_particles(
            &options,
            &MotionOptions::default(),
            SECTION_COUNT,
        );
        assert!(positions.is_empty());
    }
}

// Simple particle struct to keep track of individual position, velocity, and size

use crate::config::FieldConfig;
use crate::surface::Bounds;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }

    // Uniform position inside the surface, velocity in [-max_speed, max_speed]
    // and radius in [min_radius, max_radius]
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * bounds.width;
        let pos_y = rng.gen::<f64>() * bounds.height;
        let vel_x = uniform(rng, -config.max_speed, config.max_speed);
        let vel_y = uniform(rng, -config.max_speed, config.max_speed);
        let radius = uniform(rng, config.min_radius, config.max_radius);
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius)
    }

    // Moves by one frame of velocity, then flips any component whose new
    // coordinate lies outside the bounds. The position is not clamped, so a
    // particle can sit just past an edge for one frame.
    pub fn step(&mut self, bounds: Bounds) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        if self.pos[0] < 0.0 || self.pos[0] > bounds.width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > bounds.height {
            self.vel[1] *= -1.0;
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(other.pos, self.pos))
    }
}

// gen_range panics on an empty range
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low, high)
    } else {
        low
    }
}

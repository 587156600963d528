// The particle network: a fixed set of drifting nodes, linked by fading
// lines whenever two of them are close.
//
// A `ParticleField` owns only simulation state. The surface it paints on
// is borrowed per call, so whoever schedules frames also owns the canvas.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::{Bounds, Surface};
use rand::Rng;

// What one rendered frame did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub pairs_checked: usize,
    pub links_drawn: usize,
}

pub struct ParticleField {
    bounds: Bounds,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    // Field of default size and look for a `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> ParticleField {
        ParticleField::with_config(width, height, FieldConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: FieldConfig) -> ParticleField {
        let mut rng = rand::thread_rng();
        ParticleField::with_rng(width, height, config, &mut rng)
    }

    pub fn with_rng<R: Rng>(
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: &mut R,
    ) -> ParticleField {
        let bounds = Bounds::new(width, height);
        let mut particles = Vec::with_capacity(config.node_count);
        for _ in 0..config.node_count {
            particles.push(Particle::random(rng, bounds, &config));
        }
        ParticleField {
            bounds,
            particles,
            config,
        }
    }

    // Fixed particles instead of random ones, for tests
    #[cfg(test)]
    pub(crate) fn from_particles(
        width: u32,
        height: u32,
        config: FieldConfig,
        particles: Vec<Particle>,
    ) -> ParticleField {
        ParticleField {
            bounds: Bounds::new(width, height),
            particles,
            config,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    // One animation frame: clear, move, draw nodes, draw links.
    //
    // If clearing fails nothing moves. A failure while drawing leaves the
    // motion applied and the frame partially painted; the caller drops the
    // frame and the next one repaints everything.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<FrameStats, S::Error> {
        surface.clear()?;
        self.step();
        self.render(surface)
    }

    // Advances every particle by one frame, bouncing off the current bounds.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.step(bounds);
        }
    }

    // Draws nodes, then a link for every close pair. Does not clear.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<FrameStats, S::Error> {
        for particle in &self.particles {
            surface.draw_circle(particle.pos, particle.radius, self.config.node_color)?;
        }

        let mut stats = FrameStats::default();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                stats.pairs_checked += 1;
                if let Some(alpha) = link_alpha(a.distance_to(b), &self.config) {
                    surface.draw_line(a.pos, b.pos, self.config.link_color, alpha)?;
                    stats.links_drawn += 1;
                }
            }
        }
        Ok(stats)
    }

    // Resizes the surface and the bounce area together. Particles keep their
    // positions; one left outside a shrunken area flips direction every frame
    // and so jitters in place, never coming back in.
    pub fn on_resize<S: Surface>(&mut self, surface: &mut S, width: u32, height: u32) {
        surface.resize(width, height);
        self.bounds = Bounds::new(width, height);
    }
}

// Stroke alpha (0-255 scale) for two particles `distance` apart, or `None`
// when they are too far apart to link.
pub fn link_alpha(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance < config.link_distance {
        Some(config.max_link_alpha * (1.0 - distance / config.link_distance))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vecmath::Vector2;

    #[derive(Default)]
    struct Recorder {
        size: (u32, u32),
        resizes: usize,
        clears: usize,
        circles: Vec<(Vector2<f64>, f64, Color)>,
        lines: Vec<(Vector2<f64>, Vector2<f64>, f64)>,
        fail_clear: bool,
        fail_after_lines: Option<usize>,
    }

    impl Surface for Recorder {
        type Error = &'static str;

        fn clear(&mut self) -> Result<(), Self::Error> {
            if self.fail_clear {
                return Err("surface disposed");
            }
            self.clears += 1;
            self.circles.clear();
            self.lines.clear();
            Ok(())
        }

        fn draw_circle(
            &mut self,
            center: Vector2<f64>,
            radius: f64,
            fill: Color,
        ) -> Result<(), Self::Error> {
            self.circles.push((center, radius, fill));
            Ok(())
        }

        fn draw_line(
            &mut self,
            from: Vector2<f64>,
            to: Vector2<f64>,
            _stroke: Color,
            alpha: f64,
        ) -> Result<(), Self::Error> {
            if self.fail_after_lines == Some(self.lines.len()) {
                return Err("surface disposed");
            }
            self.lines.push((from, to, alpha));
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.resizes += 1;
            self.size = (width, height);
        }
    }

    fn seeded(width: u32, height: u32, node_count: usize, seed: u64) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = FieldConfig::default().with_node_count(node_count);
        ParticleField::with_rng(width, height, config, &mut rng)
    }

    fn pair(distance: f64) -> ParticleField {
        let particles = vec![
            Particle::new(100.0, 100.0, 0.0, 0.0, 2.0),
            Particle::new(100.0 + distance, 100.0, 0.0, 0.0, 2.0),
        ];
        ParticleField::from_particles(800, 600, FieldConfig::default(), particles)
    }

    #[test]
    fn setup_creates_requested_count_in_range() {
        for &n in &[0usize, 1, 2, 50, 300] {
            let field = seeded(640, 480, n, n as u64);
            assert_eq!(field.particles().len(), n);
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
                assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
                assert!(p.vel[0].abs() <= 0.5 && p.vel[1].abs() <= 0.5);
                assert!(p.radius >= 2.0 && p.radius <= 4.0);
            }
        }
    }

    #[test]
    fn default_field_has_fifty_nodes() {
        let field = ParticleField::new(800, 600);
        assert_eq!(field.particles().len(), 50);
        assert_eq!(field.bounds(), Bounds::new(800, 600));
    }

    #[test]
    fn tick_moves_each_particle_by_its_velocity() {
        let mut field = seeded(800, 600, 50, 1);
        let mut surface = Recorder::default();
        let before = field.particles().to_vec();

        field.tick(&mut surface).unwrap();

        for (old, new) in before.iter().zip(field.particles()) {
            assert!((new.pos[0] - (old.pos[0] + old.vel[0])).abs() < 1e-12);
            assert!((new.pos[1] - (old.pos[1] + old.vel[1])).abs() < 1e-12);
            assert_eq!(new.vel[0].abs(), old.vel[0].abs());
            assert_eq!(new.vel[1].abs(), old.vel[1].abs());
            assert_eq!(new.radius, old.radius);
        }
    }

    #[test]
    fn tick_clears_then_draws_every_node() {
        let mut field = seeded(800, 600, 12, 2);
        let mut surface = Recorder::default();
        field.tick(&mut surface).unwrap();

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 12);
        for ((center, radius, fill), p) in surface.circles.iter().zip(field.particles()) {
            assert_eq!(*center, p.pos);
            assert_eq!(*radius, p.radius);
            assert_eq!(*fill, Color::from_u32(0xffffff64));
        }
    }

    #[test]
    fn every_unordered_pair_checked_once() {
        for &n in &[0usize, 1, 2, 7, 50] {
            let mut field = seeded(800, 600, n, 3);
            let mut surface = Recorder::default();
            let stats = field.tick(&mut surface).unwrap();
            assert_eq!(stats.pairs_checked, n * n.saturating_sub(1) / 2);
            assert_eq!(stats.links_drawn, surface.lines.len());
        }
    }

    #[test]
    fn links_only_close_pairs() {
        let field = seeded(800, 600, 50, 4);
        let mut surface = Recorder::default();
        field.render(&mut surface).unwrap();

        let ps = field.particles();
        let mut expected = 0;
        for i in 0..ps.len() {
            for j in i + 1..ps.len() {
                if ps[i].distance_to(&ps[j]) < 100.0 {
                    expected += 1;
                }
            }
        }
        assert_eq!(surface.lines.len(), expected);
        for (from, to, _) in &surface.lines {
            assert!(vecmath::vec2_len(vecmath::vec2_sub(*to, *from)) < 100.0);
        }
    }

    #[test]
    fn link_threshold() {
        let mut surface = Recorder::default();
        pair(100.0).render(&mut surface).unwrap();
        assert!(surface.lines.is_empty());

        let mut surface = Recorder::default();
        pair(99.999).render(&mut surface).unwrap();
        assert_eq!(surface.lines.len(), 1);
        let alpha = surface.lines[0].2;
        assert!(alpha > 0.0 && alpha < 0.001);

        let mut surface = Recorder::default();
        pair(0.0).render(&mut surface).unwrap();
        assert_eq!(surface.lines[0].2, 50.0);
    }

    #[test]
    fn link_alpha_is_linear() {
        let config = FieldConfig::default();
        assert_eq!(link_alpha(0.0, &config), Some(50.0));
        assert_eq!(link_alpha(50.0, &config), Some(25.0));
        assert_eq!(link_alpha(75.0, &config), Some(12.5));
        assert_eq!(link_alpha(100.0, &config), None);
        assert_eq!(link_alpha(250.0, &config), None);
    }

    #[test]
    fn resize_keeps_particles() {
        let mut field = seeded(800, 600, 50, 5);
        let mut surface = Recorder::default();
        let before = field.particles().to_vec();

        field.on_resize(&mut surface, 400, 300);
        let once = (surface.size, field.bounds(), field.particles().to_vec());
        field.on_resize(&mut surface, 400, 300);

        assert_eq!(surface.size, once.0);
        assert_eq!(field.bounds(), once.1);
        assert_eq!(field.particles(), &once.2[..]);
        assert_eq!(field.particles(), &before[..]);
        assert_eq!(field.bounds(), Bounds::new(400, 300));
    }

    #[test]
    fn particles_stranded_by_shrink_jitter_in_place() {
        let particles = vec![Particle::new(700.0, 100.0, 0.5, 0.0, 2.0)];
        let mut field = ParticleField::from_particles(800, 600, FieldConfig::default(), particles);
        let mut surface = Recorder::default();

        field.on_resize(&mut surface, 400, 300);
        field.step();
        assert_eq!(field.particles()[0].vel[0], -0.5);
        assert_eq!(field.particles()[0].pos[0], 700.5);

        // Stranded outside: flips every frame and stays put
        for _ in 0..10_000 {
            field.step();
            let x = field.particles()[0].pos[0];
            assert!(x == 700.0 || x == 700.5);
        }
        assert_eq!(field.particles()[0].pos[0], 700.5);
    }

    #[test]
    fn failed_clear_leaves_field_untouched() {
        let mut field = seeded(800, 600, 10, 6);
        let mut surface = Recorder {
            fail_clear: true,
            ..Recorder::default()
        };
        let before = field.particles().to_vec();

        assert!(field.tick(&mut surface).is_err());
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn failed_draw_is_reported_and_next_frame_recovers() {
        let particles = vec![
            Particle::new(100.0, 100.0, 0.0, 0.0, 2.0),
            Particle::new(110.0, 100.0, 0.0, 0.0, 2.0),
            Particle::new(120.0, 100.0, 0.0, 0.0, 2.0),
        ];
        let mut field = ParticleField::from_particles(800, 600, FieldConfig::default(), particles);
        let mut surface = Recorder {
            fail_after_lines: Some(1),
            ..Recorder::default()
        };
        assert!(field.tick(&mut surface).is_err());

        surface.fail_after_lines = None;
        let stats = field.tick(&mut surface).unwrap();
        assert_eq!(stats.links_drawn, 3);
        assert_eq!(surface.lines.len(), 3);
    }

    #[test]
    fn long_run_stays_near_bounds() {
        let mut field = seeded(800, 600, 50, 42);
        let mut surface = Recorder::default();
        for _ in 0..1000 {
            field.tick(&mut surface).unwrap();
            for p in field.particles() {
                assert!(p.pos[0] >= -1.0 && p.pos[0] <= 801.0);
                assert!(p.pos[1] >= -1.0 && p.pos[1] <= 601.0);
            }
        }
    }
}

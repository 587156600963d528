// Tunables for the particle network.
//
// `FieldConfig::default()` reproduces the look of the site's hero canvas:
// fifty slow nodes linked when closer than a hundred pixels.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    // Number of particles created at setup; never changes afterwards.
    pub node_count: usize,
    // Upper bound of each velocity component, in pixels per frame.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    // Pairs at or beyond this distance are not linked.
    pub link_distance: f64,
    // Link alpha (0-255 scale) for coincident particles, falling linearly
    // to zero at `link_distance`.
    pub max_link_alpha: f64,
    pub node_color: Color,
    pub link_color: Color,
    pub line_width: f64,
}

impl FieldConfig {
    pub const DEFAULT_NODE_COUNT: usize = 50;
    pub const DEFAULT_LINK_DISTANCE: f64 = 100.0;

    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_radius_range(mut self, min_radius: f64, max_radius: f64) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    pub fn with_link_distance(mut self, link_distance: f64) -> Self {
        self.link_distance = link_distance;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            node_count: FieldConfig::DEFAULT_NODE_COUNT,
            max_speed: 0.5,
            min_radius: 2.0,
            max_radius: 4.0,
            link_distance: FieldConfig::DEFAULT_LINK_DISTANCE,
            max_link_alpha: 50.0,
            node_color: Color::from_u32(0xffffff64),
            link_color: Color::WHITE,
            line_width: 1.0,
        }
    }
}

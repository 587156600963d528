// Simple color struct, created from an unsigned 32 representing RRGGBBAA
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 0xff,
        g: 0xff,
        b: 0xff,
        a: 0xff,
    };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = (num >> 0) as u8;

        Color { r, g, b, a }
    }

    // CSS color string for the canvas fill and stroke styles
    pub fn to_css(&self) -> String {
        self.to_css_with_alpha(self.a as f64)
    }

    // Same color with a fractional alpha on the 0-255 scale, for link strokes
    // whose opacity falls off continuously with distance
    pub fn to_css_with_alpha(&self, alpha: f64) -> String {
        let alpha = (alpha / 255.0).max(0.0).min(1.0);
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

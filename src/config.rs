use eframe::egui::{Color32, Vec2, vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceConfig {
    pub x_strength: f32,
    pub y_strength: f32,
    pub charge_strength: f32,
    pub collide_padding: f32,
    pub collide_strength: f32,
    pub theta: f32,
    pub distance_min: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            x_strength: 1.0,
            y_strength: 1.0,
            charge_strength: -2250.0,
            collide_padding: 40.0,
            collide_strength: 1.0,
            theta: 0.9,
            distance_min: 1.0,
            alpha_min,
            // Reaches alpha_min after ~300 ticks.
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
        }
    }
}

/// Chart-wide constants, built once at startup and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub outer_width: f32,
    pub outer_height: f32,
    pub margin: Margin,
    pub color_domain: [f64; 2],
    pub color_range: [Color32; 2],
    pub radius_domain: [f64; 2],
    pub radius_range: [f32; 2],
    /// Distance kept clear at the left and right edges of the year axis.
    pub x_inset: [f32; 2],
    pub baseline_y: f32,
    pub default_year: i32,
    pub forces: ForceConfig,
    pub stroke_width: f32,
    pub hover_stroke_width: f32,
    pub stroke_color: Color32,
    pub muted_fill: Color32,
    pub tooltip_offset: Vec2,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            outer_width: 600.0,
            outer_height: 425.0,
            margin: Margin {
                top: 30.0,
                right: 50.0,
                bottom: 50.0,
                left: 50.0,
            },
            color_domain: [246_575.0, 731_707.0],
            color_range: [Color32::from_rgb(0x00, 0xA3, 0x00), Color32::from_rgb(0xFF, 0xFF, 0x00)],
            radius_domain: [0.0, 1_000_000_000.0],
            radius_range: [0.0, 100.0],
            x_inset: [140.0, 110.0],
            baseline_y: 200.0,
            default_year: 2021,
            forces: ForceConfig::default(),
            stroke_width: 2.0,
            hover_stroke_width: 3.0,
            stroke_color: Color32::BLACK,
            muted_fill: Color32::from_rgb(0xBD, 0xBD, 0xBD),
            tooltip_offset: vec2(10.0, -10.0),
        }
    }
}

impl ChartConfig {
    pub fn inner_width(&self) -> f32 {
        self.outer_width - self.margin.left - self.margin.right
    }

    pub fn x_range(&self) -> [f32; 2] {
        [self.x_inset[0], self.inner_width() - self.x_inset[1]]
    }

    pub fn inner_origin(&self) -> Vec2 {
        vec2(self.margin.left, self.margin.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_convention_gives_inner_extent() {
        let config = ChartConfig::default();
        assert_eq!(config.inner_width(), 500.0);
        assert_eq!(config.x_range(), [140.0, 390.0]);
    }

    #[test]
    fn alpha_decay_cools_to_minimum_in_about_three_hundred_ticks() {
        let forces = ForceConfig::default();
        let mut alpha = 1.0_f32;
        let mut ticks = 0;
        while alpha >= forces.alpha_min {
            alpha += (0.0 - alpha) * forces.alpha_decay;
            ticks += 1;
        }
        assert!((295..=305).contains(&ticks), "ticks = {ticks}");
    }
}

use eframe::egui::Color32;

use crate::config::ChartConfig;

/// Linear RGB interpolation between two colors, clamped to the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    domain: [f64; 2],
    range: [Color32; 2],
}

impl ColorScale {
    pub fn new(domain: [f64; 2], range: [Color32; 2]) -> Self {
        Self { domain, range }
    }

    pub fn color(&self, value: f64) -> Color32 {
        let [d0, d1] = self.domain;
        let t = if (d1 - d0).abs() < f64::EPSILON || value.is_nan() {
            0.5
        } else {
            ((value - d0) / (d1 - d0)).clamp(0.0, 1.0)
        };

        let [low, high] = self.range;
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color32::from_rgb(
            mix(low.r(), high.r()),
            mix(low.g(), high.g()),
            mix(low.b(), high.b()),
        )
    }
}

/// Square-root scale: area of the resulting circle is proportional to the input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
    domain: [f64; 2],
    range: [f32; 2],
}

impl RadiusScale {
    pub fn new(domain: [f64; 2], range: [f32; 2]) -> Self {
        Self { domain, range }
    }

    pub fn radius(&self, amount: f64) -> f32 {
        let [d0, d1] = self.domain.map(|bound| bound.max(0.0).sqrt());
        let [r0, r1] = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return r0.max(0.0);
        }

        let t = (amount.max(0.0).sqrt() - d0) / (d1 - d0);
        (r0 as f64 + (r1 - r0) as f64 * t).max(0.0) as f32
    }
}

/// Discrete years spread evenly across a pixel range, centered when there is
/// only one year.
#[derive(Clone, Debug, PartialEq)]
pub struct PointScale {
    domain: Vec<i32>,
    range: [f32; 2],
}

impl PointScale {
    pub fn new(domain: Vec<i32>, range: [f32; 2]) -> Self {
        Self { domain, range }
    }

    pub fn step(&self) -> f32 {
        let gaps = self.domain.len().saturating_sub(1).max(1) as f32;
        (self.range[1] - self.range[0]) / gaps
    }

    pub fn position(&self, year: i32) -> Option<f32> {
        let index = self.domain.iter().position(|&value| value == year)?;
        let [start, stop] = self.range;
        let step = self.step();
        let span = step * self.domain.len().saturating_sub(1) as f32;
        let offset = (stop - start - span) * 0.5;
        Some(start + offset + step * index as f32)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scales {
    pub color: ColorScale,
    pub radius: RadiusScale,
    pub x: PointScale,
}

impl Scales {
    pub fn new(config: &ChartConfig, years: Vec<i32>) -> Self {
        Self {
            color: ColorScale::new(config.color_domain, config.color_range),
            radius: RadiusScale::new(config.radius_domain, config.radius_range),
            x: PointScale::new(years, config.x_range()),
        }
    }
}

use std::f32::consts::TAU;

use super::HeadcountSplit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const NAVY: RgbColor = RgbColor::new(0, 0, 128);
pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);
pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
pub const CHOCOLATE: RgbColor = RgbColor::new(210, 105, 30);
pub const ROYAL_BLUE: RgbColor = RgbColor::new(65, 105, 225);

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub color: RgbColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// Angular extent of one drawn slice, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub slice: usize,
    pub start: f32,
    pub sweep: f32,
}

impl Wedge {
    pub fn mid_angle(&self) -> f32 {
        self.start + self.sweep / 2.0
    }
}

impl PieChart {
    /// Admin vs non-admin split of the whole workforce.
    pub fn headcount(split: HeadcountSplit) -> Self {
        Self {
            title: format!("{} employees", split.total()),
            slices: vec![
                PieSlice {
                    label: "HR Administrator".to_string(),
                    value: split.admins,
                    color: CHOCOLATE,
                },
                PieSlice {
                    label: "Employee".to_string(),
                    value: split.employees,
                    color: ROYAL_BLUE,
                },
            ],
        }
    }

    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Wedges for the non-empty slices, counter-clockwise from angle zero.
    pub fn wedges(&self) -> Vec<Wedge> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut start = 0.0;
        self.slices
            .iter()
            .enumerate()
            .filter(|(_, s)| s.value > 0)
            .map(|(slice, s)| {
                let sweep = TAU * s.value as f32 / total as f32;
                let wedge = Wedge {
                    slice,
                    start,
                    sweep,
                };
                start += sweep;
                wedge
            })
            .collect()
    }
}

/// Outline of a wedge: the centre followed by points along the arc.
pub fn wedge_outline(cx: f32, cy: f32, radius: f32, wedge: &Wedge) -> Vec<(f32, f32)> {
    let steps = ((wedge.sweep / TAU) * 96.0).ceil().max(2.0) as usize;

    let mut points = Vec::with_capacity(steps + 2);
    points.push((cx, cy));
    for i in 0..=steps {
        let angle = wedge.start + wedge.sweep * i as f32 / steps as f32;
        points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
    }
    points
}

//! Vinyl groove background generator.
//!
//! A groove image is a set of concentric rings on a 100x100 canvas. Each ring
//! is a circle stroke broken by a few random gaps, rotated and faded so inner
//! rings read darker than outer ones.

use std::f64::consts::PI;
use std::fmt::Write;

use vinylcards_spec::{AngleMode, GrooveConfig, MAX_GAP_COUNT, MAX_RING_COUNT};

use crate::color::neon_hsl;
use crate::rng::RandomSource;
use crate::svg::{escape, num, num_list};

/// Canvas edge length.
pub const CANVAS: f64 = 100.0;
/// Radius of the outermost ring.
pub const OUTER_RADIUS: f64 = 48.0;
/// Rings below this radius are not drawn.
pub const MIN_RADIUS: f64 = 5.0;

/// One gap cut into a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrooveGap {
    /// Start angle in degrees, `[0, 360)`.
    pub angle: f64,
    /// Arc length in canvas units.
    pub arc: f64,
}

/// One rendered ring.
#[derive(Debug, Clone, PartialEq)]
pub struct GrooveRing {
    pub radius: f64,
    /// Gaps drawn for this ring, in draw order.
    pub gaps: Vec<GrooveGap>,
    /// Alternating dash and gap lengths, starting with a dash.
    pub dash_array: Vec<f64>,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Rotation in degrees about the canvas center.
    pub rotation: f64,
    pub color: String,
    /// Drop-shadow blur in px for neon rings.
    pub glow_blur: Option<f64>,
}

impl GrooveRing {
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }
}

/// A complete groove background.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrooveImage {
    pub rings: Vec<GrooveRing>,
}

impl GrooveImage {
    /// Standalone SVG markup with a `0 0 100 100` view box.
    pub fn to_svg(&self) -> String {
        let mut svg = String::from(r#"<svg viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg">"#);
        self.write_rings(&mut svg);
        svg.push_str("</svg>");
        svg
    }

    /// Ring elements only, for embedding inside another SVG.
    pub(crate) fn write_rings(&self, out: &mut String) {
        for ring in &self.rings {
            let color = escape(&ring.color);
            let _ = write!(
                out,
                r#"<circle cx="50" cy="50" r="{}" fill="none" stroke="{}" stroke-width="{}" stroke-dasharray="{}" opacity="{}" transform="rotate({} 50 50)""#,
                num(ring.radius),
                color,
                num(ring.stroke_width),
                num_list(&ring.dash_array),
                num(ring.opacity),
                num(ring.rotation),
            );
            if let Some(blur) = ring.glow_blur {
                let _ = write!(
                    out,
                    r#" style="filter: drop-shadow(0 0 {}px {});""#,
                    num(blur),
                    color
                );
            }
            out.push_str("/>");
        }
    }
}

/// Generates a groove image, drawing all randomness from `rng`.
pub fn generate_groove_image(config: &GrooveConfig, rng: &mut dyn RandomSource) -> GrooveImage {
    let ring_count = config.ring_count.clamp(1, MAX_RING_COUNT);
    let mut rings = Vec::with_capacity(ring_count.min(max_fitting_rings(config.spacing)) as usize);
    let mut cumulative_rotation = 0.0;

    for i in 0..ring_count {
        let radius = OUTER_RADIUS - i as f64 * config.spacing;
        if radius < MIN_RADIUS {
            break;
        }

        let rotation = match config.angle_mode {
            AngleMode::Degree => {
                cumulative_rotation += config.angle_offset;
                cumulative_rotation
            }
            AngleMode::Random => rng.next_f64() * 360.0,
        };

        let circumference = 2.0 * PI * radius;
        let gap_count = draw_gap_count(config, rng);
        let gaps: Vec<GrooveGap> = (0..gap_count)
            .map(|_| {
                let angle = rng.next_f64() * 360.0;
                let width = rng.next_f64() * (config.gap_width_max - config.gap_width_min)
                    + config.gap_width_min;
                GrooveGap {
                    angle,
                    arc: width / 100.0 * circumference,
                }
            })
            .collect();
        let dash_array = dash_pattern(circumference, &gaps);

        let stroke_width = if config.variate {
            config.thickness * (0.6 + rng.next_f64() * 0.8)
        } else {
            config.thickness
        };
        let opacity =
            (config.opacity_percent / 100.0) * (0.12 + i as f64 * (0.8 / ring_count as f64));

        let (color, glow_blur) = if config.neon {
            (neon_hsl(rng.next_f64() * 360.0), Some(config.neon_blur))
        } else {
            (config.color.clone(), None)
        };

        rings.push(GrooveRing {
            radius,
            gaps,
            dash_array,
            stroke_width,
            opacity,
            rotation,
            color,
            glow_blur,
        });
    }

    GrooveImage { rings }
}

/// Rings with a radius of at least [`MIN_RADIUS`] at `spacing`.
fn max_fitting_rings(spacing: f64) -> u32 {
    if spacing.is_nan() || spacing <= 0.0 {
        return 1;
    }
    ((OUTER_RADIUS - MIN_RADIUS) / spacing)
        .floor()
        .min(MAX_RING_COUNT as f64) as u32
        + 1
}

/// Draws a gap count in `gap_count_min..=gap_count_max`.
fn draw_gap_count(config: &GrooveConfig, rng: &mut dyn RandomSource) -> u32 {
    let min = config.gap_count_min.min(config.gap_count_max).min(MAX_GAP_COUNT);
    let max = config.gap_count_min.max(config.gap_count_max).min(MAX_GAP_COUNT);
    let span = (max - min) as f64 + 1.0;
    let count = (rng.next_f64() * span).floor() as u32 + min;
    count.min(max)
}

/// Builds the dash array for a ring of `circumference` cut by `gaps`.
///
/// Gaps are walked in angle order. A gap starting inside the previous gap is
/// dropped. The leftover arc after the last gap joins the first dash, so the
/// pattern tiles the ring exactly once. When the last gap runs past the seam,
/// the part beyond the seam is cut from the start of the ring instead.
///
/// The result always sums to `circumference`.
pub fn dash_pattern(circumference: f64, gaps: &[GrooveGap]) -> Vec<f64> {
    if gaps.is_empty() {
        return vec![circumference];
    }

    let mut sorted = gaps.to_vec();
    sorted.sort_by(|a, b| a.angle.total_cmp(&b.angle));

    let mut last = 0.0;
    let mut segments = Vec::with_capacity(sorted.len() * 2);
    for gap in &sorted {
        let start = gap.angle / 360.0 * circumference;
        let draw = start - last;
        if draw > 0.0 {
            segments.push(draw);
            segments.push(gap.arc);
            last = start + gap.arc;
        }
    }

    if segments.is_empty() {
        return vec![circumference];
    }

    let remainder = circumference - last;
    if remainder >= 0.0 {
        segments[0] += remainder;
        return segments;
    }

    wrap_seam_overflow(circumference, &segments, -remainder)
}

/// Re-derives a dash array whose final gap wraps `overflow` units past the
/// seam onto the start of the ring.
fn wrap_seam_overflow(circumference: f64, segments: &[f64], overflow: f64) -> Vec<f64> {
    let mut drawn = Vec::with_capacity(segments.len() / 2);
    let mut pos = 0.0_f64;
    for pair in segments.chunks(2) {
        let start = pos.max(overflow);
        let end = (pos + pair[0]).min(circumference);
        if end > start {
            drawn.push((start, end));
        }
        pos += pair.iter().sum::<f64>();
    }

    let mut pattern = Vec::with_capacity(drawn.len() * 2 + 2);
    let mut cursor = 0.0;
    for (start, end) in drawn {
        if pattern.is_empty() {
            if start > 0.0 {
                pattern.push(0.0);
                pattern.push(start);
            }
        } else {
            pattern.push(start - cursor);
        }
        pattern.push(end - start);
        cursor = end;
    }

    if pattern.is_empty() {
        return vec![0.0, circumference];
    }
    pattern.push(circumference - cursor);
    pattern
}

//! Structural invariants of generated groove images.
//!
//! These sweep seeds and configurations and check properties that hold for
//! every draw, not exact geometry.

use std::f64::consts::PI;

use vinylcards_render::groove::{dash_pattern, generate_groove_image, GrooveGap};
use vinylcards_render::rng::{DeterministicRng, RandomSource};
use vinylcards_spec::{AngleMode, GrooveConfig};

fn configs() -> Vec<GrooveConfig> {
    vec![
        GrooveConfig::default(),
        GrooveConfig::default().with_gap_counts(3, 8).with_gap_widths(5.0, 40.0),
        GrooveConfig::default().with_gap_counts(1, 1).with_gap_widths(60.0, 90.0),
        GrooveConfig::default()
            .with_spacing(1.0)
            .with_ring_count(40)
            .with_thickness(0.3, true)
            .with_neon(4.0),
        GrooveConfig::default().with_angle(AngleMode::Degree, 7.5),
    ]
}

// ============================================================================
// Dash arrays
// ============================================================================

/// Every ring's dash array sums to its circumference.
#[test]
fn test_dash_sum_equals_circumference() {
    for config in configs() {
        for seed in 0..50 {
            let image = generate_groove_image(&config, &mut DeterministicRng::new(seed));
            for ring in &image.rings {
                let sum: f64 = ring.dash_array.iter().sum();
                let circ = ring.circumference();
                assert!(
                    (sum - circ).abs() < 1e-9 * circ.max(1.0),
                    "seed {} radius {}: sum {} != circumference {}",
                    seed,
                    ring.radius,
                    sum,
                    circ
                );
                assert!(ring.dash_array.iter().all(|d| *d >= 0.0));
            }
        }
    }
}

/// Random gap sets fed straight to the pattern builder keep the sum.
#[test]
fn test_dash_pattern_random_gaps() {
    let mut rng = DeterministicRng::new(2024);
    for _ in 0..2000 {
        let circ = 10.0 + rng.next_f64() * 300.0;
        let count = (rng.next_f64() * 6.0) as usize;
        let gaps: Vec<GrooveGap> = (0..count)
            .map(|_| GrooveGap {
                angle: rng.next_f64() * 360.0,
                arc: rng.next_f64() * circ,
            })
            .collect();
        let pattern = dash_pattern(circ, &gaps);
        let sum: f64 = pattern.iter().sum();
        assert!((sum - circ).abs() < 1e-9 * circ, "{:?} sums to {}", pattern, sum);
        assert!(pattern.len() == 1 || pattern.len() % 2 == 0);
    }
}

/// Gap count 0 yields exactly one full-circumference segment.
#[test]
fn test_zero_gaps_single_segment() {
    let config = GrooveConfig::default().with_gap_counts(0, 0);
    for seed in 0..10 {
        let image = generate_groove_image(&config, &mut DeterministicRng::new(seed));
        for ring in &image.rings {
            assert_eq!(ring.dash_array.len(), 1);
            assert!((ring.dash_array[0] - 2.0 * PI * ring.radius).abs() < 1e-12);
        }
    }
}

/// Every ring draws between `gap_count_min` and `gap_count_max` gaps, and
/// the pattern never holds more than two entries per gap.
#[test]
fn test_gap_count_bounds() {
    for (min, max) in [(2, 4), (3, 3), (0, 5), (0, 0), (1, 1)] {
        let config = GrooveConfig::default().with_gap_counts(min, max);
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..200 {
            let image = generate_groove_image(&config, &mut DeterministicRng::new(seed));
            for ring in &image.rings {
                let count = ring.gaps.len() as u32;
                assert!(
                    (min..=max).contains(&count),
                    "seed {}: {} gaps outside {}..={}",
                    seed,
                    count,
                    min,
                    max
                );
                assert!(ring.dash_array.len() <= 2 * max as usize + 2);
                seen.insert(count);
            }
        }
        // Over this many rings every count in the range shows up.
        assert_eq!(seen, (min..=max).collect::<std::collections::BTreeSet<u32>>());
    }
}

/// Inverted bounds set through the builder are normalized.
#[test]
fn test_gap_count_bounds_inverted() {
    let config = GrooveConfig::default().with_gap_counts(4, 1);
    for seed in 0..50 {
        let image = generate_groove_image(&config, &mut DeterministicRng::new(seed));
        assert!(image.rings.iter().all(|r| (1..=4).contains(&r.gaps.len())));
    }
}

// ============================================================================
// Rings
// ============================================================================

/// Ring radii step inward by the spacing and stay above the minimum.
#[test]
fn test_ring_radii() {
    for config in configs() {
        let image = generate_groove_image(&config, &mut DeterministicRng::new(1));
        assert!(!image.rings.is_empty());
        assert!(image.rings.len() <= config.ring_count as usize);
        for (i, ring) in image.rings.iter().enumerate() {
            assert!((ring.radius - (48.0 - i as f64 * config.spacing)).abs() < 1e-12);
            assert!(ring.radius >= 5.0);
        }
    }
}

/// Opacity ramps up from the outer ring.
#[test]
fn test_opacity_increases_inward() {
    let image = generate_groove_image(&GrooveConfig::default(), &mut DeterministicRng::new(3));
    assert!(image.rings.windows(2).all(|w| w[0].opacity < w[1].opacity));
    assert!((image.rings[0].opacity - 0.12).abs() < 1e-12);
}

/// SVG markup carries one circle per ring.
#[test]
fn test_svg_circle_count() {
    let image = generate_groove_image(&GrooveConfig::default(), &mut DeterministicRng::new(8));
    let svg = image.to_svg();
    assert!(svg.starts_with("<svg viewBox=\"0 0 100 100\""));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<circle ").count(), image.rings.len());
}

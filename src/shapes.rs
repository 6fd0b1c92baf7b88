//! Target shapes of the field.
//!
//! Each shape maps a particle index (and the total count) to a point in
//! shape-local space: origin at the shape center, before scene rotation,
//! pulse and centering. A shape also fixes one color shared by every
//! particle for the whole phase.
//!
//! | Shape | Geometry | Color |
//! |-------|----------|-------|
//! | [`ShapeKind::Globe`] | Fibonacci sphere, every 20th point on an outer shell | `#00f3ff` |
//! | [`ShapeKind::Blockchain`] | thick (2,3) torus knot | `#fcee0a` |
//! | [`ShapeKind::Ecg`] | heart curve + scrolling pulse line | `#ff003c` |
//! | [`ShapeKind::Brain`] | two-lobed volumetric cloud | `#bc13fe` |
//! | [`ShapeKind::Chip`] | layered grid snapped to circuit traces | `#0aff0a` |
//! | [`ShapeKind::Stream`] | globe geometry | `#ffffff` |

use crate::color::Rgb;
use crate::particle::Particle;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Radius of the globe surface.
pub const GLOBE_RADIUS: f32 = 160.0;
/// Radius of the satellite shell around the globe.
pub const SATELLITE_RADIUS: f32 = 190.0;
/// Every n-th globe point is a satellite.
pub const SATELLITE_EVERY: usize = 20;

/// Major radius of the torus the knot winds around.
pub const KNOT_MAJOR_RADIUS: f32 = 120.0;
/// Minor radius of the torus the knot winds around.
pub const KNOT_MINOR_RADIUS: f32 = 40.0;
/// Maximum distance of a chain point from the knot core.
pub const KNOT_TUBE_RADIUS: f32 = 25.0;
/// Number of parameter loops spread over the particle range.
pub const KNOT_LOOPS: f32 = 10.0;

/// Scale applied to the unit heart curve.
pub const HEART_SCALE: f32 = 10.0;
/// Depth thickness of the heart shell.
pub const HEART_THICKNESS: f32 = 60.0;
/// Share of ECG particles on the heart; the rest form the pulse line.
pub const HEART_SHARE: f32 = 0.8;
/// Length of the pulse line, which is also its scroll period.
pub const TRACE_LENGTH: f32 = 400.0;
/// Depth of the pulse line, in front of the heart.
pub const TRACE_DEPTH: f32 = 200.0;
/// Horizontal scroll speed of the pulse line, pixels per frame.
pub const TRACE_SPEED: f32 = 5.0;

/// Radius of the brain cloud.
pub const BRAIN_RADIUS: f32 = 150.0;
/// Offset pushing each lobe away from the midplane.
pub const BRAIN_LOBE_GAP: f32 = 10.0;
/// Downward shift of the whole cloud.
pub const BRAIN_DROP: f32 = 20.0;

/// Side of the chip footprint.
pub const CHIP_SIZE: f32 = 300.0;
/// Number of discrete chip layers.
pub const CHIP_LAYERS: usize = 5;
/// Distance between chip layers.
pub const CHIP_LAYER_GAP: f32 = 20.0;
/// Pitch of the circuit trace grid.
pub const CHIP_GRID: f32 = 20.0;
/// Chance that a chip point snaps its x (otherwise y) to the trace grid.
pub const CHIP_X_SNAP_CHANCE: f32 = 0.6;

/// The shapes a field can morph into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Hollow sphere with orbiting satellites.
    Globe,
    /// Interlinked chain along a torus knot.
    Blockchain,
    /// Heart with a scrolling heartbeat trace.
    Ecg,
    /// Volumetric cloud of nodes split into two lobes.
    Brain,
    /// Flat layered grid with circuit traces.
    Chip,
    /// White variant reusing the globe geometry.
    Stream,
}

impl ShapeKind {
    /// Every shape, in declaration order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Globe,
        ShapeKind::Blockchain,
        ShapeKind::Ecg,
        ShapeKind::Brain,
        ShapeKind::Chip,
        ShapeKind::Stream,
    ];

    /// The shapes with their own geometry; the default cycle.
    pub const GEOMETRIC: [ShapeKind; 5] = [
        ShapeKind::Globe,
        ShapeKind::Blockchain,
        ShapeKind::Ecg,
        ShapeKind::Brain,
        ShapeKind::Chip,
    ];

    /// Color shared by all particles while this shape is active.
    pub const fn color(self) -> Rgb {
        match self {
            ShapeKind::Globe => Rgb::from_hex(0x00f3ff),
            ShapeKind::Blockchain => Rgb::from_hex(0xfcee0a),
            ShapeKind::Ecg => Rgb::from_hex(0xff003c),
            ShapeKind::Brain => Rgb::from_hex(0xbc13fe),
            ShapeKind::Chip => Rgb::from_hex(0x0aff0a),
            ShapeKind::Stream => Rgb::from_hex(0xffffff),
        }
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Globe => "globe",
            ShapeKind::Blockchain => "blockchain",
            ShapeKind::Ecg => "ecg",
            ShapeKind::Brain => "brain",
            ShapeKind::Chip => "chip",
            ShapeKind::Stream => "stream",
        }
    }

    /// Whether particle `index` of `count` belongs to the scrolling pulse line.
    #[inline]
    pub fn is_trace_particle(self, index: usize, count: usize) -> bool {
        self == ShapeKind::Ecg && index >= trace_start(count)
    }

    /// Shape-local target of particle `index` out of `count`.
    pub fn target<R: Rng + ?Sized>(self, index: usize, count: usize, rng: &mut R) -> Vec3 {
        match self {
            ShapeKind::Globe | ShapeKind::Stream => globe_point(index, count),
            ShapeKind::Blockchain => {
                let core = torus_knot_point(index, count);
                let angle = rng.gen::<f32>() * TAU;
                let radius = rng.gen::<f32>() * KNOT_TUBE_RADIUS;
                core + Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
            }
            ShapeKind::Ecg => {
                if index < trace_start(count) {
                    let t = rng.gen::<f32>() * TAU;
                    let depth = (rng.gen::<f32>() - 0.5) * HEART_THICKNESS;
                    heart_point(t, HEART_SCALE).extend(depth)
                } else {
                    trace_point(index, count)
                }
            }
            ShapeKind::Brain => brain_point(rng),
            ShapeKind::Chip => chip_point(index, rng),
        }
    }

    /// Retarget every particle onto this shape and its color.
    pub fn assign<R: Rng + ?Sized>(self, particles: &mut [Particle], rng: &mut R) {
        let count = particles.len();
        let color = self.color();
        for (i, p) in particles.iter_mut().enumerate() {
            p.target = self.target(i, count, rng);
            p.target_color = color;
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Point `index` of a Fibonacci sphere of `count` points.
///
/// `phi = acos(2u - 1)` with `u` stepping evenly through `(0, 1)`, and
/// `theta = sqrt(count * π) * phi` winding the points into a spiral.
pub fn globe_point(index: usize, count: usize) -> Vec3 {
    let n = count.max(1) as f32;
    let u = (index as f32 + 0.5) / n;
    let phi = (2.0 * u - 1.0).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    let r = if index % SATELLITE_EVERY == 0 {
        SATELLITE_RADIUS
    } else {
        GLOBE_RADIUS
    };
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Core of the (2,3) torus knot at particle `index` of `count`.
pub fn torus_knot_point(index: usize, count: usize) -> Vec3 {
    let t = index as f32 / count.max(1) as f32 * TAU * KNOT_LOOPS;
    let ring = KNOT_MAJOR_RADIUS + KNOT_MINOR_RADIUS * (3.0 * t).cos();
    Vec3::new(
        ring * (2.0 * t).cos(),
        ring * (2.0 * t).sin(),
        KNOT_MINOR_RADIUS * (3.0 * t).sin(),
    )
}

/// Heart curve at parameter `t`, y pointing down the screen.
///
/// `x = 16 sin³t`, `y = -(13 cos t - 5 cos 2t - 2 cos 3t - cos 4t)`, both scaled.
pub fn heart_point(t: f32, scale: f32) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(scale * x, -scale * y)
}

/// First particle index of the ECG pulse line.
pub fn trace_start(count: usize) -> usize {
    (count as f32 * HEART_SHARE).ceil() as usize
}

/// Resting point of a pulse-line particle: spread evenly along x.
fn trace_point(index: usize, count: usize) -> Vec3 {
    let line_count = count as f32 * (1.0 - HEART_SHARE);
    let along = (index as f32 - count as f32 * HEART_SHARE) / line_count;
    Vec3::new((along - 0.5) * TRACE_LENGTH, 0.0, TRACE_DEPTH)
}

/// Scroll a pulse-line point and add the heartbeat spike.
///
/// `x` wraps over `[-200, 200)` as `frame` advances; near the origin the
/// trace dips sharply (y up the screen) and recovers with a smaller bump.
pub fn ecg_trace(x: f32, y: f32, frame: u32) -> (f32, f32) {
    let half = TRACE_LENGTH / 2.0;
    let x = (x + half + frame as f32 * TRACE_SPEED).rem_euclid(TRACE_LENGTH) - half;
    let mut y = y;
    if x.abs() < 20.0 {
        y -= 80.0 * (1.0 - x.abs() / 20.0);
    } else if (20.0..40.0).contains(&x) {
        // Recovery bump follows the spike only, never precedes it.
        y += 30.0 * (1.0 - (x - 30.0).abs() / 10.0);
    }
    (x, y)
}

fn brain_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let phi = rng.gen::<f32>() * PI;
    let theta = rng.gen::<f32>() * TAU;
    // Cube root for uniform volume density
    let r = BRAIN_RADIUS * rng.gen::<f32>().cbrt();

    let mut x = r * phi.sin() * theta.cos();
    let y = r * phi.sin() * theta.sin() - BRAIN_DROP;
    let z = r * phi.cos();

    if x > 0.0 {
        x += BRAIN_LOBE_GAP;
    } else {
        x -= BRAIN_LOBE_GAP;
    }
    Vec3::new(x, y, z)
}

fn chip_point<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Vec3 {
    let mut x = (rng.gen::<f32>() - 0.5) * CHIP_SIZE;
    let mut y = (rng.gen::<f32>() - 0.5) * CHIP_SIZE;
    let layer = (index % CHIP_LAYERS) as f32;
    let z = (layer - (CHIP_LAYERS / 2) as f32) * CHIP_LAYER_GAP;

    if rng.gen::<f32>() < CHIP_X_SNAP_CHANCE {
        x = (x / CHIP_GRID).round() * CHIP_GRID;
    } else {
        y = (y / CHIP_GRID).round() * CHIP_GRID;
    }
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_globe_radii() {
        for i in 0..200 {
            let r = globe_point(i, 200).length();
            let expected = if i % 20 == 0 { SATELLITE_RADIUS } else { GLOBE_RADIUS };
            assert!((r - expected).abs() < 1e-2, "index {} radius {}", i, r);
        }
    }

    #[test]
    fn test_globe_single_point() {
        let p = globe_point(0, 1);
        assert!((p.length() - SATELLITE_RADIUS).abs() < 1e-2);
    }

    #[test]
    fn test_knot_stays_on_torus() {
        for i in 0..100 {
            let p = torus_knot_point(i, 100);
            let ring = (p.x * p.x + p.y * p.y).sqrt();
            let tube = ((ring - KNOT_MAJOR_RADIUS).powi(2) + p.z * p.z).sqrt();
            assert!((tube - KNOT_MINOR_RADIUS).abs() < 1e-2);
        }
    }

    #[test]
    fn test_heart_extremes() {
        let top = heart_point(0.0, 1.0);
        assert!(top.x.abs() < 1e-5);
        assert!((top.y + 5.0).abs() < 1e-4);

        let bottom = heart_point(PI, 1.0);
        assert!(bottom.x.abs() < 1e-4);
        assert!((bottom.y - 17.0).abs() < 1e-4);
    }

    #[test]
    fn test_trace_partition() {
        assert_eq!(trace_start(1800), 1440);
        assert_eq!(trace_start(4), 4);
        assert!(ShapeKind::Ecg.is_trace_particle(1440, 1800));
        assert!(!ShapeKind::Ecg.is_trace_particle(1439, 1800));
        assert!(!ShapeKind::Globe.is_trace_particle(1799, 1800));
    }

    #[test]
    fn test_ecg_trace_wraps() {
        let (x, _) = ecg_trace(199.0, 0.0, 1);
        assert!((x - (-196.0)).abs() < 1e-3);
        let (x, _) = ecg_trace(-250.0, 0.0, 0);
        assert!((-200.0..200.0).contains(&x));
    }

    #[test]
    fn test_ecg_spike() {
        let (_, y) = ecg_trace(0.0, 0.0, 0);
        assert!((y + 80.0).abs() < 1e-4);
        let (_, y) = ecg_trace(30.0, 0.0, 0);
        assert!((y - 30.0).abs() < 1e-4);
        let (_, y) = ecg_trace(-100.0, 0.0, 0);
        assert_eq!(y, 0.0);
        // No bump before the spike.
        let (_, y) = ecg_trace(-30.0, 0.0, 0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_chip_layers_and_grid() {
        let mut rng = SmallRng::seed_from_u64(7);
        for i in 0..500 {
            let p = ShapeKind::Chip.target(i, 500, &mut rng);
            assert!([-40.0, -20.0, 0.0, 20.0, 40.0].contains(&p.z));
            let snapped_x = (p.x / CHIP_GRID).fract().abs() < 1e-4;
            let snapped_y = (p.y / CHIP_GRID).fract().abs() < 1e-4;
            assert!(snapped_x || snapped_y);
        }
    }

    #[test]
    fn test_brain_lobes_clear_midplane() {
        let mut rng = SmallRng::seed_from_u64(3);
        for i in 0..500 {
            let p = ShapeKind::Brain.target(i, 500, &mut rng);
            assert!(p.x.abs() >= BRAIN_LOBE_GAP);
            let centered = Vec3::new(p.x.abs() - BRAIN_LOBE_GAP, p.y + BRAIN_DROP, p.z);
            assert!(centered.length() <= BRAIN_RADIUS + 1e-2);
        }
    }

    #[test]
    fn test_assign_sets_shared_color() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut particles = vec![Particle::new(Vec3::ZERO, Rgb::BLACK, 1.0, 0.0); 10];
        ShapeKind::Brain.assign(&mut particles, &mut rng);
        assert!(particles.iter().all(|p| p.target_color == ShapeKind::Brain.color()));
    }

    #[test]
    fn test_colors_distinct() {
        for (i, a) in ShapeKind::ALL.iter().enumerate() {
            for b in &ShapeKind::ALL[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }
}

//! Mounting, resizing and teardown of animations on real surfaces.

use morphfield::prelude::*;
use morphfield::MountState;

fn field(seed: u64) -> ParticleField {
    ParticleField::seeded(FieldConfig::default().with_particle_count(200), 320.0, 200.0, seed)
}

#[test]
fn no_surface_means_no_animation() {
    let mount = Mount::<ParticleField, PixmapCanvas>::new(field(1), None);
    assert!(mount.is_none());
}

#[test]
fn frames_paint_the_canvas() {
    let canvas = PixmapCanvas::new(320, 200).unwrap();
    let mut mount = Mount::new(field(2), Some(canvas)).unwrap();
    for _ in 0..120 {
        assert!(mount.tick());
    }
    assert_eq!(mount.frames(), 120);

    let lit = mount.surface().data().chunks_exact(4).filter(|px| px[0] > 8 || px[1] > 8 || px[2] > 8).count();
    assert!(lit > 0, "nothing was drawn");
}

#[test]
fn teardown_stops_frames_and_ignores_late_calls() {
    let canvas = PixmapCanvas::new(320, 200).unwrap();
    let mut mount = Mount::new(field(3), Some(canvas)).unwrap();
    mount.tick();
    mount.unmount();
    assert_eq!(mount.state(), MountState::Detached);

    let before = mount.surface().data().to_vec();
    let timer = mount.animation().timer();
    assert!(!mount.tick());
    mount.resize(640, 480);
    mount.unmount();

    assert_eq!(mount.surface().data(), &before[..]);
    assert_eq!(mount.animation().timer(), timer);
    assert_eq!(mount.surface().size(), (320, 200));
}

#[test]
fn resize_keeps_field_height_and_particles() {
    let mut mount = Mount::new(field(4), Some(CommandRecorder::new(320, 200))).unwrap();
    for _ in 0..30 {
        mount.tick();
    }
    let positions: Vec<Vec3> = mount.animation().particles().iter().map(|p| p.position).collect();
    mount.resize(500, 900);

    assert_eq!(mount.surface().size(), (500, 900));
    assert_eq!(mount.animation().viewport(), Vec2::new(500.0, 200.0));
    let after: Vec<Vec3> = mount.animation().particles().iter().map(|p| p.position).collect();
    assert_eq!(positions, after);
}

#[test]
fn independent_instances_do_not_interfere() {
    let mut a = Mount::new(field(5), Some(CommandRecorder::new(320, 200))).unwrap();
    let mut b = Mount::new(field(5), Some(CommandRecorder::new(320, 200))).unwrap();
    let mut solo = field(5);

    for _ in 0..50 {
        a.tick();
        b.tick();
        b.tick();
        solo.step();
    }

    assert_eq!(a.animation().particles(), solo.particles());
    assert_eq!(b.animation().timer(), 100);
    assert_eq!(a.animation().timer(), 50);
}

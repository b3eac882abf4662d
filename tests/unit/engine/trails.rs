use super::*;
use crate::foundation::core::{Rgba8Premul, Vector};
use crate::render::color::ColorSpec;
use crate::render::surface::PixmapSurface;

fn square() -> OutlineSource {
    OutlineSource::Subpaths(vec![vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]])
}

fn unit_config() -> TrailsConfig {
    TrailsConfig {
        image_width: 0.5,
        step_factor: 1.0,
        speed: 2.0,
        ..TrailsConfig::default()
    }
}

fn engine() -> Trails<PixmapSurface> {
    Trails::new(square(), PixmapSurface::new(20.0, 20.0, 1.0), unit_config()).unwrap()
}

const WHITE: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

#[test]
fn construction_fits_and_centers_outline() {
    let e = engine();
    let outline = e.outline().unwrap();
    assert_eq!(outline.min(), Vector::new(5, 5));
    assert_eq!(outline.max(), Vector::new(15, 15));
    assert_eq!(e.surface().backing_size(), (20, 20));
    assert_eq!(e.traces().len(), 1);

    let coords = e.traces()[0].coords();
    assert_eq!(coords.len(), 40);
    let expected: Vec<Vector> = (6..=15).map(|x| Vector::new(x, 5)).collect();
    assert_eq!(&coords[..10], expected.as_slice());
}

#[test]
fn first_tick_draws_a_single_pixel() {
    let mut e = engine();
    e.update();
    assert_eq!(e.surface().painted_pixels(), 1);
    assert_eq!(e.surface().pixel(6, 5), Some(WHITE));
    assert_eq!(e.traces()[0].last_drawn(), Some(Vector::new(6, 5)));
    assert_eq!(e.traces()[0].index(), 2);
}

#[test]
fn second_tick_draws_segment_and_fades_older_entry() {
    let mut e = engine();
    e.update();
    e.update();
    let s = e.surface();
    assert_eq!(s.painted_pixels(), 3);
    assert_eq!(s.pixel(8, 5), Some(WHITE));
    assert_eq!(s.pixel(7, 5), Some(WHITE));
    assert_eq!(
        s.pixel(6, 5),
        Some(Rgba8Premul {
            r: 128,
            g: 128,
            b: 128,
            a: 128
        })
    );
    assert_eq!(e.traces()[0].tails().len(), 2);
}

#[test]
fn tails_stay_bounded_over_many_laps() {
    let mut e = engine();
    let capacity = e.traces()[0].tails().capacity();
    assert_eq!(capacity, 20);
    for _ in 0..200 {
        e.update();
        let trace = &e.traces()[0];
        assert!(trace.tails().len() <= capacity);
        assert!(trace.index() < trace.coords().len());
    }
    assert_eq!(e.traces()[0].tails().len(), capacity);
}

#[test]
fn tail_opacity_is_monotone_and_floored() {
    let values: Vec<f64> = (0..10).map(|i| tail_opacity(i, 10)).collect();
    assert_eq!(values[0], 1.0);
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
    assert!(values.iter().all(|&v| v >= 0.5));
    assert_eq!(tail_opacity(9, 10), 0.5);
    assert_eq!(tail_opacity(0, 0), 1.0);
}

#[test]
fn device_pixel_ratio_scales_geometry_and_backing() {
    let e = Trails::new(square(), PixmapSurface::new(20.0, 20.0, 2.0), unit_config()).unwrap();
    assert_eq!(e.surface().backing_size(), (40, 40));
    let outline = e.outline().unwrap();
    assert_eq!(outline.min(), Vector::new(10, 10));
    assert_eq!(outline.max(), Vector::new(30, 30));
    // step factor is divided by the ratio, keeping the sample count per logical unit.
    assert_eq!(e.traces()[0].coords().len(), 40);
}

#[test]
fn position_to_center_is_repeatable() {
    let mut e = Trails::new(square(), PixmapSurface::new(20.0, 20.0, 2.0), unit_config()).unwrap();
    let before = e.outline().cloned();
    e.position_to_center().unwrap();
    e.position_to_center().unwrap();
    assert_eq!(e.outline().cloned(), before);
}

#[test]
fn resize_follows_surface_changes() {
    let mut e = engine();
    e.surface_mut().set_logical_size(40.0, 40.0);
    e.resize().unwrap();
    let outline = e.outline().unwrap();
    assert_eq!(outline.dim().w, 20);
    assert_eq!(outline.min(), Vector::new(10, 10));
    assert_eq!(e.surface().backing_size(), (40, 40));
}

#[test]
fn destroy_clears_and_is_idempotent() {
    let mut e = engine();
    for _ in 0..5 {
        e.update();
    }
    assert!(e.surface().painted_pixels() > 0);
    e.destroy();
    assert_eq!(e.surface().painted_pixels(), 0);
    assert!(e.is_destroyed());
    assert!(e.traces().is_empty());
    assert!(e.outline().is_none());

    e.destroy();
    e.update();
    assert_eq!(e.surface().painted_pixels(), 0);
    assert!(matches!(e.resize(), Err(TrailsError::Destroyed)));
    assert!(matches!(
        e.position_to_center(),
        Err(TrailsError::Destroyed)
    ));
    assert!(matches!(
        e.reload(TrailsConfig::default()),
        Err(TrailsError::Destroyed)
    ));
}

#[test]
fn reload_applies_new_config() {
    let e = engine();
    let cfg = TrailsConfig {
        step_factor: 2.0,
        ..unit_config()
    };
    let e = e.reload(cfg).unwrap();
    assert_eq!(e.config().step_factor, 2.0);
    assert_eq!(e.traces()[0].coords().len(), 80);
}

#[test]
fn empty_outline_is_missing_input() {
    let surface = PixmapSurface::new(10.0, 10.0, 1.0);
    let err = Trails::new(
        OutlineSource::Subpaths(vec![vec![]]),
        surface.clone(),
        TrailsConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TrailsError::MissingInput(_)));
    assert!(matches!(
        Trails::new(
            OutlineSource::PathData(String::new()),
            surface,
            TrailsConfig::default()
        ),
        Err(TrailsError::MissingInput(_))
    ));
}

#[test]
fn zero_sized_surface_is_invalid_resize() {
    let err = Trails::new(
        square(),
        PixmapSurface::new(0.0, 0.0, 1.0),
        TrailsConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TrailsError::InvalidResize(_)));
}

#[test]
fn zero_step_factor_leaves_nothing_to_animate() {
    let cfg = TrailsConfig {
        step_factor: 0.0,
        ..unit_config()
    };
    let mut e = Trails::new(square(), PixmapSurface::new(20.0, 20.0, 1.0), cfg).unwrap();
    assert!(e.traces().is_empty());
    e.update();
    assert_eq!(e.surface().painted_pixels(), 0);
}

#[test]
fn seeded_palettes_render_identically() {
    let cfg = TrailsConfig {
        color: ColorSpec::parse("red,lime,blue").unwrap(),
        ..unit_config()
    };
    let run = |seed| {
        let mut e = Trails::new(square(), PixmapSurface::new(20.0, 20.0, 1.0), cfg.clone())
            .unwrap()
            .with_rng_seed(seed);
        for _ in 0..30 {
            e.update();
        }
        e.into_surface().to_rgba_image()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn path_data_source_builds_one_trace_per_contour() {
    let e = Trails::new(
        OutlineSource::PathData("M0 0 L10 0 L10 10 Z M20 0 L30 0 L30 10 Z".into()),
        PixmapSurface::new(50.0, 50.0, 1.0),
        TrailsConfig::default(),
    )
    .unwrap();
    assert_eq!(e.traces().len(), 2);
}

#[test]
fn huge_scale_still_fits_the_surface() {
    let cfg = crate::engine::config::parse_options("scale=1e300").unwrap();
    let mut e = Trails::new(
        OutlineSource::PathData("M-10 -10 L10 -10 L10 10 Z".into()),
        PixmapSurface::new(100.0, 100.0, 1.0),
        cfg,
    )
    .unwrap();
    let dim = e.outline().unwrap().dim();
    assert_eq!(dim.w, 160);
    assert!(!e.traces().is_empty());
    e.update();
}

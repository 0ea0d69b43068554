use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tickmark_core::Color;
use tickmark_render::{title_for, ClockFace, IconRasterizer, ICON_SIZE};

fn reading(h: u32, m: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 31)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn every_minute_of_the_day_rasterizes_in_both_formats() {
    let rasterizer = IconRasterizer::new();
    for hour in 0..24 {
        for minute in 0..60 {
            for hour12 in [false, true] {
                let face = ClockFace::format(&reading(hour, minute), hour12);
                let image = rasterizer
                    .rasterize(&face, Color::WHITE)
                    .unwrap_or_else(|e| panic!("{face}: {e}"));
                assert_eq!(image.dimensions(), (ICON_SIZE, ICON_SIZE));
            }
        }
    }
}

#[test]
fn different_minutes_produce_different_bitmaps() {
    let rasterizer = IconRasterizer::new();
    let a = rasterizer
        .rasterize(&ClockFace::format(&reading(10, 14), false), Color::WHITE)
        .unwrap();
    let b = rasterizer
        .rasterize(&ClockFace::format(&reading(10, 15), false), Color::WHITE)
        .unwrap();
    assert_ne!(a.as_raw(), b.as_raw());
}

#[test]
fn twelve_and_twenty_four_hour_faces_differ_after_noon() {
    let rasterizer = IconRasterizer::new();
    let h24 = ClockFace::format(&reading(15, 0), false);
    let h12 = ClockFace::format(&reading(15, 0), true);
    assert_eq!(h24.hour, "15");
    assert_eq!(h12.hour, "03");
    assert_ne!(
        rasterizer.rasterize(&h24, Color::BLACK).unwrap().as_raw(),
        rasterizer.rasterize(&h12, Color::BLACK).unwrap().as_raw()
    );
}

#[test]
fn title_tracks_the_calendar_date() {
    assert_eq!(title_for(&reading(23, 59)), "2025-12-31");
}

#[test]
fn system_rasterizer_always_produces_an_icon() {
    // Outline font when one is installed, bitmap font otherwise.
    let rasterizer = IconRasterizer::system();
    let image = rasterizer
        .rasterize(&ClockFace::format(&reading(21, 7), true), Color::WHITE)
        .unwrap();
    assert_eq!(image.dimensions(), (ICON_SIZE, ICON_SIZE));
    assert!(image.pixels().any(|p| p.0[3] != 0));
}

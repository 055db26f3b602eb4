//! Multi-frame scroll scenarios driven through the public engine API.

use card_stack::config::StackConfig;
use card_stack::core::{
    attributes::{CardAttributes, PINNED_Z_INDEX},
    geometry::Viewport,
    layout::CardStackLayout,
    offset::normalize_offset,
    range::resolve_range,
    scale::depth_scale,
};

const WIDTH: f64 = 300.0;
const HEIGHT: f64 = 600.0;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn engine(config: StackConfig) -> CardStackLayout {
    CardStackLayout::new(config).expect("valid config")
}

fn pass(layout: &mut CardStackLayout, offset: f64, items: usize) -> Vec<CardAttributes> {
    layout
        .layout(&Viewport::new(offset, WIDTH, HEIGHT, items))
        .expect("valid viewport")
}

/// Records computed from the stacking formula (not replayed from the cache).
fn stack_cards(records: &[CardAttributes]) -> impl Iterator<Item = &CardAttributes> {
    records.iter().filter(|r| r.z_index != PINNED_Z_INDEX)
}

#[test]
fn three_cards_at_rest() {
    let mut layout = engine(StackConfig::default());
    let out = pass(&mut layout, 0.0, 3);

    assert_eq!(resolve_range(0.0, WIDTH, 3, 4), 0..3);
    assert_eq!(out.len(), 3);
    let front = &out[0];
    assert_eq!(front.index, 0);
    assert_eq!(front.center.x, WIDTH / 2.0);
    assert_eq!(front.opacity, 1.0);
    assert!(!front.is_pinned);
    assert!(layout.pinned().is_empty());
}

#[test]
fn halfway_through_page_zero() {
    let progress = normalize_offset(150.0, WIDTH, 0.08);
    assert_eq!(progress.delta_offset, 150.0);
    assert_eq!(progress.percentage_offset, 0.5);

    // Default stopping line (40) is closer than 150: the card slides.
    let mut layout = engine(StackConfig::default());
    let out = pass(&mut layout, 150.0, 3);
    assert_eq!(out[0].center.x, 150.0 + WIDTH / 2.0 - 150.0);
    assert!(!out[0].is_pinned);

    // A stopping line past 150 pins it instead.
    let mut layout = engine(StackConfig {
        stopping_line: 160.0,
        ..StackConfig::default()
    });
    let out = pass(&mut layout, 150.0, 3);
    assert!(out[0].is_pinned);
    assert_eq!(out[0].center.x, 150.0 + 160.0);
}

#[test]
fn page_boundaries_put_every_card_in_its_slot() {
    let mut layout = engine(StackConfig::default());
    for page in 0..6 {
        let offset = page as f64 * WIDTH;
        let progress = normalize_offset(offset, WIDTH, 0.08);
        assert_eq!(progress.percentage_offset, 0.0);

        let out = pass(&mut layout, offset, 8);
        let front = stack_cards(&out).next().unwrap();
        assert_eq!(front.index, page);
        assert_eq!(front.center.x, offset + WIDTH / 2.0);
        assert!(approx(front.transform.scale, depth_scale(0, 4, 0.95)));
    }
}

#[test]
fn overscroll_is_damped() {
    let progress = normalize_offset(-50.0, WIDTH, 0.08);
    assert!((progress.percentage_offset - (-0.013_33)).abs() < 1e-4);
    assert!(approx(progress.delta_offset, -4.0));

    let mut layout = engine(StackConfig::default());
    let out = pass(&mut layout, -50.0, 3);
    assert_eq!(out.len(), 3);
    assert!(approx(out[0].center.x, -50.0 + WIDTH / 2.0 + 4.0));
}

#[test]
fn front_scale_never_drops_below_floor() {
    let floor = 1.08;
    let mut layout = engine(StackConfig {
        minimum_front_scale: floor,
        ..StackConfig::default()
    });
    let mut offset = 0.0;
    while offset < 4.0 * WIDTH {
        let out = pass(&mut layout, offset, 6);
        let front = stack_cards(&out).next().unwrap();
        assert!(front.transform.scale >= floor, "offset {offset}: {}", front.transform.scale);
        offset += 5.0;
    }
}

#[test]
fn cards_past_the_window_are_invisible() {
    let mut layout = engine(StackConfig::default());
    let viewport = Viewport::new(75.0, WIDTH, HEIGHT, 20);
    let progress = normalize_offset(75.0, WIDTH, 0.08);
    for index in 4..12 {
        let center_x = viewport.content_center_x();
        let a = layout.compute_attributes(index, 0, center_x, progress, &viewport);
        assert_eq!(a.opacity, 0.0);
    }
}

#[test]
fn sweep_pins_each_card_and_replays_it_on_the_next_page() {
    let config = StackConfig::default();
    let stop = config.stopping_line;
    let mut layout = engine(config);

    let mut offset = 0.0;
    while offset <= 4.0 * WIDTH {
        let out = pass(&mut layout, offset, 5);
        let min_index = resolve_range(offset, WIDTH, 5, 4).start;

        // Output is ordered by index.
        let indices: Vec<usize> = out.iter().map(|r| r.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);

        let distance = (WIDTH * (min_index + 1) as f64 - offset).abs();
        if distance <= stop {
            assert!(layout.pinned().contains(min_index), "offset {offset}");
        }

        if min_index > 0 {
            let replay = &out[0];
            assert_eq!(replay.index, min_index - 1, "offset {offset}");
            assert_eq!(replay.center.x, offset + stop);
            assert!(replay.is_pinned);
            assert!(out[1..].iter().all(|r| r.z_index > replay.z_index));
        }
        offset += 10.0;
    }
    assert_eq!(layout.pinned().len(), 4);
}

#[test]
fn scrolling_back_and_forward_overwrites_the_pin() {
    let mut layout = engine(StackConfig::default());

    pass(&mut layout, 270.0, 5);
    assert_eq!(layout.pinned().get(0).unwrap().offset_when_pinned, 270.0);

    // Back out of the pin window: the entry stays, the front card slides again.
    let out = pass(&mut layout, 100.0, 5);
    assert!(!out[0].is_pinned);
    assert!(layout.pinned().contains(0));

    pass(&mut layout, 280.0, 5);
    assert_eq!(layout.pinned().get(0).unwrap().offset_when_pinned, 280.0);
    assert_eq!(layout.pinned().len(), 1);
}

#[test]
fn fling_over_the_pin_window_is_recovered_on_scroll_out() {
    let mut layout = engine(StackConfig::default());

    pass(&mut layout, 200.0, 5);
    let out = pass(&mut layout, 320.0, 5);
    assert!(out.iter().all(|r| r.index != 0));
    assert!(!layout.pinned().contains(0));

    // A card that was never in front is not seeded.
    assert!(!layout.on_item_scrolled_out(4));

    assert!(layout.on_item_scrolled_out(0));
    assert!(!layout.on_item_scrolled_out(0));
    assert_eq!(layout.pinned().get(0).unwrap().offset_when_pinned, 200.0);

    let out = pass(&mut layout, 330.0, 5);
    assert_eq!(out[0].index, 0);
    assert_eq!(out[0].center.x, 330.0 + 40.0);
    assert_eq!(out[0].z_index, PINNED_Z_INDEX);
}

#[test]
fn already_pinned_cards_are_not_reseeded() {
    let mut layout = engine(StackConfig::default());
    pass(&mut layout, 280.0, 5);
    pass(&mut layout, 300.0, 5);
    assert!(!layout.on_item_scrolled_out(0));
    assert_eq!(layout.pinned().get(0).unwrap().offset_when_pinned, 280.0);
}

#[test]
fn fading_card_tracks_progress() {
    let mut layout = engine(StackConfig::default());
    for step in 0..=10 {
        let offset = 30.0 * step as f64;
        if offset >= WIDTH {
            break;
        }
        let out = pass(&mut layout, offset, 10);
        let tail = out.iter().find(|r| r.index == 3).unwrap();
        assert!(approx(tail.opacity, offset / WIDTH));
    }
}

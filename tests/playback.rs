use serde_json::json;
use spriteclock::{
    DisplayList, FixedClock, FrameRecords, HhMm, LoadError, Rgba8, SequenceRecords,
    SpriteClockError, SpriteClockView, Track, Trigger, ViewConfig, Viewport, load,
};

const PALETTE: [&str; 3] = ["#ff0000", "#00ff00", "#0000ff"];

fn palette_frames() -> FrameRecords {
    serde_json::from_value(json!([
        [{"color": PALETTE[0], "geometry": "M0,0 L10,0 L10,10 Z"}],
        [{"color": PALETTE[1], "geometry": "M0,0 L10,0 L10,10 Z"}],
        [{"color": PALETTE[2], "geometry": "M0,0 L10,0 L10,10 Z"}]
    ]))
    .unwrap()
}

fn frame_color(i: usize) -> Rgba8 {
    spriteclock::parse_color(PALETTE[i]).unwrap()
}

/// Colors of the sprite layers painted by one render, in paint order.
fn sprite_colors(view: &SpriteClockView) -> Vec<Rgba8> {
    let mut dl = DisplayList::new();
    let stats = view
        .render(
            &mut dl,
            Viewport::new(800.0, 600.0),
            &FixedClock(HhMm::parse("1200").unwrap()),
        )
        .unwrap();
    dl.commands()
        .iter()
        .take(stats.base_layers + stats.overlay_layers)
        .map(|c| c.color)
        .collect()
}

fn view(sequences: serde_json::Value) -> SpriteClockView {
    let sequences: SequenceRecords = serde_json::from_value(sequences).unwrap();
    SpriteClockView::load(&palette_frames(), &sequences, ViewConfig::default()).unwrap()
}

const BASE: Trigger = Trigger::Track(Track::Base);
const OVERLAY: Trigger = Trigger::Track(Track::Overlay);

#[test]
fn base_over_overlay_end_to_end() {
    let mut v = view(json!([[0, 1, 2], [2, 1]]));
    assert_eq!(sprite_colors(&v), vec![frame_color(0), frame_color(2)]);

    v.on_trigger(BASE);
    v.on_trigger(OVERLAY);
    assert_eq!(sprite_colors(&v), vec![frame_color(1), frame_color(1)]);

    v.on_trigger(OVERLAY);
    assert_eq!(sprite_colors(&v), vec![frame_color(1)]);
}

#[test]
fn base_track_stays_frozen_after_its_last_entry() {
    let mut v = view(json!([[2, 0, 1]]));
    for _ in 0..2 {
        v.on_trigger(BASE);
    }
    assert_eq!(sprite_colors(&v), vec![frame_color(1)]);
    for _ in 0..10 {
        v.on_trigger(BASE);
        assert_eq!(sprite_colors(&v), vec![frame_color(1)]);
    }
    assert!(!v.is_running(Track::Base));
}

#[test]
fn overlay_track_disappears_after_n_ticks() {
    let mut v = view(json!([[], [0, 1, 2]]));
    for _ in 0..2 {
        v.on_trigger(OVERLAY);
    }
    assert_eq!(sprite_colors(&v), vec![frame_color(2)]);

    v.on_trigger(OVERLAY);
    assert!(sprite_colors(&v).is_empty());
    for _ in 0..3 {
        v.on_trigger(OVERLAY);
        assert!(sprite_colors(&v).is_empty());
    }
}

#[test]
fn virtual_time_reaches_the_same_state() {
    let mut v = view(json!([[0, 1, 2], [2, 1]]));
    // base fires at 150, overlay at 110
    v.advance_to(std::time::Duration::from_millis(160));
    assert_eq!(sprite_colors(&v), vec![frame_color(1), frame_color(1)]);

    // overlay's second tick at 220 ends it
    v.advance_to(std::time::Duration::from_millis(230));
    assert_eq!(sprite_colors(&v), vec![frame_color(1)]);

    v.advance_to(std::time::Duration::from_secs(5));
    assert_eq!(sprite_colors(&v), vec![frame_color(2)]);
}

#[test]
fn blank_layer_records_are_dropped() {
    let frames: FrameRecords =
        serde_json::from_value(json!([[{"color": "", "geometry": "M0,0"}]])).unwrap();
    let anim = load(&frames, &SequenceRecords::default()).unwrap();
    assert_eq!(anim.library.len(), 1);
    assert!(anim.library.get(0).unwrap().layers().is_empty());
}

#[test]
fn single_sequence_group_means_no_overlay() {
    let sequences = SequenceRecords::from_json_str("[[0,1,2]]").unwrap();
    let anim = load(&palette_frames(), &sequences).unwrap();
    assert_eq!(anim.base().as_slice(), &[0, 1, 2]);
    assert!(anim.overlay().is_empty());
}

#[test]
fn out_of_range_entries_fail_the_load() {
    let sequences = SequenceRecords::from_json_str("[[0,1,2],[3]]").unwrap();
    let err = SpriteClockView::load(&palette_frames(), &sequences, ViewConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SpriteClockError::Load(LoadError::InvalidIndex {
            track: Track::Overlay,
            position: 0,
            index: 3,
            frames: 3,
        })
    ));
}

#[test]
fn colon_blinks_starting_visible() {
    let mut v = view(json!([]));
    let mut seen = vec![v.clock_state().colon_visible];
    for s in 1..=4 {
        v.advance_to(std::time::Duration::from_secs(s));
        seen.push(v.clock_state().colon_visible);
    }
    assert_eq!(seen, vec![true, false, true, false, true]);
}

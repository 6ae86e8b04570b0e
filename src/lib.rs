//! spriteclock renders a two-track vector sprite animation over a procedurally
//! drawn seven-segment clock.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `FrameRecords + SequenceRecords -> Animation` (a shared frame
//!    library plus the base and overlay sequences that index it)
//! 2. **Tick**: three periodic triggers (base 150 ms, overlay 110 ms, colon
//!    1000 ms) advance the [`Player`] cursors and flip the [`ClockState`]
//! 3. **Paint**: the compositor paints the base frame, then the overlay frame,
//!    under a fixed scale/translate, then the clock face on top, into any
//!    [`RenderSurface`]
//!
//! The two tracks end differently: the base track holds its last pose, the
//! overlay track disappears after its final frame.
//!
//! Loading is all-or-nothing. A malformed layer or a sequence entry that does
//! not address a frame fails the load and no [`SpriteClockView`] is created.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod clock;
mod config;
mod foundation;
mod render;
mod view;

pub use animation::player::{EndPolicy, PlaybackCursor, Player, TickOutcome, Track};
pub use assets::color::parse_color;
pub use assets::geometry::parse_geometry;
pub use assets::library::{Animation, Frame, FrameLibrary, Layer, Sequence, SequenceTable, load};
pub use assets::records::{FrameRecords, LayerRecord, SequenceRecords};
pub use clock::segments::{
    CHAMFER, COLON_SIZE, ClockState, DIGIT_PITCH, DIGIT_SEGMENTS, DIGIT_SPACING, Polygon,
    SEGMENT_LENGTH, SEGMENT_WIDTH, Segment, clock_frame, colon_glyph, colon_offset, digit_glyph,
    horizontal_segment, rhombus, vertical_segment,
};
pub use clock::source::{ClockSource, Digit, FixedClock, HhMm, SystemClock};
pub use config::ViewConfig;
pub use foundation::core::{Affine, BezPath, FillRule, Point, Rgba8, Vec2, Viewport};
pub use foundation::error::{LoadError, SpriteClockError, SpriteClockResult};
pub use render::compositor::{PaintStats, clock_origin, paint, sprite_transform};
pub use render::cpu::CpuSurface;
pub use render::surface::{DisplayList, DrawCommand, FrameRGBA, RenderSurface};
pub use view::scheduler::{
    Firing, PeriodicTrigger, RepaintRequest, Scheduler, Trigger, TriggerControl,
};
pub use view::session::SpriteClockView;

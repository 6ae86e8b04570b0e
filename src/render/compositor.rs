//! Read-then-paint step for one redraw.
//!
//! Paint order is fixed: base frame, overlay frame (both under the sprite
//! transform), then the clock face in untransformed view space.

use crate::{
    animation::player::{Player, Track},
    clock::segments::{ClockState, clock_frame},
    clock::source::HhMm,
    config::ViewConfig,
    foundation::core::{Affine, Point, Vec2, Viewport},
    foundation::error::SpriteClockResult,
    render::surface::RenderSurface,
};

/// Counts of what one redraw painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    pub base_layers: usize,
    pub overlay_layers: usize,
    pub clock_polygons: usize,
}

/// Uniform scale about the origin, then a shift right by half and down by a
/// quarter of the scaled view.
pub fn sprite_transform(viewport: Viewport, scale: f64) -> Affine {
    let offset = Vec2::new(
        viewport.width * scale / 2.0,
        viewport.height * scale / 4.0,
    );
    Affine::translate(offset) * Affine::scale(scale)
}

/// Top-left corner of the first digit.
pub fn clock_origin(viewport: Viewport, config: &ViewConfig) -> Point {
    Point::new(
        config.clock_margin_left,
        viewport.height - config.clock_margin_bottom - config.clock_rise,
    )
}

#[tracing::instrument(level = "trace", skip(surface, player, config))]
pub fn paint(
    surface: &mut dyn RenderSurface,
    viewport: Viewport,
    player: &Player,
    clock: ClockState,
    time: HhMm,
    config: &ViewConfig,
) -> SpriteClockResult<PaintStats> {
    let mut stats = PaintStats::default();

    surface.push_transform(sprite_transform(viewport, config.sprite_scale));
    let sprite = paint_tracks(surface, player, &mut stats);
    surface.pop_transform();
    sprite?;

    for poly in clock_frame(time, clock.colon_visible, clock_origin(viewport, config)) {
        surface.fill_polygon(poly.points(), config.segment_color)?;
        stats.clock_polygons += 1;
    }

    Ok(stats)
}

fn paint_tracks(
    surface: &mut dyn RenderSurface,
    player: &Player,
    stats: &mut PaintStats,
) -> SpriteClockResult<()> {
    for track in Track::ALL {
        let Some(frame) = player.current_frame(track) else {
            continue;
        };
        for layer in frame.layers() {
            surface.fill_path(&layer.shape, layer.fill, layer.fill_rule)?;
        }
        match track {
            Track::Base => stats.base_layers = frame.layers().len(),
            Track::Overlay => stats.overlay_layers = frame.layers().len(),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::library::{Animation, Frame, FrameLibrary, Layer, Sequence, SequenceTable},
        foundation::core::{BezPath, FillRule, Rgba8},
        render::surface::DisplayList,
    };

    fn frame(color: Rgba8) -> Frame {
        let mut shape = BezPath::new();
        shape.move_to((0.0, 0.0));
        shape.line_to((10.0, 0.0));
        shape.line_to((0.0, 10.0));
        shape.close_path();
        Frame::new(vec![Layer {
            fill: color,
            shape,
            fill_rule: FillRule::EvenOdd,
        }])
    }

    #[test]
    fn sprite_transform_scales_then_offsets() {
        let t = sprite_transform(Viewport::new(1000.0, 800.0), 0.6);
        assert_eq!(t * Point::ORIGIN, Point::new(300.0, 120.0));
        let p = t * Point::new(100.0, 100.0);
        assert!((p.x - 360.0).abs() < 1e-9 && (p.y - 180.0).abs() < 1e-9);
    }

    #[test]
    fn clock_sits_above_the_bottom_margin() {
        let origin = clock_origin(Viewport::new(1000.0, 800.0), &ViewConfig::default());
        assert_eq!(origin, Point::new(70.0, 640.0));
    }

    #[test]
    fn base_paints_under_overlay_and_clock_is_untransformed() {
        let red = Rgba8::opaque(255, 0, 0);
        let blue = Rgba8::opaque(0, 0, 255);
        let player = Player::new(Animation {
            library: FrameLibrary::new(vec![frame(red), frame(blue)]),
            sequences: SequenceTable {
                base: Sequence::new(vec![0]),
                overlay: Sequence::new(vec![1]),
            },
        });
        let cfg = ViewConfig::default();
        let viewport = Viewport::new(640.0, 480.0);

        let mut dl = DisplayList::new();
        let stats = paint(
            &mut dl,
            viewport,
            &player,
            ClockState::default(),
            HhMm::parse("1200").unwrap(),
            &cfg,
        )
        .unwrap();

        let cmds = dl.commands();
        assert_eq!(cmds[0].color, red);
        assert_eq!(cmds[1].color, blue);
        assert_eq!(cmds[0].transform, sprite_transform(viewport, 0.6));
        assert!(cmds[2..].iter().all(|c| c.transform == Affine::IDENTITY));
        assert!(cmds[2..].iter().all(|c| c.color == Rgba8::WHITE));
        assert_eq!(
            stats,
            PaintStats {
                base_layers: 1,
                overlay_layers: 1,
                // digits 1, 2, 0, 0 plus the colon
                clock_polygons: 2 + 5 + 6 + 6 + 2,
            }
        );
    }

    #[test]
    fn hidden_colon_and_empty_tracks_paint_only_digits() {
        let player = Player::new(Animation::default());
        let mut dl = DisplayList::new();
        let stats = paint(
            &mut dl,
            Viewport::new(100.0, 100.0),
            &player,
            ClockState {
                colon_visible: false,
            },
            HhMm::parse("1111").unwrap(),
            &ViewConfig::default(),
        )
        .unwrap();
        assert_eq!(stats.base_layers + stats.overlay_layers, 0);
        assert_eq!(stats.clock_polygons, 8);
        assert_eq!(dl.commands().len(), 8);
    }
}

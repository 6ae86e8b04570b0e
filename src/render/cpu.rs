use crate::{
    foundation::core::{Affine, BezPath, FillRule, Point, Rgba8},
    foundation::error::{SpriteClockError, SpriteClockResult},
    render::surface::{FrameRGBA, RenderSurface, TransformStack},
};

/// Raster surface backed by `vello_cpu`.
///
/// The canvas starts filled with the background color; [`CpuSurface::finish`]
/// resolves every fill into premultiplied RGBA8 pixels.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    transforms: TransformStack,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32, background: Rgba8) -> SpriteClockResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| SpriteClockError::render("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| SpriteClockError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SpriteClockError::render("surface must be at least 1x1"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        Ok(Self {
            width,
            height,
            ctx,
            transforms: TransformStack::default(),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterize everything painted so far.
    pub fn finish(mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl RenderSurface for CpuSurface {
    fn push_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8, rule: FillRule) -> SpriteClockResult<()> {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(affine_to_cpu(self.transforms.current()));
        self.ctx.set_fill_rule(match rule {
            FillRule::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
            FillRule::NonZero => vello_cpu::peniko::Fill::NonZero,
        });
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        Ok(())
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_oversized_and_empty_surfaces() {
        assert!(CpuSurface::new(70_000, 10, Rgba8::BLACK).is_err());
        assert!(CpuSurface::new(0, 10, Rgba8::BLACK).is_err());
    }

    #[test]
    fn background_covers_the_canvas() {
        let frame = CpuSurface::new(8, 4, Rgba8::opaque(10, 20, 30))
            .unwrap()
            .finish();
        assert_eq!(frame.data.len(), 8 * 4 * 4);
        assert_eq!(frame.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(frame.pixel(7, 3), Some([10, 20, 30, 255]));
    }

    #[test]
    fn fills_respect_the_transform_stack() {
        let mut s = CpuSurface::new(32, 32, Rgba8::BLACK).unwrap();
        s.push_transform(Affine::translate((16.0, 16.0)));
        s.fill_polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(16.0, 0.0),
                Point::new(16.0, 16.0),
                Point::new(0.0, 16.0),
            ],
            Rgba8::WHITE,
        )
        .unwrap();
        s.pop_transform();
        let frame = s.finish();

        assert_eq!(frame.pixel(24, 24), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(4, 4), Some([0, 0, 0, 255]));
    }
}

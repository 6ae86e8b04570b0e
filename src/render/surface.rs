use crate::{
    clock::segments::Polygon,
    foundation::core::{Affine, BezPath, FillRule, Point, Rgba8},
    foundation::error::SpriteClockResult,
};

/// Rendered frame pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Paint target the compositor draws into.
///
/// Transforms nest: a pushed transform is applied after the ones already on the
/// stack, i.e. `current = current * pushed`.
pub trait RenderSurface {
    fn push_transform(&mut self, transform: Affine);

    fn pop_transform(&mut self);

    fn fill_path(&mut self, path: &BezPath, color: Rgba8, rule: FillRule) -> SpriteClockResult<()>;

    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) -> SpriteClockResult<()> {
        let path = Polygon::new(points.to_vec()).to_path();
        self.fill_path(&path, color, FillRule::NonZero)
    }
}

/// Transform stack shared by surface implementations.
#[derive(Clone, Debug)]
pub(crate) struct TransformStack {
    stack: Vec<Affine>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            stack: vec![Affine::IDENTITY],
        }
    }
}

impl TransformStack {
    pub(crate) fn current(&self) -> Affine {
        self.stack.last().copied().unwrap_or(Affine::IDENTITY)
    }

    pub(crate) fn push(&mut self, t: Affine) {
        let next = self.current() * t;
        self.stack.push(next);
    }

    /// The identity at the bottom is never popped.
    pub(crate) fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}

/// One fill as seen by a [`DisplayList`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub path: BezPath,
    pub color: Rgba8,
    pub rule: FillRule,
    pub transform: Affine,
}

/// Surface that records fills instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    transforms: TransformStack,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl RenderSurface for DisplayList {
    fn push_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8, rule: FillRule) -> SpriteClockResult<()> {
        self.commands.push(DrawCommand {
            path: path.clone(),
            color,
            rule,
            transform: self.transforms.current(),
        });
        Ok(())
    }
}

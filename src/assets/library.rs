use crate::{
    animation::player::Track,
    assets::{
        color::parse_color,
        geometry::parse_geometry,
        records::{FrameRecords, SequenceRecords},
    },
    foundation::core::{BezPath, FillRule, Rgba8},
    foundation::error::LoadError,
};

/// A solid-filled vector shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub fill: Rgba8,
    pub shape: BezPath,
    pub fill_rule: FillRule,
}

/// Ordered paint layers of one pose, back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    layers: Vec<Layer>,
}

impl Frame {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Immutable, indexable set of frames shared by both tracks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameLibrary {
    frames: Vec<Frame>,
}

impl FrameLibrary {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Build every frame from its records.
    ///
    /// Blank layer records are skipped. The first unparsable color or geometry
    /// aborts the whole build.
    pub fn from_records(records: &FrameRecords) -> Result<Self, LoadError> {
        let mut frames = Vec::with_capacity(records.0.len());
        for (frame_idx, layer_records) in records.0.iter().enumerate() {
            let mut layers = Vec::with_capacity(layer_records.len());
            for (layer_idx, record) in layer_records.iter().enumerate() {
                let Some((color, geometry)) = record.paintable() else {
                    continue;
                };
                let malformed = |reason: String| LoadError::MalformedLayer {
                    frame: frame_idx,
                    layer: layer_idx,
                    reason,
                };
                let fill = parse_color(color).map_err(malformed)?;
                let (shape, fill_rule) = parse_geometry(geometry).map_err(malformed)?;
                layers.push(Layer {
                    fill,
                    shape,
                    fill_rule,
                });
            }
            frames.push(Frame::new(layers));
        }
        Ok(Self { frames })
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Frame indices a track plays through, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence(Vec<usize>);

impl Sequence {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn get(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// The base and overlay sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceTable {
    pub base: Sequence,
    pub overlay: Sequence,
}

impl SequenceTable {
    /// First group becomes the base sequence, second the overlay; missing groups are empty.
    pub fn from_records(records: &SequenceRecords) -> Self {
        let group = |i: usize| Sequence::new(records.0.get(i).cloned().unwrap_or_default());
        Self {
            base: group(0),
            overlay: group(1),
        }
    }

    pub fn sequence(&self, track: Track) -> &Sequence {
        match track {
            Track::Base => &self.base,
            Track::Overlay => &self.overlay,
        }
    }

    /// Reject the first entry of either sequence that does not address a frame.
    pub fn validate_against(&self, library: &FrameLibrary) -> Result<(), LoadError> {
        for track in Track::ALL {
            let seq = self.sequence(track);
            if let Some((position, &index)) = seq
                .as_slice()
                .iter()
                .enumerate()
                .find(|&(_, &idx)| idx >= library.len())
            {
                return Err(LoadError::InvalidIndex {
                    track,
                    position,
                    index,
                    frames: library.len(),
                });
            }
        }
        Ok(())
    }
}

/// Output of a successful load: the frame library and the sequences that index it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animation {
    pub library: FrameLibrary,
    pub sequences: SequenceTable,
}

impl Animation {
    pub fn base(&self) -> &Sequence {
        &self.sequences.base
    }

    pub fn overlay(&self) -> &Sequence {
        &self.sequences.overlay
    }
}

/// Build the frame library, then the sequences, then check every sequence entry
/// against the library.
#[tracing::instrument(skip_all, fields(frames = frames.0.len(), groups = sequences.0.len()))]
pub fn load(frames: &FrameRecords, sequences: &SequenceRecords) -> Result<Animation, LoadError> {
    let library = FrameLibrary::from_records(frames)?;
    let sequences = SequenceTable::from_records(sequences);
    sequences.validate_against(&library)?;

    tracing::debug!(
        frames = library.len(),
        base = sequences.base.len(),
        overlay = sequences.overlay.len(),
        "animation loaded"
    );
    Ok(Animation { library, sequences })
}

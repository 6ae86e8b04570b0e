use crate::foundation::error::LoadError;

/// One paint layer as it arrives from the data source.
///
/// Either field may be missing or blank; such a record is a no-op layer and is
/// dropped when the library is built. Property names match in any casing and
/// unrecognized properties are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LayerRecord {
    pub color: Option<String>,
    pub geometry: Option<String>,
}

enum LayerField {
    Color,
    Geometry,
    Other,
}

impl<'de> serde::Deserialize<'de> for LayerField {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(if key.eq_ignore_ascii_case("color") {
            Self::Color
        } else if key.eq_ignore_ascii_case("geometry") {
            Self::Geometry
        } else {
            Self::Other
        })
    }
}

impl<'de> serde::Deserialize<'de> for LayerRecord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LayerVisitor;

        impl<'de> serde::de::Visitor<'de> for LayerVisitor {
            type Value = LayerRecord;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a layer object with color and geometry")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<LayerRecord, A::Error> {
                let mut out = LayerRecord::default();
                let mut seen = (false, false);
                while let Some(field) = map.next_key::<LayerField>()? {
                    match field {
                        LayerField::Color => {
                            if std::mem::replace(&mut seen.0, true) {
                                return Err(serde::de::Error::duplicate_field("color"));
                            }
                            out.color = map.next_value()?;
                        }
                        LayerField::Geometry => {
                            if std::mem::replace(&mut seen.1, true) {
                                return Err(serde::de::Error::duplicate_field("geometry"));
                            }
                            out.geometry = map.next_value()?;
                        }
                        LayerField::Other => {
                            map.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(LayerVisitor)
    }
}

impl LayerRecord {
    pub fn new(color: impl Into<String>, geometry: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            geometry: Some(geometry.into()),
        }
    }

    /// Color and geometry when both are present and non-blank.
    pub(crate) fn paintable(&self) -> Option<(&str, &str)> {
        let color = self.color.as_deref().filter(|s| !s.trim().is_empty())?;
        let geometry = self.geometry.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((color, geometry))
    }
}

/// Ordered frames, each an ordered list of layer records (back to front).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameRecords(pub Vec<Vec<LayerRecord>>);

impl FrameRecords {
    /// Decode the frames document.
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        serde_json::from_str(s).map_err(|e| LoadError::Records(format!("frames: {e}")))
    }
}

impl From<Vec<Vec<LayerRecord>>> for FrameRecords {
    fn from(frames: Vec<Vec<LayerRecord>>) -> Self {
        Self(frames)
    }
}

/// Up to two groups of frame indices: the base sequence, then the overlay sequence.
///
/// Groups past the second are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SequenceRecords(pub Vec<Vec<usize>>);

impl SequenceRecords {
    /// Decode the sequence document.
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        serde_json::from_str(s).map_err(|e| LoadError::Records(format!("sequences: {e}")))
    }
}

impl From<Vec<Vec<usize>>> for SequenceRecords {
    fn from(groups: Vec<Vec<usize>>) -> Self {
        Self(groups)
    }
}

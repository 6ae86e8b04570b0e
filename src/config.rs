//! View configuration.
//!
//! Every field has a default, so a config document only needs the keys it
//! overrides.

use std::time::Duration;

use crate::{
    animation::player::Track,
    foundation::core::Rgba8,
    foundation::error::{SpriteClockError, SpriteClockResult},
};

/// Timing, placement and colors of the composited view.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Base track tick period.
    pub base_period_ms: u64,
    /// Overlay track tick period.
    pub overlay_period_ms: u64,
    /// Colon blink period.
    pub colon_period_ms: u64,
    /// Uniform scale applied to the sprite layers.
    pub sprite_scale: f64,
    /// Distance from the left edge of the view to the clock.
    pub clock_margin_left: f64,
    /// Distance from the bottom edge of the view to the clock box.
    pub clock_margin_bottom: f64,
    /// Height of the digits' top edge above the clock box bottom.
    pub clock_rise: f64,
    #[serde(with = "hex_color")]
    pub background: Rgba8,
    #[serde(with = "hex_color")]
    pub segment_color: Rgba8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_period_ms: 150,
            overlay_period_ms: 110,
            colon_period_ms: 1000,
            sprite_scale: 0.6,
            clock_margin_left: 70.0,
            clock_margin_bottom: 30.0,
            clock_rise: 130.0,
            background: Rgba8::BLACK,
            segment_color: Rgba8::WHITE,
        }
    }
}

impl ViewConfig {
    pub fn from_json_str(s: &str) -> SpriteClockResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| SpriteClockError::serde(format!("view config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SpriteClockResult<()> {
        for (name, ms) in [
            ("base_period_ms", self.base_period_ms),
            ("overlay_period_ms", self.overlay_period_ms),
            ("colon_period_ms", self.colon_period_ms),
        ] {
            if ms == 0 {
                return Err(SpriteClockError::validation(format!("{name} must be > 0")));
            }
        }
        if !self.sprite_scale.is_finite() || self.sprite_scale <= 0.0 {
            return Err(SpriteClockError::validation(
                "sprite_scale must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("clock_margin_left", self.clock_margin_left),
            ("clock_margin_bottom", self.clock_margin_bottom),
            ("clock_rise", self.clock_rise),
        ] {
            if !v.is_finite() {
                return Err(SpriteClockError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    pub fn track_period(&self, track: Track) -> Duration {
        match track {
            Track::Base => Duration::from_millis(self.base_period_ms),
            Track::Overlay => Duration::from_millis(self.overlay_period_ms),
        }
    }

    pub fn colon_period(&self) -> Duration {
        Duration::from_millis(self.colon_period_ms)
    }
}

mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::{assets::color::parse_color, foundation::core::Rgba8};

    pub(super) fn serialize<S: Serializer>(c: &Rgba8, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("#{:02X}{:02X}{:02X}{:02X}", c.a, c.r, c.g, c.b))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgba8, D::Error> {
        let s = String::deserialize(d)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }
}

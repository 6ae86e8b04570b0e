use crate::foundation::core::Rgba8;

const NAMED: &[(&str, Rgba8)] = &[
    ("transparent", Rgba8::TRANSPARENT),
    ("black", Rgba8::BLACK),
    ("white", Rgba8::WHITE),
    ("red", Rgba8::opaque(255, 0, 0)),
    ("green", Rgba8::opaque(0, 128, 0)),
    ("blue", Rgba8::opaque(0, 0, 255)),
    ("yellow", Rgba8::opaque(255, 255, 0)),
    ("cyan", Rgba8::opaque(0, 255, 255)),
    ("magenta", Rgba8::opaque(255, 0, 255)),
    ("gray", Rgba8::opaque(128, 128, 128)),
    ("orange", Rgba8::opaque(255, 165, 0)),
];

/// Parse a layer color.
///
/// Hex forms put alpha first: `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB`.
/// A small set of named colors is accepted as well.
pub fn parse_color(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("color must be non-empty".to_owned());
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|&(_, c)| c)
        .ok_or_else(|| format!("unknown color \"{s}\""))
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color \"#{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = hex_byte(c)?;
        Ok(v * 17)
    }

    match s.len() {
        3 => Ok(Rgba8::opaque(
            hex_nibble(&s[0..1])?,
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
        )),
        4 => Ok(Rgba8::new(
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
            hex_nibble(&s[3..4])?,
            hex_nibble(&s[0..1])?,
        )),
        6 => Ok(Rgba8::opaque(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
            hex_byte(&s[0..2])?,
        )),
        _ => Err("hex color must be #RGB, #ARGB, #RRGGBB or #AARRGGBB".to_owned()),
    }
}

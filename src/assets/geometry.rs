use crate::foundation::core::{BezPath, FillRule};

/// Parse a layer geometry string into a path and the fill rule it asks for.
///
/// The body is SVG path data. A leading `F0` (even-odd) or `F1` (non-zero)
/// token selects the fill rule; without one the path fills even-odd.
pub fn parse_geometry(d: &str) -> Result<(BezPath, FillRule), String> {
    let d = d.trim();
    let (rule, body) = split_fill_rule(d)?;
    let body = body.trim_start();
    if body.is_empty() {
        return Err("path data must be non-empty".to_owned());
    }

    let path = BezPath::from_svg(body).map_err(|e| format!("invalid path data: {e}"))?;
    Ok((path, rule))
}

fn split_fill_rule(d: &str) -> Result<(FillRule, &str), String> {
    let Some(rest) = d.strip_prefix('F') else {
        return Ok((FillRule::default(), d));
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some('0') => Ok((FillRule::EvenOdd, chars.as_str())),
        Some('1') => Ok((FillRule::NonZero, chars.as_str())),
        _ => Err("fill rule token must be F0 or F1".to_owned()),
    }
}

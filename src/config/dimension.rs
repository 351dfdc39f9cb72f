/// A position or extent authored in a theme descriptor.
///
/// Interpretation against a base size (see [`parse_dimension`]):
///
/// | form | example | meaning |
/// |------|---------|---------|
/// | number `<= 1` | `0.5` | fraction of base |
/// | number `> 1` | `560` | absolute pixels |
/// | string ending in `%` | `"50%"` | fraction of base |
/// | string ending in `px` | `"560px"` | absolute pixels |
/// | other numeric string | `"0.5"`, `"560"` | same as the bare number |
///
/// A bare `1` is a fraction (100% of base), not one pixel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    /// Bare JSON number.
    Number(f64),
    /// String form (`"50%"`, `"560px"`, `"0.25"`).
    Text(String),
}

impl From<f64> for DimensionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Resolve `value` against `base`, returning pixels.
///
/// Unparseable strings and non-finite results resolve to `0.0`.
pub fn parse_dimension(value: &DimensionValue, base: f64) -> f64 {
    let px = match value {
        DimensionValue::Number(v) => bare_number(*v, base),
        DimensionValue::Text(s) => parse_text(s, base).unwrap_or(0.0),
    };
    if px.is_finite() { px } else { 0.0 }
}

fn bare_number(v: f64, base: f64) -> f64 {
    if v <= 1.0 { v * base } else { v }
}

fn parse_text(s: &str, base: f64) -> Option<f64> {
    let t = s.trim();
    if let Some(pct) = t.strip_suffix('%') {
        let n = pct.trim().parse::<f64>().ok()?;
        return Some(n / 100.0 * base);
    }
    let lower = t.to_ascii_lowercase();
    if let Some(px) = lower.strip_suffix("px") {
        return px.trim().parse::<f64>().ok();
    }
    let n = t.parse::<f64>().ok()?;
    Some(bare_number(n, base))
}

#[cfg(test)]
#[path = "../../tests/unit/config/dimension.rs"]
mod tests;

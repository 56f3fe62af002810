//! Markup assembly helpers shared by all generators.

use crate::error::ConfigurationError;

/// Characters that would break out of an attribute value or a CSS declaration.
const FORBIDDEN_COLOR_CHARS: &[char] = &['<', '>', '"', '\'', '&', ';', '{', '}'];

/// Rectangle used for the root clip path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ClipRect {
    pub fn full(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// The pieces of a fragment, in the order they are emitted.
pub(crate) struct Fragment<'a> {
    pub width: f64,
    pub height: f64,
    pub rules: &'a [String],
    pub clip: ClipRect,
    pub definitions: &'a [String],
    pub elements: &'a [String],
}

impl Fragment<'_> {
    /// Root element: style block first, then definitions, then clipped shapes.
    pub fn assemble(&self) -> String {
        let (w, h) = (fmt_num(self.width), fmt_num(self.height));
        let mut defs = vec![format!(
            r#"<clipPath id="arrowClip"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            fmt_num(self.clip.x),
            fmt_num(self.clip.y),
            fmt_num(self.clip.width),
            fmt_num(self.clip.height)
        )];
        defs.extend(self.definitions.iter().cloned());

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <style>
{}
  </style>
  <defs>
{}
  </defs>
  <g clip-path="url(#arrowClip)">
{}
  </g>
</svg>"#,
            indent(self.rules, 4),
            indent(&defs, 4),
            indent(self.elements, 4),
        )
    }
}

fn indent(blocks: &[String], by: usize) -> String {
    let pad = " ".repeat(by);
    blocks
        .iter()
        .flat_map(|block| block.lines())
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    trimmed(format!("{:.2}", value))
}

/// Format seconds for CSS, e.g. `2s` or `1.25s`. Keeps millisecond precision.
pub fn fmt_secs(seconds: f64) -> String {
    format!("{}s", trimmed(format!("{:.3}", seconds)))
}

fn trimmed(fixed: String) -> String {
    let s = fixed.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Polyline point list from coordinate pairs.
pub fn points(pairs: &[(f64, f64)]) -> String {
    pairs
        .iter()
        .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Colors are free-form but must embed safely in attributes and CSS.
pub(crate) fn validate_color(color: &str) -> Result<(), ConfigurationError> {
    let trimmed = color.trim();
    if trimmed.is_empty() || trimmed.contains(FORBIDDEN_COLOR_CHARS) {
        return Err(ConfigurationError::InvalidColor(color.to_string()));
    }
    // A color token equal to an identifier would be caught by the suffix rewrite.
    for token in crate::rewrite::tokens(trimmed) {
        if let Some(identifier) = RESERVED_IDENTIFIERS.iter().copied().find(|id| *id == token) {
            return Err(ConfigurationError::ReservedColor {
                color: color.to_string(),
                identifier,
            });
        }
    }
    Ok(())
}

/// Every id, class and keyframe name any generator declares.
pub(crate) const RESERVED_IDENTIFIERS: &[&str] = &[
    "arrowClip",
    "arrow",
    "flow",
    "arrow-dim",
    "arrow-hi",
    "spotGrad",
    "spotMask",
    "spot-rect",
    "spotSweep",
    "spot-near",
    "spot-far",
    "spotNear",
    "spotFar",
    "group-left",
    "group-right",
    "group-top",
    "group-bottom",
    "spreadLeft",
    "spreadRight",
    "spreadTop",
    "spreadBottom",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(0.333333), "0.33");
        assert_eq!(fmt_num(-12.25), "-12.25");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_secs(2.0), "2s");
    }

    #[test]
    fn points_are_space_separated_pairs() {
        assert_eq!(points(&[(1.0, 2.5), (-3.0, 0.0)]), "1,2.5 -3,0");
    }

    #[test]
    fn color_validation() {
        assert!(validate_color("#0af").is_ok());
        assert!(validate_color("rgb(10, 20, 30)").is_ok());
        assert!(validate_color("  ").is_err());
        assert!(validate_color("red; background: url(x)").is_err());
        assert!(validate_color("\"><g>").is_err());
    }

    #[test]
    fn colors_may_not_reuse_identifiers() {
        assert_eq!(
            validate_color("flow"),
            Err(ConfigurationError::ReservedColor {
                color: "flow".to_string(),
                identifier: "flow"
            })
        );
        assert!(validate_color("var(--arrow)").is_err());
        assert!(validate_color("var(--arrow-color)").is_ok());
        assert!(validate_color("arrowhead").is_ok());
    }

    #[test]
    fn assembly_orders_style_before_shapes() {
        let rules = vec![".arrow { fill: none; }".to_string()];
        let elements = vec![r#"<polyline class="arrow" points="0,0 1,1"/>"#.to_string()];
        let out = Fragment {
            width: 20.0,
            height: 10.0,
            rules: &rules,
            clip: ClipRect::full(20.0, 10.0),
            definitions: &[],
            elements: &elements,
        }
        .assemble();

        assert!(out.starts_with("<svg "));
        assert!(out.ends_with("</svg>"));
        assert!(out.contains(r#"viewBox="0 0 20 10""#));
        let style = out.find("<style>").unwrap();
        let defs = out.find("<defs>").unwrap();
        let shape = out.find("<polyline").unwrap();
        assert!(style < defs && defs < shape);
    }
}

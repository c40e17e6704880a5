use crate::element::element_model::{ElementDescriptor, ElementKind};
use crate::resolver::resolver_model::{FieldEntry, FieldValue, Resolver};

// ============================================================================
// Built-in resolvers, listed in default priority order
// ============================================================================

/// Text-like inputs (text, email, hidden, password, search, tel, url).
/// The raw value is taken as a string.
pub struct TextResolver;

impl Resolver for TextResolver {
    fn name(&self) -> &str {
        "text"
    }

    fn try_resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry> {
        match el.kind {
            ElementKind::Text(_) => Some(FieldEntry::new(key, el.value.as_deref().unwrap_or(""))),
            _ => None,
        }
    }
}

/// Numeric inputs. The raw value is parsed; unparseable text yields NaN.
pub struct NumberResolver;

impl Resolver for NumberResolver {
    fn name(&self) -> &str {
        "number"
    }

    fn try_resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry> {
        match el.kind {
            ElementKind::Number => {
                let n = parse_number(el.value.as_deref().unwrap_or(""));
                Some(FieldEntry::new(key, n))
            }
            _ => None,
        }
    }
}

/// Single selects: the selected option's value.
pub struct SelectResolver;

impl Resolver for SelectResolver {
    fn name(&self) -> &str {
        "select"
    }

    fn try_resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry> {
        match el.kind {
            ElementKind::Select => Some(FieldEntry::new(key, el.value.as_deref().unwrap_or(""))),
            _ => None,
        }
    }
}

/// Multi selects: every selected option, positionally, duplicates kept.
pub struct SelectMultipleResolver;

impl Resolver for SelectMultipleResolver {
    fn name(&self) -> &str {
        "select_multiple"
    }

    fn try_resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry> {
        match el.kind {
            ElementKind::SelectMultiple => {
                let selected = el
                    .selected_options()
                    .map(|o| o.value_or_text().to_string())
                    .collect();
                Some(FieldEntry::new(key, FieldValue::Selection(selected)))
            }
            _ => None,
        }
    }
}

/// Default resolver set, highest priority first.
pub fn default_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(TextResolver),
        Box::new(NumberResolver),
        Box::new(SelectResolver),
        Box::new(SelectMultipleResolver),
    ]
}

// ============================================================================
// Number parsing
// ============================================================================

/// Parse a numeric input value the way a browser's `Number()` does.
///
/// Whitespace is trimmed and an empty string is 0. Hex, octal and binary
/// literals and signed `Infinity` are accepted. Anything else that is not a
/// plain decimal literal is NaN.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN)
}

// f64::from_str also takes "inf" and "NaN", which Number() rejects
fn is_decimal_literal(s: &str) -> bool {
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if !all_digits(int) || !all_digits(frac) || (int.is_empty() && frac.is_empty()) {
        return false;
    }

    match exponent {
        None => true,
        Some(e) => {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && all_digits(e)
        }
    }
}

use crate::element::element_model::{DomElement, ElementKind, TextKind};

/// Classify a raw element by its tag, then by its type attribute.
///
/// Selects are recognised by tag only; an `<input type="select">` does not
/// exist in HTML and is left unclassified.
pub fn classify(el: &DomElement) -> ElementKind {
    let tag = el.tag.to_ascii_lowercase();
    let input_type = el.r#type.as_deref().map(str::to_ascii_lowercase);

    match tag.as_str() {
        "input" => classify_input(input_type.as_deref()),
        "select" => {
            if el.multiple || input_type.as_deref() == Some("select-multiple") {
                ElementKind::SelectMultiple
            } else {
                ElementKind::Select
            }
        }
        _ => ElementKind::Unclassified,
    }
}

fn classify_input(input_type: Option<&str>) -> ElementKind {
    match input_type {
        // Missing type attribute renders as a text box
        None | Some("") | Some("text") => ElementKind::Text(TextKind::Text),
        Some("email") => ElementKind::Text(TextKind::Email),
        Some("hidden") => ElementKind::Text(TextKind::Hidden),
        Some("password") => ElementKind::Text(TextKind::Password),
        Some("search") => ElementKind::Text(TextKind::Search),
        Some("tel") => ElementKind::Text(TextKind::Tel),
        Some("url") => ElementKind::Text(TextKind::Url),

        Some("number") => ElementKind::Number,

        // checkbox, radio, file, date, submit...
        _ => ElementKind::Unclassified,
    }
}

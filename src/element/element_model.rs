use serde::{Deserialize, Serialize};

use crate::element::classifier::classify;

// ============================================================================
// Raw element records, as extracted from the page
// ============================================================================

/// A value-bearing element as reported by the host page.
///
/// This is the untyped boundary record: tag and type strings straight from
/// the DOM. It is classified once by `classify()` and never inspected by the
/// resolvers directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomElement {
    pub tag: String,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub options: Vec<DomOption>,

    /// Id of the nearest ancestor marked as a form root
    #[serde(rename = "formId", default)]
    pub form_id: Option<String>,

    /// Binding key stamped on the element at bind time
    #[serde(default)]
    pub key: Option<String>,

    /// Tag of the nested component the binding was applied to, if any
    #[serde(rename = "componentTag", default)]
    pub component_tag: Option<String>,

    /// Bound to a reactive expression. Such elements report values through
    /// the update hook and are never stamped or read by the resolvers.
    #[serde(default)]
    pub expression: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomOption {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub selected: bool,
}

// ============================================================================
// Typed classification
// ============================================================================

/// Input types whose value is read back verbatim as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Text,
    Email,
    Hidden,
    Password,
    Search,
    Tel,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text(TextKind),
    Number,
    Select,
    SelectMultiple,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Option<String>,
    pub text: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, selected: bool) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value: Some(value),
            selected,
        }
    }

    /// The option's `value` property: the value attribute when present (even
    /// if empty), otherwise the display text.
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.text)
    }

    /// Multi-select rule: the value, or the display text when the value is
    /// missing or empty.
    pub fn value_or_text(&self) -> &str {
        match self.value.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => &self.text,
        }
    }
}

impl From<&DomOption> for SelectOption {
    fn from(opt: &DomOption) -> Self {
        Self {
            value: opt.value.clone(),
            text: opt.text.clone(),
            selected: opt.selected,
        }
    }
}

/// What the resolvers see: a classified element with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub kind: ElementKind,
    pub value: Option<String>,
    pub options: Vec<SelectOption>,
}

impl ElementDescriptor {
    pub fn new(kind: ElementKind, value: Option<&str>) -> Self {
        Self {
            kind,
            value: value.map(str::to_string),
            options: Vec::new(),
        }
    }

    pub fn text(value: &str) -> Self {
        Self::new(ElementKind::Text(TextKind::Text), Some(value))
    }

    pub fn number(value: &str) -> Self {
        Self::new(ElementKind::Number, Some(value))
    }

    /// A single select whose value is the first selected option.
    pub fn select(options: Vec<SelectOption>) -> Self {
        let value = first_selected(&options);
        Self {
            kind: ElementKind::Select,
            value,
            options,
        }
    }

    pub fn select_multiple(options: Vec<SelectOption>) -> Self {
        Self {
            kind: ElementKind::SelectMultiple,
            value: None,
            options,
        }
    }

    pub fn unclassified() -> Self {
        Self::new(ElementKind::Unclassified, None)
    }

    /// Classify a raw element and copy out everything the resolvers need.
    pub fn from_dom(el: &DomElement) -> Self {
        let kind = classify(el);
        let options: Vec<SelectOption> = el.options.iter().map(SelectOption::from).collect();

        let value = match (kind, &el.value) {
            (ElementKind::Select, None) => first_selected(&options),
            (_, value) => value.clone(),
        };

        Self {
            kind,
            value,
            options,
        }
    }

    pub fn selected_options(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter().filter(|o| o.selected)
    }
}

fn first_selected(options: &[SelectOption]) -> Option<String> {
    options
        .iter()
        .find(|o| o.selected)
        .map(|o| o.value().to_string())
}

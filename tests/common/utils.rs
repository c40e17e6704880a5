use form_serialize::element::element_model::{DomElement, DomOption};

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    path.display().to_string()
}

pub fn dom(tag: &str, input_type: Option<&str>) -> DomElement {
    DomElement {
        tag: tag.to_string(),
        r#type: input_type.map(str::to_string),
        value: None,
        multiple: false,
        options: vec![],
        form_id: None,
        key: None,
        component_tag: None,
        expression: false,
    }
}

pub fn dom_option(value: &str, text: &str, selected: bool) -> DomOption {
    DomOption {
        value: Some(value.to_string()),
        text: text.to_string(),
        selected,
    }
}

/// Scratch directory under the system temp dir, unique per test name.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("form_serialize_{}", name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::element::element_model::DomElement;
use crate::error::FormError;
use crate::merge::{deep_merge::merge_all, merge_model::MergeOptions};
use crate::session::session::FormSession;
use crate::trace::logger::TraceLogger;

// ============================================================================
// collect subcommand
// ============================================================================

pub fn cmd_collect(
    elements_path: &str,
    form: Option<&str>,
    base_path: Option<&str>,
    output: Option<&str>,
    options: MergeOptions,
    tracer: Arc<TraceLogger>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let elements = load_elements(elements_path)?;
    let base = base_path.map(load_document).transpose()?;

    let mut session = FormSession::with_options(tracer, options);
    let stored = session.collect(&elements);

    if verbose > 0 {
        eprintln!(
            "Collected {} values from {} elements into {} forms",
            stored,
            elements.len(),
            session.store().len()
        );
    }

    let collected = collected_forms(&session, form, base.as_ref());
    write_output(&serde_json::to_string_pretty(&collected)?, output)
}

/// Output document for `collect`.
///
/// With a form id, that form alone; otherwise `{form_id: values}` for every
/// form. When a base document is given each form is merged onto it.
pub fn collected_forms(session: &FormSession, form: Option<&str>, base: Option<&Value>) -> Value {
    let render = |form_id: &str| match base {
        Some(base) => session.submit(form_id, base),
        None => session.form(form_id).to_json(),
    };

    match form {
        Some(form_id) => render(form_id),
        None => Value::Object(
            session
                .store()
                .form_ids()
                .map(|id| (id.to_string(), render(id)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

// ============================================================================
// merge subcommand
// ============================================================================

pub fn cmd_merge(
    files: &[String],
    output: Option<&str>,
    options: MergeOptions,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = files
        .iter()
        .map(|f| load_document(f))
        .collect::<Result<Vec<_>, _>>()?;

    if verbose > 0 {
        eprintln!("Merging {} documents ({:?})", documents.len(), options);
    }

    let merged = merge_all(&documents, &options)?;
    write_output(&serde_json::to_string_pretty(&merged)?, output)
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a JSON array of extracted elements.
pub fn load_elements(path: &str) -> Result<Vec<DomElement>, FormError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| FormError::JsonParse {
        context: path.to_string(),
        source,
    })
}

/// Load a JSON document, or YAML when the extension is `.yaml` / `.yml`.
pub fn load_document(path: &str) -> Result<Value, FormError> {
    let content = read_file(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .map_or(false, |e| e == "yaml" || e == "yml");

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| FormError::YamlParse {
            context: path.to_string(),
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| FormError::JsonParse {
            context: path.to_string(),
            source,
        })
    }
}

fn read_file(path: &str) -> Result<String, FormError> {
    std::fs::read_to_string(path).map_err(|source| FormError::Io {
        path: path.to_string(),
        source,
    })
}

fn write_output(content: &str, output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, format!("{}\n", content)).map_err(|source| {
            FormError::Io {
                path: path.to_string(),
                source,
            }
        })?,
        None => println!("{}", content),
    }
    Ok(())
}

use std::sync::{Arc, Mutex};

use form_serialize::{
    cli::commands::load_elements,
    element::element_model::{ElementDescriptor, ElementKind, SelectOption},
    merge::merge_model::{ArrayMergeKind, MergeOptions},
    resolver::resolver_model::{FieldEntry, FieldValue, FnResolver},
    session::session::{BindingStamp, FormSession},
    trace::logger::TraceLogger,
};
use serde_json::json;

use crate::common::utils::{dom, fixture};

mod common;

fn capturing_session() -> (FormSession, Arc<TraceLogger>) {
    let tracer = Arc::new(TraceLogger::capturing());
    (FormSession::new(Arc::clone(&tracer)), tracer)
}

// =========================================================================
// Binding hooks
// =========================================================================

#[test]
fn bind_stamps_key_and_component_tag() {
    let (session, _) = capturing_session();

    let mut el = dom("input", Some("text"));
    el.key = Some("email".into());
    assert_eq!(
        session.bind(&el),
        Some(BindingStamp {
            key: Some("email".into()),
            tag: None
        })
    );

    el.component_tag = Some("date-picker".into());
    let stamp = session.bind(&el).unwrap();
    assert_eq!(stamp.tag.as_deref(), Some("date-picker"));
    assert!(session.store().is_empty(), "Binding never stores values");
}

#[test]
fn expression_binding_is_not_stamped() {
    let (session, _) = capturing_session();

    let mut el = dom("input", Some("text"));
    el.key = Some("email".into());
    el.expression = true;

    assert_eq!(session.bind(&el), None);
}

#[test]
fn collect_skips_expression_bound_elements() {
    let (mut session, _) = capturing_session();

    let mut plain = dom("input", Some("text"));
    plain.form_id = Some("profile".into());
    plain.key = Some("name".into());
    plain.value = Some("Ada".into());

    let mut reactive = plain.clone();
    reactive.key = Some("nick".into());
    reactive.expression = true;

    assert_eq!(session.collect(&[plain, reactive]), 1);
    assert_eq!(session.form("profile").to_json(), json!({ "name": "Ada" }));

    assert!(session.update("profile", "nick", "ada".into()));
    assert_eq!(
        session.form("profile").to_json(),
        json!({ "name": "Ada", "nick": "ada" })
    );
}

#[test]
fn update_writes_binding_value_directly() {
    let (mut session, _) = capturing_session();
    session.open_form("profile");

    assert!(session.update("profile", "age", FieldValue::Number(30.0)));
    assert_eq!(session.form("profile").to_json(), json!({ "age": 30 }));
}

#[test]
fn update_on_unknown_form_root_is_diagnosed() {
    let (mut session, tracer) = capturing_session();

    assert!(!session.update("nowhere", "k", "v".into()));
    assert_eq!(tracer.events_for("unknown_form").len(), 1);
}

// =========================================================================
// Capture (resolve + store)
// =========================================================================

#[test]
fn capture_resolves_and_stores() {
    let (mut session, _) = capturing_session();
    session.open_form("order");

    let entry = session.capture("order", "qty", &ElementDescriptor::number("3"));
    assert_eq!(entry, Some(FieldEntry::new("qty", 3.0)));

    let select = ElementDescriptor::select(vec![SelectOption::new("express", true)]);
    session.capture("order", "shipping", &select);

    assert_eq!(
        session.form("order").to_json(),
        json!({ "qty": 3, "shipping": "express" })
    );
}

#[test]
fn capture_of_unclassified_element_stores_nothing() {
    let (mut session, tracer) = capturing_session();
    session.open_form("order");

    assert!(session.capture("order", "terms", &ElementDescriptor::unclassified()).is_none());
    assert!(session.form("order").is_empty());

    let events = tracer.events_for("no_match");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key.as_deref(), Some("terms"));
}

#[test]
fn capture_into_unknown_form_returns_none() {
    let (mut session, tracer) = capturing_session();

    assert!(session.capture("ghost", "name", &ElementDescriptor::text("x")).is_none());
    assert_eq!(tracer.events_for("unknown_form").len(), 1);
}

#[test]
fn registered_resolver_applies_to_capture() {
    let (mut session, tracer) = capturing_session();
    session.register_resolver(Box::new(FnResolver::new(
        "trimmed_text",
        |el: &ElementDescriptor, key: &str| match el.kind {
            ElementKind::Text(_) => Some(FieldEntry::new(
                key,
                el.value.as_deref().unwrap_or("").trim(),
            )),
            _ => None,
        },
    )));
    session.open_form("f");

    session.capture("f", "name", &ElementDescriptor::text("  Ada  "));

    assert_eq!(session.form("f").to_json(), json!({ "name": "Ada" }));
    assert_eq!(session.resolvers().names()[0], "trimmed_text");
    assert_eq!(tracer.events_for("register_resolver").len(), 1);
}

// =========================================================================
// Collecting a whole page
// =========================================================================

#[test]
fn collect_fixture_page() {
    let (mut session, tracer) = capturing_session();
    let elements = load_elements(&fixture("elements.json")).unwrap();

    let stored = session.collect(&elements);

    assert_eq!(stored, 6, "Checkbox, button and form-less input are skipped");
    assert_eq!(
        session.store().form_ids().collect::<Vec<_>>(),
        vec!["signup", "search"]
    );
    assert_eq!(
        session.form("signup").to_json(),
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "age": 42,
            "country": "uy",
            "tags": { "0": "a", "1": "C" }
        })
    );
    assert_eq!(session.form("search").to_json(), json!({ "q": "rust" }));

    assert_eq!(tracer.events_for("no_match").len(), 1, "Only the checkbox misses");
    assert!(
        tracer.events_for("duplicate_form").is_empty(),
        "Each form is opened once"
    );
}

// =========================================================================
// Submission
// =========================================================================

#[test]
fn submit_merges_form_over_base_model() {
    let (mut session, _) = capturing_session();
    session.open_form("signup");
    session.update("signup", "name", "Ada".into());
    session.update("signup", "age", FieldValue::Number(36.0));
    session.update(
        "signup",
        "tags",
        FieldValue::Selection(vec!["a".into(), "b".into()]),
    );

    let base = json!({
        "name": "",
        "age": 0,
        "tags": { "0": "z", "5": "kept" },
        "meta": { "source": "web" }
    });

    assert_eq!(
        session.submit("signup", &base),
        json!({
            "name": "Ada",
            "age": 36,
            "tags": { "0": "a", "5": "kept", "1": "b" },
            "meta": { "source": "web" }
        })
    );
}

#[test]
fn submit_of_unknown_form_returns_base_fields() {
    let (session, _) = capturing_session();
    let base = json!({ "keep": [1, 2] });

    assert_eq!(session.submit("missing", &base), base);
}

#[test]
fn session_keeps_its_merge_options() {
    let tracer = Arc::new(TraceLogger::disabled());
    let options = MergeOptions::new().with_array_merge_kind(ArrayMergeKind::Replace);
    let mut session = FormSession::with_options(tracer, options);
    session.open_form("f");
    session.update("f", "tags", FieldValue::Selection(vec!["x".into()]));

    let submitted = session.submit("f", &json!({ "tags": { "0": "old", "1": "older" } }));
    assert_eq!(submitted, json!({ "tags": { "0": "x", "1": "older" } }));
    assert_eq!(session.options().array_merge.name(), "replace");
}

// =========================================================================
// Shared use
// =========================================================================

#[test]
fn session_behind_a_mutex_accepts_writes_from_threads() {
    let session = Mutex::new(FormSession::default());
    session.lock().unwrap().open_form("shared");

    std::thread::scope(|s| {
        for i in 0..4 {
            let session = &session;
            s.spawn(move || {
                let key = format!("field_{}", i);
                session
                    .lock()
                    .unwrap()
                    .update("shared", &key, FieldValue::Number(i as f64));
            });
        }
    });

    let form = session.lock().unwrap().form("shared");
    assert_eq!(form.len(), 4);
    assert_eq!(form.get("field_2"), Some(&FieldValue::Number(2.0)));
}

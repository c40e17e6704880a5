use std::sync::Arc;

use form_serialize::{
    form::{form_model::FormData, store::FormStore},
    resolver::resolver_model::FieldValue,
    trace::{logger::TraceLogger, trace::TraceLevel},
};
use serde_json::json;

fn capturing_store() -> (FormStore, Arc<TraceLogger>) {
    let tracer = Arc::new(TraceLogger::capturing());
    (FormStore::new(Arc::clone(&tracer)), tracer)
}

// =========================================================================
// Form creation
// =========================================================================

#[test]
fn put_form_creates_empty_form() {
    let (mut store, tracer) = capturing_store();

    assert!(store.put_form("login"));
    assert!(store.contains_form("login"));
    assert!(store.get_form("login").is_empty());
    assert!(tracer.events().is_empty(), "No diagnostics on first creation");
}

#[test]
fn duplicate_put_form_keeps_existing_data() {
    let (mut store, tracer) = capturing_store();

    store.put_form("login");
    store.put_value_in_form("login", "user", "ada".into());
    let before = store.get_form("login");

    assert!(!store.put_form("login"), "Second creation is a no-op");
    assert_eq!(store.get_form("login"), before);
    assert_eq!(store.len(), 1);

    let events = tracer.events_for("duplicate_form");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, TraceLevel::Warn);
    assert_eq!(events[0].form_id.as_deref(), Some("login"));
}

// =========================================================================
// Reading
// =========================================================================

#[test]
fn get_form_of_unknown_id_is_empty_and_does_not_create() {
    let (store, tracer) = capturing_store();

    assert!(store.get_form("ghost").is_empty());
    assert!(!store.contains_form("ghost"));
    assert!(store.form("ghost").is_none());
    assert!(tracer.events().is_empty(), "Reading is silent");
}

#[test]
fn get_form_returns_an_isolated_copy() {
    let (mut store, _) = capturing_store();
    store.put_form("f");
    store.put_value_in_form("f", "a", "1".into());

    let mut copy = store.get_form("f");
    copy.set("a", "changed".into());
    copy.set("b", "added".into());

    assert_eq!(store.get_form("f").get("a"), Some(&FieldValue::Text("1".into())));
    assert!(!store.get_form("f").contains_key("b"));
}

// =========================================================================
// Writing
// =========================================================================

#[test]
fn later_write_to_same_key_wins() {
    let (mut store, _) = capturing_store();
    store.put_form("f");

    store.put_value_in_form("f", "k", "v1".into());
    store.put_value_in_form("f", "k", "v2".into());

    let form = store.get_form("f");
    assert_eq!(form.get("k"), Some(&FieldValue::Text("v2".into())));
    assert_eq!(form.len(), 1);
}

#[test]
fn write_to_unknown_form_is_ignored_with_diagnostic() {
    let (mut store, tracer) = capturing_store();

    assert!(!store.put_value_in_form("ghost", "k", "v".into()));
    assert!(!store.contains_form("ghost"), "Unknown form is not created");
    assert!(store.is_empty());

    let events = tracer.events_for("unknown_form");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].form_id.as_deref(), Some("ghost"));
    assert_eq!(events[0].key.as_deref(), Some("k"));
}

#[test]
fn forms_do_not_leak_into_each_other() {
    let (mut store, _) = capturing_store();
    store.put_form("f1");
    store.put_form("f2");

    store.put_value_in_form("f1", "only_in_f1", FieldValue::Number(1.0));
    store.put_value_in_form("f2", "only_in_f2", FieldValue::Number(2.0));

    assert!(!store.get_form("f2").contains_key("only_in_f1"));
    assert!(!store.get_form("f1").contains_key("only_in_f2"));
}

// =========================================================================
// JSON output
// =========================================================================

#[test]
fn store_json_lists_forms_in_creation_order() {
    let (mut store, _) = capturing_store();
    store.put_form("zeta");
    store.put_form("alpha");
    store.put_value_in_form("alpha", "n", FieldValue::Number(3.0));
    store.put_value_in_form("zeta", "tags", FieldValue::Selection(vec!["x".into()]));

    assert_eq!(store.form_ids().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    assert_eq!(
        store.to_json(),
        json!({ "zeta": { "tags": { "0": "x" } }, "alpha": { "n": 3 } })
    );
    assert_eq!(
        serde_json::to_string(&store.to_json()).unwrap(),
        r#"{"zeta":{"tags":{"0":"x"}},"alpha":{"n":3}}"#
    );
}

#[test]
fn duplicate_put_form_keeps_creation_order() {
    let (mut store, _) = capturing_store();
    store.put_form("a");
    store.put_form("b");
    store.put_value_in_form("a", "k", "v".into());

    assert!(!store.put_form("a"));
    assert_eq!(store.len(), 2);
    assert_eq!(store.form_ids().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(store.get_form("a").len(), 1, "Existing data survives");
}

#[test]
fn form_data_overwrite_keeps_original_position() {
    let mut form = FormData::new();
    form.set("first", "1".into());
    form.set("second", "2".into());
    form.set("first", "again".into());

    assert_eq!(form.keys().collect::<Vec<_>>(), vec!["first", "second"]);
    assert_eq!(form.to_json(), json!({ "first": "again", "second": "2" }));
}

#[test]
fn field_values_serialize_to_plain_json() {
    let mut form = FormData::new();
    form.set("name", "Ada".into());
    form.set("age", FieldValue::Number(36.0));
    form.set("ratio", FieldValue::Number(0.25));
    form.set("bad", FieldValue::Number(f64::NAN));

    assert_eq!(
        serde_json::to_value(form.get("age").unwrap()).unwrap(),
        json!(36)
    );
    assert_eq!(
        form.to_json(),
        json!({ "name": "Ada", "age": 36, "ratio": 0.25, "bad": null })
    );
}

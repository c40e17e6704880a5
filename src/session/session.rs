use std::sync::Arc;

use serde_json::Value;

use crate::element::element_model::{DomElement, ElementDescriptor};
use crate::form::{form_model::FormData, store::FormStore};
use crate::merge::{deep_merge::merge, merge_model::MergeOptions};
use crate::resolver::{
    chain::ResolverChain,
    resolver_model::{FieldEntry, FieldValue, Resolver},
};
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

/// Metadata stamped on an element when it is first bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingStamp {
    /// `data-ajaxform-key`
    pub key: Option<String>,
    /// `data-ajaxform-tag`, only for nested components
    pub tag: Option<String>,
}

/// Everything a page needs to serialize its forms: the resolver chain, the
/// form store and the merge options used on submission.
///
/// Created once per page or session and handed to every caller.
pub struct FormSession {
    resolvers: ResolverChain,
    store: FormStore,
    options: MergeOptions,
    tracer: Arc<TraceLogger>,
}

impl FormSession {
    pub fn new(tracer: Arc<TraceLogger>) -> Self {
        Self::with_options(tracer, MergeOptions::default())
    }

    pub fn with_options(tracer: Arc<TraceLogger>, options: MergeOptions) -> Self {
        Self {
            resolvers: ResolverChain::new(),
            store: FormStore::new(Arc::clone(&tracer)),
            options,
            tracer,
        }
    }

    // ---- Resolvers ----

    /// Register a resolver ahead of every existing one.
    pub fn register_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.tracer
            .log(&TraceEvent::info("register_resolver").with_message(resolver.name()));
        self.resolvers.register(resolver);
    }

    pub fn resolvers(&self) -> &ResolverChain {
        &self.resolvers
    }

    /// Run the resolver chain. A miss is traced, not treated as an error.
    pub fn resolve(&self, el: &ElementDescriptor, key: &str) -> Option<FieldEntry> {
        let resolved = self.resolvers.resolve(el, key);
        if resolved.is_none() {
            self.tracer.log(
                &TraceEvent::info("no_match")
                    .with_key(key)
                    .with_message(format!("no resolver for {:?}", el.kind)),
            );
        }
        resolved
    }

    // ---- Binding hooks ----

    /// Initial bind: the stamp to put on the element, or `None` for an
    /// expression binding, whose values only arrive through `update`.
    /// No values are stored.
    pub fn bind(&self, el: &DomElement) -> Option<BindingStamp> {
        if el.expression {
            return None;
        }

        Some(BindingStamp {
            key: el.key.clone(),
            tag: el.component_tag.clone(),
        })
    }

    pub fn open_form(&mut self, form_id: &str) -> bool {
        self.store.put_form(form_id)
    }

    /// A bound value changed. The value comes straight from the binding.
    pub fn update(&mut self, form_id: &str, key: &str, value: FieldValue) -> bool {
        self.store.put_value_in_form(form_id, key, value)
    }

    /// Read the element's value through the resolvers and store it.
    /// Returns the stored entry, or `None` when no resolver matches or the
    /// form does not exist.
    pub fn capture(
        &mut self,
        form_id: &str,
        key: &str,
        el: &ElementDescriptor,
    ) -> Option<FieldEntry> {
        let entry = self.resolve(el, key)?;
        self.store
            .put_value_in_form(form_id, &entry.key, entry.value.clone())
            .then_some(entry)
    }

    /// Open every form the elements belong to and capture each keyed
    /// element not bound to an expression. Returns the number of values
    /// stored.
    pub fn collect(&mut self, elements: &[DomElement]) -> usize {
        for el in elements {
            if let Some(form_id) = &el.form_id {
                if !self.store.contains_form(form_id) {
                    self.store.put_form(form_id);
                }
            }
        }

        let mut stored = 0;
        for el in elements {
            let (Some(form_id), Some(key), false) = (&el.form_id, &el.key, el.expression) else {
                continue;
            };

            let descriptor = ElementDescriptor::from_dom(el);
            if self.capture(form_id, key, &descriptor).is_some() {
                stored += 1;
            }
        }
        stored
    }

    // ---- Reading back ----

    pub fn form(&self, form_id: &str) -> FormData {
        self.store.get_form(form_id)
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// The form's values merged over `base`. Collected values win on
    /// conflicts; objects and arrays merge recursively.
    pub fn submit(&self, form_id: &str, base: &Value) -> Value {
        merge(base, &self.store.get_form(form_id).to_json(), &self.options)
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(Arc::new(TraceLogger::disabled()))
    }
}

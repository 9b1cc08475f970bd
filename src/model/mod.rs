//! Model base type: layered derivation, per-instance events, attributes,
//! and the fetch lifecycle.
//!
//! `ModelType` is a derivable type descriptor; `Model` is an instance
//! handle. Cloning a `Model` clones the handle, not the instance, so a
//! spawned fetch task and the caller observe the same attributes and
//! event channel.

pub mod attributes;
mod fetch;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::descriptor::TypeDescriptor;
use crate::events::{Callback, Emitter};
use crate::transport::Transport;

use self::attributes::AttributeStore;

pub use self::fetch::{FETCH_ERROR, FETCH_FINISHED, FETCH_STARTED};

/// Constructor hook invoked on every new instance.
pub const INITIALIZE: &str = "initialize";

/// Member name the fetch URL may be resolved from when the instance has
/// none of its own.
pub const URL: &str = "url";

/// A method member: invoked with the instance handle as receiver plus
/// the call arguments.
pub type ModelMethod = Arc<dyn Fn(&Model, &[Value]) -> Value + Send + Sync>;

/// One named member on a model type's layer: a JSON constant or a method.
#[derive(Clone)]
pub enum ModelMember {
    Value(Value),
    Method(ModelMethod),
}

impl ModelMember {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&Model, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Method(Arc::new(f))
    }
}

/// Options passed to `create`. `params` is handed to the `initialize`
/// member untouched.
#[derive(Default)]
pub struct ModelOptions {
    pub url: Option<String>,
    pub params: Value,
}

impl ModelOptions {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            params: Value::Null,
        }
    }
}

/// A derivable model type.
///
/// `extend` shares every ancestor layer by reference: a later `define` on
/// a base type is visible through derived types and existing instances
/// for members they do not shadow.
#[derive(Clone)]
pub struct ModelType {
    descriptor: TypeDescriptor<ModelMember>,
    transport: Arc<dyn Transport>,
}

impl ModelType {
    /// The root model type. Its base layer carries the default no-op
    /// `initialize` hook; `transport` is inherited by every derived type
    /// and instance.
    pub fn base(transport: Arc<dyn Transport>) -> Self {
        let descriptor = TypeDescriptor::root([(
            INITIALIZE.to_string(),
            ModelMember::method(|_model, _args| Value::Null),
        )]);
        Self {
            descriptor,
            transport,
        }
    }

    /// Derive a new type whose own layer holds `overrides`. Empty
    /// overrides yield a trivial subtype identical in behavior.
    pub fn extend<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, ModelMember)>,
    {
        Self {
            descriptor: self.descriptor.derive(overrides),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Define or replace a member on this type's own layer, in place.
    /// Existing instances observe the change unless they shadow it.
    pub fn define(&self, name: impl Into<String>, member: ModelMember) {
        self.descriptor.own_layer().set(name, member);
    }

    /// Resolve a member through the chain, most-derived first.
    pub fn member(&self, name: &str) -> Option<ModelMember> {
        self.descriptor.resolve(name)
    }

    /// Allocate an instance, wire its fields from `options`, then invoke
    /// the resolved `initialize` member with `options.params`.
    pub fn create(&self, options: ModelOptions) -> Model {
        let model = Model {
            inner: Arc::new(ModelInner {
                descriptor: self.descriptor.clone(),
                transport: Arc::clone(&self.transport),
                attributes: AttributeStore::new(),
                events: Emitter::new(),
                url: RwLock::new(options.url),
            }),
        };
        let _ = model.call(INITIALIZE, &[options.params]);
        model
    }
}

struct ModelInner {
    descriptor: TypeDescriptor<ModelMember>,
    transport: Arc<dyn Transport>,
    attributes: AttributeStore,
    events: Emitter<Model>,
    url: RwLock<Option<String>>,
}

/// An instance handle. Clones refer to the same instance.
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    // --- events ---

    /// Bind `callback` for `event`, optionally with a bound context the
    /// callback receives instead of this instance. No de-duplication.
    pub fn on(&self, event: &str, callback: Callback<Model>, context: Option<Model>) {
        self.inner.events.on(event, callback, context);
    }

    /// Unbind every listener for `event` whose callback is pointer-equal
    /// to `callback`. Never bound: no-op.
    pub fn off(&self, event: &str, callback: &Callback<Model>) {
        self.inner.events.off(event, callback);
    }

    /// Invoke every listener currently bound for `event` in bind order,
    /// forwarding `args`. No listeners: no-op.
    pub fn trigger(&self, event: &str, args: &[Value]) {
        self.inner.events.emit(event, self, args);
    }

    // --- attributes ---

    /// Current attribute value, or `None` if never set.
    pub fn attr(&self, name: &str) -> Option<Value> {
        self.inner.attributes.get(name)
    }

    /// Set an attribute, silently overwriting. Emits nothing.
    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.inner.attributes.set(name, value.into());
    }

    /// Independent snapshot of all attributes.
    pub fn to_json(&self) -> Map<String, Value> {
        self.inner.attributes.snapshot()
    }

    // --- members ---

    /// Resolve a member through this instance's chain.
    pub fn member(&self, name: &str) -> Option<ModelMember> {
        self.inner.descriptor.resolve(name)
    }

    /// Invoke a resolved method member with this instance as receiver.
    /// A `Value` member resolves as a constant; an unresolved name
    /// returns `None`.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Value> {
        match self.member(name)? {
            ModelMember::Method(method) => Some(method(self, args)),
            ModelMember::Value(value) => Some(value),
        }
    }

    // --- url ---

    /// The fetch URL: the instance's own slot if set, else a string
    /// `url` member resolved through the chain.
    pub fn url(&self) -> Option<String> {
        if let Some(url) = self.inner.url.read().clone() {
            return Some(url);
        }
        match self.member(URL) {
            Some(ModelMember::Value(Value::String(url))) => Some(url),
            _ => None,
        }
    }

    /// Set this instance's own fetch URL, shadowing any `url` member.
    pub fn set_url(&self, url: impl Into<String>) {
        *self.inner.url.write() = Some(url.into());
    }

    fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.inner.transport)
    }
}

/// Instance identity: two handles are equal iff they refer to the same
/// instance.
impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Model {}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("url", &self.url())
            .field("attributes", &self.to_json())
            .finish()
    }
}

/// A model serializes as its attribute snapshot.
impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Value::Object(self.to_json()).serialize(serializer)
    }
}

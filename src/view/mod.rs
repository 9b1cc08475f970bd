//! View base type: a derivable shell around an externally supplied
//! render target.
//!
//! A view owns no state beyond its element handle; `render` is an
//! identity no-op designed to be overridden by derived types that
//! populate the element.

use std::sync::Arc;

use serde_json::Value;

use crate::descriptor::TypeDescriptor;
use crate::dom::Queryable;

/// Constructor hook invoked on every new instance.
pub const INITIALIZE: &str = "initialize";

/// The overridable render hook.
pub const RENDER: &str = "render";

/// A method member: invoked with the instance handle as receiver plus
/// the call arguments.
pub type ViewMethod = Arc<dyn Fn(&View, &[Value]) -> Value + Send + Sync>;

/// One named member on a view type's layer.
#[derive(Clone)]
pub enum ViewMember {
    Value(Value),
    Method(ViewMethod),
}

impl ViewMember {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&View, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Method(Arc::new(f))
    }
}

/// Options passed to `create`. `el` is the render target; `params` is
/// handed to the `initialize` member untouched.
#[derive(Default)]
pub struct ViewOptions {
    pub el: Option<Arc<dyn Queryable>>,
    pub params: Value,
}

impl ViewOptions {
    pub fn with_el(el: Arc<dyn Queryable>) -> Self {
        Self {
            el: Some(el),
            params: Value::Null,
        }
    }
}

/// A derivable view type. Layer sharing and resolution behave exactly as
/// for model types.
#[derive(Clone)]
pub struct ViewType {
    descriptor: TypeDescriptor<ViewMember>,
}

impl ViewType {
    /// The root view type: no-op `initialize` and identity `render`.
    pub fn base() -> Self {
        let descriptor = TypeDescriptor::root([
            (
                INITIALIZE.to_string(),
                ViewMember::method(|_view, _args| Value::Null),
            ),
            (
                RENDER.to_string(),
                ViewMember::method(|_view, _args| Value::Null),
            ),
        ]);
        Self { descriptor }
    }

    /// Derive a new type whose own layer holds `overrides`.
    pub fn extend<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, ViewMember)>,
    {
        Self {
            descriptor: self.descriptor.derive(overrides),
        }
    }

    /// Define or replace a member on this type's own layer, in place.
    pub fn define(&self, name: impl Into<String>, member: ViewMember) {
        self.descriptor.own_layer().set(name, member);
    }

    /// Resolve a member through the chain, most-derived first.
    pub fn member(&self, name: &str) -> Option<ViewMember> {
        self.descriptor.resolve(name)
    }

    /// Allocate an instance, wire its element from `options`, then invoke
    /// the resolved `initialize` member with `options.params`.
    pub fn create(&self, options: ViewOptions) -> View {
        let view = View {
            inner: Arc::new(ViewInner {
                descriptor: self.descriptor.clone(),
                el: options.el,
            }),
        };
        let _ = view.call(INITIALIZE, &[options.params]);
        view
    }
}

struct ViewInner {
    descriptor: TypeDescriptor<ViewMember>,
    el: Option<Arc<dyn Queryable>>,
}

/// An instance handle. Clones refer to the same instance.
#[derive(Clone)]
pub struct View {
    inner: Arc<ViewInner>,
}

impl View {
    /// The render target this view was created with, if any.
    pub fn el(&self) -> Option<Arc<dyn Queryable>> {
        self.inner.el.clone()
    }

    /// Scoped element lookup within the render target. `None` when the
    /// view was created without one.
    pub fn dom(&self, selector: &str) -> Option<Arc<dyn Queryable>> {
        self.inner.el.as_ref().map(|el| el.find(selector))
    }

    /// Invoke the resolved `render` member and return this instance for
    /// chaining. The base definition changes nothing.
    pub fn render(&self) -> View {
        let _ = self.call(RENDER, &[]);
        self.clone()
    }

    /// Resolve a member through this instance's chain.
    pub fn member(&self, name: &str) -> Option<ViewMember> {
        self.inner.descriptor.resolve(name)
    }

    /// Invoke a resolved method member with this instance as receiver.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Value> {
        match self.member(name)? {
            ViewMember::Method(method) => Some(method(self, args)),
            ViewMember::Value(value) => Some(value),
        }
    }
}

/// Instance identity: two handles are equal iff they refer to the same
/// instance.
impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for View {}

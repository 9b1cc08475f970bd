//! # simplekit
//!
//! Minimal event-driven model/view micro-framework.
//!
//! Two base types, [`model::ModelType`] and [`view::ViewType`], are
//! derived from with `extend`. Derivation is layered and live: ancestor
//! layers are shared by reference and resolved at call time, so defining
//! a member on a base type later is visible through every derived type
//! and existing instance that does not shadow it.
//!
//! A model instance owns an ordered per-instance event channel
//! (`on` / `off` / `trigger`), a flat JSON attribute store
//! (`attr` / `set_attr` / `to_json`), and a single-shot fetch lifecycle
//! that maps one outbound JSON read onto the `fetch:started`,
//! `fetch:finished` and `fetch:error` events. A view instance holds an
//! externally supplied render target behind the [`dom::Queryable`]
//! trait and an overridable identity `render` hook.
//!
//! The HTTP transport is a trait object so tests substitute a
//! deterministic fake; [`transport::HttpTransport`] is the production
//! implementation.

pub mod descriptor;
pub mod dom;
pub mod events;
pub mod model;
pub mod transport;
pub mod view;

pub use descriptor::{Layer, TypeDescriptor};
pub use dom::Queryable;
pub use events::{Callback, Emitter};
pub use model::{
    Model, ModelMember, ModelOptions, ModelType, FETCH_ERROR, FETCH_FINISHED, FETCH_STARTED,
};
pub use transport::{HttpTransport, Transport, TransportError};
pub use view::{View, ViewMember, ViewOptions, ViewType};

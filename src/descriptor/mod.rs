//! Layered member resolution backing the `extend` mechanism.
//!
//! A type is described by an ordered chain of layers, most-derived first.
//! Each layer is a shared-ownership handle to a mutable name → member map.
//! Deriving a new type prepends a fresh layer and shares every ancestor
//! layer by reference, so a later mutation of an ancestor layer is visible
//! through all derived types and their existing instances unless a closer
//! layer shadows the member.
//!
//! Resolution walks the chain at call time. Nothing is cached at
//! derivation time.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// One set of named members contributed at a single derivation step.
///
/// Cloning a `Layer` clones the handle, not the map: all clones observe
/// the same members.
pub struct Layer<M> {
    members: Arc<RwLock<HashMap<String, M>>>,
}

impl<M> Clone for Layer<M> {
    fn clone(&self) -> Self {
        Self {
            members: Arc::clone(&self.members),
        }
    }
}

impl<M: Clone> Layer<M> {
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (String, M)>,
    {
        Self {
            members: Arc::new(RwLock::new(members.into_iter().collect())),
        }
    }

    /// Look up a member defined directly on this layer.
    pub fn get(&self, name: &str) -> Option<M> {
        self.members.read().get(name).cloned()
    }

    /// Define or replace a member on this layer in place.
    ///
    /// Takes effect for every type and instance sharing the layer.
    pub fn set(&self, name: impl Into<String>, member: M) {
        self.members.write().insert(name.into(), member);
    }

    /// Remove a member from this layer. Resolution falls through to
    /// ancestor layers afterwards.
    pub fn remove(&self, name: &str) -> Option<M> {
        self.members.write().remove(name)
    }
}

/// The resolution chain for one type: layers ordered most-derived first.
pub struct TypeDescriptor<M> {
    layers: Vec<Layer<M>>,
}

impl<M> Clone for TypeDescriptor<M> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
        }
    }
}

impl<M: Clone> TypeDescriptor<M> {
    /// A root descriptor with a single base layer.
    pub fn root<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (String, M)>,
    {
        Self {
            layers: vec![Layer::new(members)],
        }
    }

    /// Derive a new descriptor whose own layer holds `overrides` and whose
    /// ancestor layers are shared with `self`.
    ///
    /// Empty overrides produce a trivial subtype identical in behavior.
    pub fn derive<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, M)>,
    {
        let mut layers = Vec::with_capacity(self.layers.len() + 1);
        layers.push(Layer::new(overrides));
        layers.extend(self.layers.iter().cloned());
        Self { layers }
    }

    /// Resolve `name` by walking the chain most-derived first, returning
    /// the first definition found.
    pub fn resolve(&self, name: &str) -> Option<M> {
        self.layers.iter().find_map(|layer| layer.get(name))
    }

    /// The most-derived layer, the one `derive` created for this type.
    pub fn own_layer(&self) -> &Layer<M> {
        &self.layers[0]
    }

    /// Number of layers in the chain.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

// flo/src/registry.rs

//! Defines `TypeRegistry`, an explicit, host-populated resolver keyed by type.

use crate::error::{FloError, FloResult};
use crate::resolver::{Resolved, Resolver, TypeKey};
use anyhow::anyhow;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

type Factory = Arc<dyn Fn() -> anyhow::Result<Resolved> + Send + Sync>;

/// A resolver backed by a `TypeId -> factory` map.
///
/// Wrap it in an `Arc` to share it with builders while still registering new types
/// afterwards; lookups only take the read lock. Unregistered types and failing factories
/// resolve to `FloError::UnresolvableType`.
#[derive(Default)]
pub struct TypeRegistry {
  factories: RwLock<HashMap<TypeId, Factory>>,
}

impl TypeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `factory` as the way to build a `T`, replacing any previous registration.
  pub fn register<T, F>(&self, factory: F) -> &Self
  where
    T: Send + 'static,
    F: Fn() -> T + Send + Sync + 'static,
  {
    self.insert::<T>(Arc::new(move || Ok(Box::new(factory()) as Resolved)))
  }

  /// Registers a fallible factory. A failure surfaces as `FloError::UnresolvableType`
  /// when a step asks for a `T`.
  pub fn try_register<T, F>(&self, factory: F) -> &Self
  where
    T: Send + 'static,
    F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
  {
    self.insert::<T>(Arc::new(move || factory().map(|instance| Box::new(instance) as Resolved)))
  }

  /// Registers `T::default` as the way to build a `T`.
  pub fn register_default<T: Default + Send + 'static>(&self) -> &Self {
    self.register(T::default)
  }

  pub fn contains<T: 'static>(&self) -> bool {
    self.factories.read().contains_key(&TypeId::of::<T>())
  }

  pub fn len(&self) -> usize {
    self.factories.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.factories.read().is_empty()
  }

  fn insert<T: 'static>(&self, factory: Factory) -> &Self {
    event!(Level::DEBUG, type_name = %std::any::type_name::<T>(), "Registering type factory.");
    self.factories.write().insert(TypeId::of::<T>(), factory);
    self
  }
}

impl Resolver for TypeRegistry {
  fn resolve(&self, key: &TypeKey) -> FloResult<Option<Resolved>> {
    // Clone the factory out so the lock is not held while user code runs.
    let factory = self.factories.read().get(&key.id()).cloned();
    let factory = factory.ok_or_else(|| FloError::unresolvable(key.name(), anyhow!("type is not registered")))?;

    factory()
      .map(Some)
      .map_err(|source| FloError::unresolvable(key.name(), source))
  }
}

impl std::fmt::Debug for TypeRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TypeRegistry").field("registered", &self.len()).finish()
  }
}

// flo/src/resolver.rs

//! Type-based handler resolution.
//!
//! A builder carries one `Resolver`, chosen when the root builder is created and shared by
//! every child builder spawned for a branch. `add_type::<H>()` asks it for an `H` each time
//! the step runs, so resolution failures surface at invocation time, never at registration.

use crate::error::{FloError, FloResult};
use anyhow::anyhow;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{event, Level};

/// A type-erased instance produced by a resolver.
pub type Resolved = Box<dyn Any + Send>;

/// Shared handle to a resolution policy.
pub type SharedResolver = Arc<dyn Resolver>;

/// Identifies a type for resolution: its `TypeId`, its name (for diagnostics) and, when
/// known, its zero-argument constructor.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
  construct: Option<fn() -> Resolved>,
}

impl TypeKey {
  /// Key for `T` without a known constructor.
  pub fn of<T: 'static>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
      construct: None,
    }
  }

  /// Key for `T` carrying `T::default` as its zero-argument constructor.
  pub fn constructible<T: Default + Send + 'static>() -> Self {
    Self {
      construct: Some(construct_default::<T>),
      ..Self::of::<T>()
    }
  }

  pub fn id(&self) -> TypeId {
    self.id
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Whether [`TypeKey::construct`] can produce an instance.
  pub fn has_constructor(&self) -> bool {
    self.construct.is_some()
  }

  /// Runs the zero-argument constructor, if the key has one.
  pub fn construct(&self) -> Option<Resolved> {
    self.construct.map(|construct| construct())
  }
}

fn construct_default<T: Default + Send + 'static>() -> Resolved {
  Box::new(T::default())
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeKey")
      .field("name", &self.name)
      .field("has_constructor", &self.has_constructor())
      .finish()
  }
}

/// Maps a type to an instance of it.
///
/// `Ok(None)` means "no instance": the step that asked becomes a pass-through. `Err` aborts
/// the invocation with `FloError::UnresolvableType`.
pub trait Resolver: Send + Sync {
  fn resolve(&self, key: &TypeKey) -> FloResult<Option<Resolved>>;
}

impl<F> Resolver for F
where
  F: Fn(&TypeKey) -> FloResult<Option<Resolved>> + Send + Sync,
{
  fn resolve(&self, key: &TypeKey) -> FloResult<Option<Resolved>> {
    self(key)
  }
}

/// Constructs instances through the key's zero-argument constructor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResolver;

impl DefaultResolver {
  pub fn shared() -> SharedResolver {
    Arc::new(DefaultResolver)
  }
}

impl Resolver for DefaultResolver {
  fn resolve(&self, key: &TypeKey) -> FloResult<Option<Resolved>> {
    match key.construct() {
      Some(instance) => Ok(Some(instance)),
      None => Err(FloError::unresolvable(
        key.name(),
        anyhow!("no zero-argument constructor is known for this type"),
      )),
    }
  }
}

/// Resolves `key` and downcasts the instance to `H`.
///
/// An instance of another concrete type is treated like absence.
pub(crate) fn resolve_as<H: 'static>(resolver: &dyn Resolver, key: &TypeKey) -> FloResult<Option<H>> {
  let instance = match resolver.resolve(key) {
    Ok(Some(instance)) => instance,
    Ok(None) => return Ok(None),
    Err(err) => {
      event!(Level::ERROR, type_name = key.name(), error = %err, "Resolver failed to produce an instance.");
      return Err(err);
    }
  };

  match instance.downcast::<H>() {
    Ok(handler) => Ok(Some(*handler)),
    Err(_) => {
      event!(
        Level::WARN,
        type_name = key.name(),
        "Resolver returned an instance of a different type; treating it as absent."
      );
      Ok(None)
    }
  }
}

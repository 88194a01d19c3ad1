//! Core identity types and the resolution-path guard used for cycle detection.

use crate::error::{Error, Result};
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type, sized or not (`dyn Trait` works too).
///
/// Equality and hashing only look at the `TypeId`; the name is carried for messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.type_name)
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.type_name)
  }
}

/// What a caller asks for: a type, optionally narrowed by a qualifier name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InjectionKey {
  pub(crate) type_key: TypeKey,
  pub(crate) name: Option<String>,
}

impl InjectionKey {
  pub fn new<T: ?Sized + Any>() -> Self {
    Self {
      type_key: TypeKey::of::<T>(),
      name: None,
    }
  }

  pub fn new_with_name<T: ?Sized + Any>(name: &str) -> Self {
    Self {
      type_key: TypeKey::of::<T>(),
      name: Some(name.to_owned()),
    }
  }

  pub(crate) fn from_parts<T: ?Sized + Any>(name: Option<&str>) -> Self {
    match name {
      Some(n) => Self::new_with_name::<T>(n),
      None => Self::new::<T>(),
    }
  }

  pub fn type_key(&self) -> TypeKey {
    self.type_key
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

impl fmt::Debug for InjectionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "Key({}, Name({}))", self.type_key.type_name, name),
      None => write!(f, "Key({})", self.type_key.type_name),
    }
  }
}

impl fmt::Display for InjectionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "{} named '{}'", self.type_key, name),
      None => write!(f, "{}", self.type_key),
    }
  }
}

/// Canonical identity of a declared component: its concrete type and optional name.
///
/// Singletons are stored under this id, whatever key they were requested through.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ComponentId {
  pub(crate) concrete: TypeKey,
  pub(crate) name: Option<String>,
}

impl ComponentId {
  pub fn concrete(&self) -> TypeKey {
    self.concrete
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

impl fmt::Debug for ComponentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ComponentId({})", self)
  }
}

impl fmt::Display for ComponentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "{}#{}", self.concrete, name),
      None => write!(f, "{}", self.concrete),
    }
  }
}

/// The chain of keys currently being resolved by one call tree.
///
/// Each top-level lookup owns its own path, so concurrent prototype creations
/// never see each other's in-progress keys.
pub(crate) struct ResolutionPath {
  stack: RefCell<Vec<InjectionKey>>,
  max_depth: Option<usize>,
}

impl ResolutionPath {
  pub(crate) fn new(max_depth: Option<usize>) -> Self {
    Self {
      stack: RefCell::new(Vec::new()),
      max_depth,
    }
  }

  /// Pushes `key` onto the path, failing if it is already being resolved.
  ///
  /// The returned guard pops the key again when dropped, on every exit path.
  pub(crate) fn enter(&self, key: &InjectionKey) -> Result<ResolutionGuard<'_>> {
    let mut stack = self.stack.borrow_mut();

    if stack.contains(key) {
      let mut path: Vec<String> = stack.iter().map(ToString::to_string).collect();
      path.push(key.to_string());
      return Err(Error::CircularDependency {
        requested: key.to_string(),
        path,
      });
    }

    if let Some(limit) = self.max_depth {
      if stack.len() >= limit {
        return Err(Error::ResolutionTooDeep {
          requested: key.to_string(),
          limit,
        });
      }
    }

    stack.push(key.clone());
    Ok(ResolutionGuard { path: self })
  }

  pub(crate) fn depth(&self) -> usize {
    self.stack.borrow().len()
  }
}

/// RAII guard for one entry on a [`ResolutionPath`].
pub(crate) struct ResolutionGuard<'a> {
  path: &'a ResolutionPath,
}

impl Drop for ResolutionGuard<'_> {
  fn drop(&mut self) {
    // Guards are created and dropped in strict nesting order.
    self.path.stack.borrow_mut().pop();
  }
}

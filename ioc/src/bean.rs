//! Ready bean handles and the dependency view handed to factories.

use crate::core::{ComponentId, InjectionKey, TypeKey};
use crate::descriptor::{ComponentDescriptor, Scope};
use crate::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The concrete instance behind a bean, type-erased. Always holds an `Arc<T>`
/// coerced to `dyn Any`, where `T` is the descriptor's concrete type.
pub(crate) type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// A ready (constructed and initialized) component instance.
///
/// Cloning a `Bean` clones the handle, not the instance.
#[derive(Clone)]
pub struct Bean {
  descriptor: Arc<ComponentDescriptor>,
  instance: ErasedInstance,
}

impl Bean {
  pub(crate) fn new(descriptor: Arc<ComponentDescriptor>, instance: ErasedInstance) -> Self {
    Self { descriptor, instance }
  }

  pub fn id(&self) -> &ComponentId {
    self.descriptor.id()
  }

  pub fn scope(&self) -> Scope {
    self.descriptor.scope()
  }

  /// Views the bean as `T`: its concrete type or any alias it provides.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self
      .descriptor
      .cast(self.instance.clone(), &TypeKey::of::<T>())?
      .downcast::<Arc<T>>()
      .ok()
      .map(|arc_in_a_box| *arc_in_a_box)
  }

  pub(crate) fn try_downcast<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.downcast::<T>().ok_or_else(|| Error::TypeMismatch {
      component: self.id().to_string(),
      requested: std::any::type_name::<T>().to_string(),
    })
  }

  /// Whether both handles point at the very same instance.
  pub fn same_instance(&self, other: &Bean) -> bool {
    Arc::as_ptr(&self.instance) as *const () == Arc::as_ptr(&other.instance) as *const ()
  }
}

impl fmt::Debug for Bean {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Bean")
      .field("id", self.id())
      .field("scope", &self.scope())
      .finish()
  }
}

/// The resolved dependency slots of the component being constructed.
///
/// Slots keep declaration order. Lookups must use exactly the key the slot was
/// declared with (`get` for `depends_on`, `get_named` for `depends_on_named`).
pub struct Dependencies {
  component: ComponentId,
  slots: Vec<(InjectionKey, Bean)>,
}

impl Dependencies {
  pub(crate) fn new(component: ComponentId, slots: Vec<(InjectionKey, Bean)>) -> Self {
    Self { component, slots }
  }

  pub fn get<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.lookup(&InjectionKey::new::<T>())
  }

  pub fn get_named<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self.lookup(&InjectionKey::new_with_name::<T>(name))
  }

  fn lookup<T: ?Sized + Any + Send + Sync>(&self, key: &InjectionKey) -> Result<Arc<T>> {
    let (_, bean) = self
      .slots
      .iter()
      .find(|(slot, _)| slot == key)
      .ok_or_else(|| Error::UndeclaredDependency {
        component: self.component.to_string(),
        requested: key.to_string(),
      })?;
    bean.try_downcast::<T>()
  }

  /// Resolved beans in declaration order.
  pub fn beans(&self) -> impl Iterator<Item = &Bean> + '_ {
    self.slots.iter().map(|(_, bean)| bean)
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}

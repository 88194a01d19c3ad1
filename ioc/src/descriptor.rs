//! Component descriptors: the declared metadata the container resolves against.

use crate::bean::{Dependencies, ErasedInstance};
use crate::core::{ComponentId, InjectionKey, TypeKey};
use crate::error::{BoxError, Error, Result};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

/// Lifecycle scope of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
  /// One shared instance for the lifetime of the container.
  #[default]
  Singleton,
  /// A fresh instance, with a freshly wired subgraph, per lookup.
  Prototype,
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Scope::Singleton => f.write_str("singleton"),
      Scope::Prototype => f.write_str("prototype"),
    }
  }
}

impl FromStr for Scope {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "singleton" => Ok(Scope::Singleton),
      "prototype" => Ok(Scope::Prototype),
      other => Err(Error::InvalidConfigValue {
        field: "scope".to_string(),
        message: format!("unknown scope '{}', expected 'singleton' or 'prototype'", other),
      }),
    }
  }
}

type Factory = Box<dyn Fn(&Dependencies) -> std::result::Result<ErasedInstance, BoxError> + Send + Sync>;
type InitHook = Box<dyn Fn(&ErasedInstance) -> std::result::Result<(), BoxError> + Send + Sync>;
type Caster = Box<dyn Fn(ErasedInstance) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

// One type key this component can be injected as, with the conversion that
// turns the erased concrete instance into a boxed `Arc<Key>`.
struct Provision {
  key: TypeKey,
  cast: Caster,
}

/// Immutable metadata for one declared component.
///
/// Built with [`ComponentDescriptor::singleton`], [`ComponentDescriptor::prototype`]
/// or [`ComponentDescriptor::builder`].
pub struct ComponentDescriptor {
  id: ComponentId,
  scope: Scope,
  dependencies: Vec<InjectionKey>,
  provisions: Vec<Provision>,
  factory: Factory,
  init: Option<InitHook>,
}

impl ComponentDescriptor {
  /// Starts a singleton-scoped descriptor for `T`.
  pub fn singleton<T, F>(factory: F) -> DescriptorBuilder<T>
  where
    T: Any + Send + Sync,
    F: Fn(&Dependencies) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
  {
    DescriptorBuilder::new(factory).scope(Scope::Singleton)
  }

  /// Starts a prototype-scoped descriptor for `T`.
  pub fn prototype<T, F>(factory: F) -> DescriptorBuilder<T>
  where
    T: Any + Send + Sync,
    F: Fn(&Dependencies) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
  {
    DescriptorBuilder::new(factory).scope(Scope::Prototype)
  }

  /// Starts a descriptor for `T` with the default (singleton) scope.
  pub fn builder<T, F>(factory: F) -> DescriptorBuilder<T>
  where
    T: Any + Send + Sync,
    F: Fn(&Dependencies) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
  {
    DescriptorBuilder::new(factory)
  }

  pub fn id(&self) -> &ComponentId {
    &self.id
  }

  pub fn scope(&self) -> Scope {
    self.scope
  }

  /// Dependency slots, in declaration order.
  pub fn dependencies(&self) -> &[InjectionKey] {
    &self.dependencies
  }

  /// Every type this component can be injected as; the concrete type comes first.
  pub fn provided_types(&self) -> impl Iterator<Item = TypeKey> + '_ {
    self.provisions.iter().map(|p| p.key)
  }

  pub fn has_init_hook(&self) -> bool {
    self.init.is_some()
  }

  /// Whether a request for `key` can be satisfied by this component.
  pub fn matches(&self, key: &InjectionKey) -> bool {
    let name_ok = match key.name() {
      Some(requested) => self.id.name() == Some(requested),
      None => true,
    };
    name_ok && self.provisions.iter().any(|p| p.key == key.type_key())
  }

  /// The key start-up uses to drive this component directly.
  pub(crate) fn own_key(&self) -> InjectionKey {
    InjectionKey {
      type_key: self.id.concrete,
      name: self.id.name.clone(),
    }
  }

  pub(crate) fn instantiate(&self, deps: &Dependencies) -> Result<ErasedInstance> {
    (self.factory)(deps).map_err(|source| Error::InstantiationFailure {
      component: self.id.to_string(),
      source,
    })
  }

  pub(crate) fn initialize(&self, instance: &ErasedInstance) -> Result<()> {
    match &self.init {
      Some(hook) => hook(instance).map_err(|source| Error::InitializationFailure {
        component: self.id.to_string(),
        source,
      }),
      None => Ok(()),
    }
  }

  pub(crate) fn cast(&self, instance: ErasedInstance, key: &TypeKey) -> Option<Box<dyn Any + Send + Sync>> {
    let provision = self.provisions.iter().find(|p| p.key == *key)?;
    (provision.cast)(instance)
  }
}

impl fmt::Debug for ComponentDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ComponentDescriptor")
      .field("id", &self.id)
      .field("scope", &self.scope)
      .field("dependencies", &self.dependencies)
      .field("provides", &self.provided_types().collect::<Vec<_>>())
      .field("init", &self.init.is_some())
      .finish()
  }
}

/// Typed builder for a [`ComponentDescriptor`] whose concrete type is `T`.
pub struct DescriptorBuilder<T> {
  scope: Scope,
  name: Option<String>,
  dependencies: Vec<InjectionKey>,
  provisions: Vec<Provision>,
  factory: Factory,
  init: Option<InitHook>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> DescriptorBuilder<T> {
  fn new<F>(factory: F) -> Self
  where
    F: Fn(&Dependencies) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
  {
    let concrete = Provision {
      key: TypeKey::of::<T>(),
      cast: Box::new(|instance: ErasedInstance| {
        instance
          .downcast::<T>()
          .ok()
          .map(|arc| Box::new(arc) as Box<dyn Any + Send + Sync>)
      }),
    };

    Self {
      scope: Scope::default(),
      name: None,
      dependencies: Vec::new(),
      provisions: vec![concrete],
      factory: Box::new(move |deps: &Dependencies| {
        factory(deps).map(|value| Arc::new(value) as ErasedInstance)
      }),
      init: None,
      _marker: PhantomData,
    }
  }

  pub fn scope(mut self, scope: Scope) -> Self {
    self.scope = scope;
    self
  }

  /// Qualifies the component with a name; requests carrying a name only match equal names.
  pub fn named(mut self, name: &str) -> Self {
    self.name = Some(name.to_owned());
    self
  }

  /// Declares a dependency slot. Slots are resolved in declaration order.
  pub fn depends_on<D: ?Sized + Any>(mut self) -> Self {
    self.dependencies.push(InjectionKey::new::<D>());
    self
  }

  pub fn depends_on_named<D: ?Sized + Any>(mut self, name: &str) -> Self {
    self.dependencies.push(InjectionKey::new_with_name::<D>(name));
    self
  }

  /// Makes the component injectable as `I` as well, typically a `dyn Trait`.
  ///
  /// ```
  /// use beanstalk_ioc::ComponentDescriptor;
  /// use std::sync::Arc;
  ///
  /// trait Clock: Send + Sync {}
  /// struct SystemClock;
  /// impl Clock for SystemClock {}
  ///
  /// let descriptor = ComponentDescriptor::singleton(|_| Ok(SystemClock))
  ///   .provides::<dyn Clock>(|clock| clock as Arc<dyn Clock>)
  ///   .build();
  /// assert_eq!(descriptor.provided_types().count(), 2);
  /// ```
  pub fn provides<I>(mut self, cast: fn(Arc<T>) -> Arc<I>) -> Self
  where
    I: ?Sized + Any + Send + Sync,
  {
    let key = TypeKey::of::<I>();
    self.provisions.retain(|p| p.key != key);
    self.provisions.push(Provision {
      key,
      cast: Box::new(move |instance: ErasedInstance| {
        instance
          .downcast::<T>()
          .ok()
          .map(|arc| Box::new(cast(arc)) as Box<dyn Any + Send + Sync>)
      }),
    });
    self
  }

  /// Registers the initialization hook, run once after construction.
  pub fn on_init<H>(mut self, hook: H) -> Self
  where
    H: Fn(&T) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
  {
    self.init = Some(Box::new(move |instance: &ErasedInstance| {
      match (**instance).downcast_ref::<T>() {
        Some(value) => hook(value),
        None => Err(format!("instance is not a {}", std::any::type_name::<T>()).into()),
      }
    }));
    self
  }

  pub fn build(self) -> ComponentDescriptor {
    ComponentDescriptor {
      id: ComponentId {
        concrete: TypeKey::of::<T>(),
        name: self.name,
      },
      scope: self.scope,
      dependencies: self.dependencies,
      provisions: self.provisions,
      factory: self.factory,
      init: self.init,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  trait Storage: Send + Sync {}
  struct DiskStorage;
  impl Storage for DiskStorage {}

  #[test]
  fn scope_parses_case_insensitively() {
    assert_eq!("prototype".parse::<Scope>().unwrap(), Scope::Prototype);
    assert_eq!(" Singleton ".parse::<Scope>().unwrap(), Scope::Singleton);
    assert!("request".parse::<Scope>().is_err());
  }

  #[test]
  fn matching_honors_aliases_and_names() {
    let descriptor = ComponentDescriptor::singleton(|_| Ok(DiskStorage))
      .named("disk")
      .provides::<dyn Storage>(|s| s as Arc<dyn Storage>)
      .build();

    assert!(descriptor.matches(&InjectionKey::new::<DiskStorage>()));
    assert!(descriptor.matches(&InjectionKey::new::<dyn Storage>()));
    assert!(descriptor.matches(&InjectionKey::new_with_name::<dyn Storage>("disk")));
    assert!(!descriptor.matches(&InjectionKey::new_with_name::<dyn Storage>("memory")));
    assert!(!descriptor.matches(&InjectionKey::new::<String>()));
  }

  #[test]
  fn providing_the_same_alias_twice_keeps_one_entry() {
    let descriptor = ComponentDescriptor::prototype(|_| Ok(DiskStorage))
      .provides::<dyn Storage>(|s| s as Arc<dyn Storage>)
      .provides::<dyn Storage>(|s| s as Arc<dyn Storage>)
      .build();

    assert_eq!(descriptor.scope(), Scope::Prototype);
    assert_eq!(descriptor.provided_types().count(), 2);
  }
}

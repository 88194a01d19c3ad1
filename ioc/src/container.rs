//! The main `Container` struct and its associated methods.

use crate::bean::Bean;
use crate::catalog::ComponentCatalog;
use crate::config::ContainerConfig;
use crate::core::{ComponentId, InjectionKey, ResolutionPath};
use crate::descriptor::{ComponentDescriptor, Scope};
use crate::error::{Error, Result};
use crate::lifecycle::{self, StartupReport};
use crate::registry::BeanRegistry;
use crate::resolver::Resolver;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// The Inversion of Control (IoC) container.
///
/// A `Container` only exists once start-up has succeeded: every singleton in
/// its catalog is created, wired and initialized. From then on singleton
/// lookups are plain reads, and the container can be shared across threads.
pub struct Container {
  descriptors: Vec<Arc<ComponentDescriptor>>,
  registry: BeanRegistry,
  config: ContainerConfig,
  report: StartupReport,
}

impl Container {
  /// Starts a container with the default configuration.
  pub fn start<C: ComponentCatalog + ?Sized>(catalog: &C) -> Result<Self> {
    Self::start_with_config(catalog, ContainerConfig::default())
  }

  /// Starts a container, creating every singleton the catalog declares.
  ///
  /// Any resolution or initialization error aborts start-up and is returned;
  /// no partially started container is ever handed out.
  pub fn start_with_config<C: ComponentCatalog + ?Sized>(
    catalog: &C,
    config: ContainerConfig,
  ) -> Result<Self> {
    config.validate()?;

    let descriptors = catalog.descriptors();
    reject_duplicate_ids(&descriptors)?;
    let registry = BeanRegistry::with_placeholders(
      descriptors
        .iter()
        .filter(|d| d.scope() == Scope::Singleton)
        .map(|d| d.id()),
    );

    let report = {
      let resolver = Resolver::new(&descriptors, &registry);
      lifecycle::start_up(&resolver, &config)?
    };

    if config.log_startup_summary {
      info!(
        singletons = report.singletons,
        prototypes = report.prototypes,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "container started"
      );
    }

    Ok(Self {
      descriptors,
      registry,
      config,
      report,
    })
  }

  fn resolver(&self) -> Resolver<'_> {
    Resolver::new(&self.descriptors, &self.registry)
  }

  // --- Resolution ---

  /// Looks up the bean satisfying `key`.
  ///
  /// Singletons come straight from the cache. Prototypes are built fresh on
  /// every call, with their own dependency subgraph; singleton dependencies
  /// inside that subgraph are still the shared instances.
  ///
  /// # Panics
  ///
  /// Panics if a singleton that start-up must have created is missing.
  pub fn get(&self, key: &InjectionKey) -> Result<Bean> {
    let resolver = self.resolver();
    let descriptor = resolver.find_unique(key)?;

    match descriptor.scope() {
      Scope::Singleton => match self.registry.get(descriptor.id()) {
        Some(bean) => Ok(bean.clone()),
        None => panic!(
          "Singleton {} is missing although the container started",
          descriptor.id()
        ),
      },
      Scope::Prototype => {
        let path = ResolutionPath::new(self.config.max_resolution_depth);
        resolver.resolve(key, &path).map_err(|err| {
          warn!(requested = %key, error = %err, "prototype creation failed");
          err
        })
      }
    }
  }

  /// Resolves a bean by type: its concrete type or any alias it provides.
  pub fn get_bean<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.get_internal::<T>(None)
  }

  /// Resolves a bean by type, restricted to components declared with `name`.
  pub fn get_named_bean<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self.get_internal::<T>(Some(name))
  }

  fn get_internal<T: ?Sized + Any + Send + Sync>(&self, name: Option<&str>) -> Result<Arc<T>> {
    let key = InjectionKey::from_parts::<T>(name);
    self.get(&key)?.try_downcast::<T>()
  }

  /// Whether exactly one component satisfies `T`.
  pub fn contains_bean<T: ?Sized + Any>(&self) -> bool {
    self.resolver().find_unique(&InjectionKey::new::<T>()).is_ok()
  }

  // --- Introspection ---

  /// The descriptors this container was started from, in catalog order.
  pub fn descriptors(&self) -> &[Arc<ComponentDescriptor>] {
    &self.descriptors
  }

  pub fn singleton_count(&self) -> usize {
    self.registry.ready_count()
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  pub fn startup_report(&self) -> StartupReport {
    self.report
  }
}

/// Two descriptors with the same concrete type and name can never be told
/// apart, so the catalog is rejected before anything is created.
fn reject_duplicate_ids(descriptors: &[Arc<ComponentDescriptor>]) -> Result<()> {
  let mut seen: HashMap<&ComponentId, usize> = HashMap::with_capacity(descriptors.len());

  for (index, descriptor) in descriptors.iter().enumerate() {
    if let Some(first) = seen.insert(descriptor.id(), index) {
      let id = descriptor.id();
      warn!(component = %id, first, duplicate = index, "duplicate component in catalog");
      return Err(Error::AmbiguousComponent {
        requested: id.to_string(),
        candidates: vec![
          format!("{} (catalog entry {})", id, first),
          format!("{} (catalog entry {})", id, index),
        ],
      });
    }
  }
  Ok(())
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("components", &self.descriptors.len())
      .field("singletons", &self.registry.ready_count())
      .field("config", &self.config)
      .finish()
  }
}

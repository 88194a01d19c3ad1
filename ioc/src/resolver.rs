//! Turns a requested key into a ready bean, honoring scope and the catalog.

use crate::bean::Bean;
use crate::core::{InjectionKey, ResolutionPath};
use crate::descriptor::{ComponentDescriptor, Scope};
use crate::error::{Error, Result};
use crate::lifecycle;
use crate::registry::BeanRegistry;
use std::sync::Arc;
use tracing::trace;

pub(crate) struct Resolver<'c> {
  descriptors: &'c [Arc<ComponentDescriptor>],
  registry: &'c BeanRegistry,
}

impl<'c> Resolver<'c> {
  pub(crate) fn new(descriptors: &'c [Arc<ComponentDescriptor>], registry: &'c BeanRegistry) -> Self {
    Self {
      descriptors,
      registry,
    }
  }

  pub(crate) fn descriptors(&self) -> &'c [Arc<ComponentDescriptor>] {
    self.descriptors
  }

  /// Finds the single descriptor satisfying `key`.
  ///
  /// Zero matches and several matches are both errors; there is no "first wins".
  pub(crate) fn find_unique(&self, key: &InjectionKey) -> Result<&'c Arc<ComponentDescriptor>> {
    let mut candidates = self.descriptors.iter().filter(|d| d.matches(key));

    match (candidates.next(), candidates.next()) {
      (None, _) => Err(Error::NoSuchComponent {
        requested: key.to_string(),
      }),
      (Some(only), None) => Ok(only),
      (Some(first), Some(second)) => {
        let mut names = vec![first.id().to_string(), second.id().to_string()];
        names.extend(candidates.map(|d| d.id().to_string()));
        Err(Error::AmbiguousComponent {
          requested: key.to_string(),
          candidates: names,
        })
      }
    }
  }

  /// Resolves `key` on the given call path.
  pub(crate) fn resolve(&self, key: &InjectionKey, path: &ResolutionPath) -> Result<Bean> {
    let _guard = path.enter(key)?;
    let descriptor = self.find_unique(key)?;
    self.obtain(descriptor, path)
  }

  /// Resolves a known descriptor without going through catalog matching.
  pub(crate) fn resolve_descriptor(
    &self,
    descriptor: &Arc<ComponentDescriptor>,
    path: &ResolutionPath,
  ) -> Result<Bean> {
    let _guard = path.enter(&descriptor.own_key())?;
    self.obtain(descriptor, path)
  }

  fn obtain(&self, descriptor: &Arc<ComponentDescriptor>, path: &ResolutionPath) -> Result<Bean> {
    let singleton = descriptor.scope() == Scope::Singleton;

    if singleton {
      if let Some(bean) = self.registry.get(descriptor.id()) {
        trace!(component = %descriptor.id(), depth = path.depth(), "singleton cache hit");
        return Ok(bean.clone());
      }
    }

    let bean = lifecycle::create(descriptor, |dependency| self.resolve(dependency, path))?;

    if singleton {
      self.registry.put(bean.clone())?;
    }
    Ok(bean)
  }
}

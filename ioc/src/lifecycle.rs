//! Creation phases of a single bean, and the start-up pass over all singletons.

use crate::bean::{Bean, Dependencies};
use crate::config::ContainerConfig;
use crate::core::{InjectionKey, ResolutionPath};
use crate::descriptor::{ComponentDescriptor, Scope};
use crate::error::Result;
use crate::resolver::Resolver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Summary of a successful start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
  /// Singletons created and initialized during start-up.
  pub singletons: usize,
  /// Prototype descriptors left for on-demand creation.
  pub prototypes: usize,
  pub elapsed: Duration,
}

/// Builds one bean: wire its slots, construct it, then run its init hook.
///
/// Slots are resolved in declaration order through `resolve_slot`, so every
/// dependency is ready before this component's hook runs.
pub(crate) fn create<F>(descriptor: &Arc<ComponentDescriptor>, mut resolve_slot: F) -> Result<Bean>
where
  F: FnMut(&InjectionKey) -> Result<Bean>,
{
  let slots = descriptor
    .dependencies()
    .iter()
    .map(|key| resolve_slot(key).map(|bean| (key.clone(), bean)))
    .collect::<Result<Vec<_>>>()?;
  let deps = Dependencies::new(descriptor.id().clone(), slots);

  // Raw: constructed, hook not yet run.
  let instance = descriptor.instantiate(&deps)?;
  debug!(component = %descriptor.id(), scope = %descriptor.scope(), slots = deps.len(), "instantiated");

  descriptor.initialize(&instance)?;
  if descriptor.has_init_hook() {
    debug!(component = %descriptor.id(), "initialized");
  }

  Ok(Bean::new(descriptor.clone(), instance))
}

/// Creates every singleton in catalog order.
///
/// A singleton already pulled in as someone else's dependency is served from
/// the registry, so each one is created and initialized exactly once.
pub(crate) fn start_up(resolver: &Resolver<'_>, config: &ContainerConfig) -> Result<StartupReport> {
  let started = Instant::now();
  let mut singletons = 0;
  let mut prototypes = 0;

  for descriptor in resolver.descriptors() {
    if descriptor.scope() == Scope::Prototype {
      prototypes += 1;
      continue;
    }

    let path = ResolutionPath::new(config.max_resolution_depth);
    if let Err(err) = resolver.resolve_descriptor(descriptor, &path) {
      warn!(component = %descriptor.id(), error = %err, "container start-up failed");
      return Err(err);
    }
    singletons += 1;
  }

  Ok(StartupReport {
    singletons,
    prototypes,
    elapsed: started.elapsed(),
  })
}

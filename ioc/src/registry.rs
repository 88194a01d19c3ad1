//! The singleton cache.

use crate::bean::Bean;
use crate::core::ComponentId;
use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// Owns one write-once slot per singleton-scoped component.
///
/// Slots are created up front from the catalog, so the key set never changes and
/// lookups never need a lock. Each slot can be filled exactly once; a filled
/// slot is never replaced or cleared.
pub(crate) struct BeanRegistry {
  slots: HashMap<ComponentId, OnceCell<Bean>>,
}

impl BeanRegistry {
  pub(crate) fn with_placeholders<'a>(ids: impl IntoIterator<Item = &'a ComponentId>) -> Self {
    let slots = ids
      .into_iter()
      .map(|id| (id.clone(), OnceCell::new()))
      .collect();
    Self { slots }
  }

  /// Pure lookup of a ready singleton.
  pub(crate) fn get(&self, id: &ComponentId) -> Option<&Bean> {
    self.slots.get(id).and_then(OnceCell::get)
  }

  /// Stores a ready singleton. Fails if one is already stored under the same id.
  ///
  /// # Panics
  ///
  /// Panics if `id` was not given a placeholder, which means the bean did not
  /// come from this registry's catalog.
  pub(crate) fn put(&self, bean: Bean) -> Result<()> {
    let id = bean.id().clone();
    let slot = self
      .slots
      .get(&id)
      .unwrap_or_else(|| panic!("No singleton slot was reserved for {}", id));

    slot.set(bean).map_err(|_| Error::DuplicateSingleton {
      component: id.to_string(),
    })
  }

  /// Number of singletons that are ready.
  pub(crate) fn ready_count(&self) -> usize {
    self.slots.values().filter(|slot| slot.get().is_some()).count()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptor::ComponentDescriptor;
  use std::sync::Arc;

  struct Ledger;

  fn ledger_bean(descriptor: &Arc<ComponentDescriptor>) -> Bean {
    Bean::new(descriptor.clone(), Arc::new(Ledger))
  }

  #[test]
  fn put_then_get_returns_the_same_instance() {
    let descriptor = Arc::new(ComponentDescriptor::singleton(|_| Ok(Ledger)).build());
    let registry = BeanRegistry::with_placeholders([descriptor.id()]);
    assert!(registry.get(descriptor.id()).is_none());

    let bean = ledger_bean(&descriptor);
    registry.put(bean.clone()).unwrap();

    assert!(registry.get(descriptor.id()).unwrap().same_instance(&bean));
    assert_eq!(registry.ready_count(), 1);
  }

  #[test]
  fn second_put_is_rejected_and_keeps_the_first() {
    let descriptor = Arc::new(ComponentDescriptor::singleton(|_| Ok(Ledger)).build());
    let registry = BeanRegistry::with_placeholders([descriptor.id()]);

    let first = ledger_bean(&descriptor);
    registry.put(first.clone()).unwrap();
    let err = registry.put(ledger_bean(&descriptor)).unwrap_err();

    assert!(matches!(err, Error::DuplicateSingleton { .. }));
    assert!(registry.get(descriptor.id()).unwrap().same_instance(&first));
  }
}

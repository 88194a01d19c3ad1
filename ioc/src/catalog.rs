//! Sources of component descriptors.

use crate::descriptor::ComponentDescriptor;
use std::sync::Arc;

/// Supplies the declared components a container is started from.
///
/// How descriptors are discovered is up to the implementor; the container only
/// needs them in a stable order.
pub trait ComponentCatalog {
  fn descriptors(&self) -> Vec<Arc<ComponentDescriptor>>;
}

impl ComponentCatalog for Vec<Arc<ComponentDescriptor>> {
  fn descriptors(&self) -> Vec<Arc<ComponentDescriptor>> {
    self.clone()
  }
}

impl ComponentCatalog for [Arc<ComponentDescriptor>] {
  fn descriptors(&self) -> Vec<Arc<ComponentDescriptor>> {
    self.to_vec()
  }
}

/// An ordered, in-memory registration list.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
  descriptors: Vec<Arc<ComponentDescriptor>>,
}

impl StaticCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, descriptor: ComponentDescriptor) -> &mut Self {
    self.descriptors.push(Arc::new(descriptor));
    self
  }

  pub fn with(mut self, descriptor: ComponentDescriptor) -> Self {
    self.register(descriptor);
    self
  }

  /// Keeps only components whose concrete type lives under the module path `prefix`.
  ///
  /// `within("app::billing")` keeps `app::billing::Invoice` and
  /// `app::billing::tax::Rate`, but not `app::billing_v2::Invoice`.
  pub fn within(&self, prefix: &str) -> StaticCatalog {
    let prefix = prefix.trim_end_matches("::");
    let descriptors = self
      .descriptors
      .iter()
      .filter(|d| {
        let type_name = d.id().concrete().type_name();
        type_name
          .strip_prefix(prefix)
          .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
      })
      .cloned()
      .collect();
    StaticCatalog { descriptors }
  }

  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> + '_ {
    self.descriptors.iter().map(|d| d.as_ref())
  }
}

impl ComponentCatalog for StaticCatalog {
  fn descriptors(&self) -> Vec<Arc<ComponentDescriptor>> {
    self.descriptors.clone()
  }
}

impl FromIterator<ComponentDescriptor> for StaticCatalog {
  fn from_iter<I: IntoIterator<Item = ComponentDescriptor>>(iter: I) -> Self {
    Self {
      descriptors: iter.into_iter().map(Arc::new).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  mod billing {
    pub struct Invoice;
    pub mod tax {
      pub struct Rate;
    }
  }

  mod billing_v2 {
    pub struct Invoice;
  }

  #[test]
  fn within_respects_module_boundaries() {
    let catalog = StaticCatalog::new()
      .with(ComponentDescriptor::singleton(|_| Ok(billing::Invoice)).build())
      .with(ComponentDescriptor::singleton(|_| Ok(billing::tax::Rate)).build())
      .with(ComponentDescriptor::singleton(|_| Ok(billing_v2::Invoice)).build());

    let prefix = format!("{}::billing", module_path!());
    let scoped = catalog.within(&prefix);

    assert_eq!(scoped.len(), 2);
    assert!(scoped.iter().all(|d| !d.id().concrete().type_name().contains("billing_v2")));
  }

  #[test]
  fn collecting_keeps_declaration_order() {
    let catalog: StaticCatalog = vec![
      ComponentDescriptor::singleton(|_| Ok(billing::Invoice)).build(),
      ComponentDescriptor::prototype(|_| Ok(billing::tax::Rate)).build(),
    ]
    .into_iter()
    .collect();

    let names: Vec<_> = catalog.iter().map(|d| d.id().concrete().type_name()).collect();
    assert!(names[0].ends_with("billing::Invoice"));
    assert!(names[1].ends_with("tax::Rate"));
  }
}

//! # Beanstalk IoC
//!
//! A small, strict Inversion of Control (IoC) container for Rust.
//!
//! Components are declared up front as [`ComponentDescriptor`]s and handed to
//! the container through a [`ComponentCatalog`]. Starting the container creates
//! every singleton, wires declared dependencies, and runs initialization hooks
//! so that a component's hook always runs after the hooks of everything it
//! depends on. Resolution problems are reported, never papered over.
//!
//! ## Core Concepts
//!
//! - **Descriptor**: the concrete type, its scope, its dependency slots, the
//!   extra types (usually trait objects) it can be injected as, and an optional
//!   initialization hook.
//! - **Scope**: `Singleton` beans are created once at start-up and shared;
//!   `Prototype` beans are built fresh on every lookup.
//! - **Errors**: a missing component, an ambiguous one, a dependency cycle, or a
//!   failing factory/hook are all returned as [`Error`] values. A start-up
//!   failure yields no container at all.
//!
//! ## Quick Start
//!
//! ```
//! use beanstalk_ioc::{ComponentDescriptor, Container, StaticCatalog};
//! use std::sync::Arc;
//!
//! struct Repository;
//!
//! impl Repository {
//!   fn find_username(&self, id: u64) -> String {
//!     format!("user-{}", id)
//!   }
//! }
//!
//! struct Service {
//!   repository: Arc<Repository>,
//! }
//!
//! let catalog = StaticCatalog::new()
//!   .with(ComponentDescriptor::singleton(|_| Ok(Repository)).build())
//!   .with(
//!     ComponentDescriptor::singleton(|deps| {
//!       Ok(Service {
//!         repository: deps.get::<Repository>()?,
//!       })
//!     })
//!     .depends_on::<Repository>()
//!     .build(),
//!   );
//!
//! let container = Container::start(&catalog).unwrap();
//! let service = container.get_bean::<Service>().unwrap();
//!
//! assert_eq!(service.repository.find_username(42), "user-42");
//! assert!(Arc::ptr_eq(
//!   &service.repository,
//!   &container.get_bean::<Repository>().unwrap()
//! ));
//! ```

mod bean;
mod catalog;
mod config;
mod container;
mod core;
mod descriptor;
mod error;
mod lifecycle;
mod macros;
mod registry;
mod resolver;

pub use bean::{Bean, Dependencies};
pub use catalog::{ComponentCatalog, StaticCatalog};
pub use config::{find_config_file, find_config_file_in, ContainerConfig};
pub use container::Container;
pub use crate::core::{ComponentId, InjectionKey, TypeKey};
pub use descriptor::{ComponentDescriptor, DescriptorBuilder, Scope};
pub use error::{BoxError, Error, Result};
pub use lifecycle::StartupReport;

use beanstalk_ioc::{ComponentDescriptor, Container, Scope, StaticCatalog};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

// --- Test Fixtures ---

struct UserRepository {
  initialized: AtomicBool,
}

impl UserRepository {
  fn new() -> Self {
    Self {
      initialized: AtomicBool::new(false),
    }
  }

  fn find_username_by_id(&self, id: u64) -> String {
    format!("user-{}", id)
  }
}

struct UserService {
  repository: Arc<UserRepository>,
}

impl UserService {
  fn greeting(&self, id: u64) -> String {
    format!("Hello, {}!", self.repository.find_username_by_id(id))
  }
}

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

struct TokenGenerator {
  serial: u64,
}

impl TokenGenerator {
  fn new_token(&self) -> String {
    format!("token-{}", self.serial)
  }
}

struct Session {
  tokens: Arc<TokenGenerator>,
  users: Arc<UserService>,
}

fn repository() -> ComponentDescriptor {
  ComponentDescriptor::singleton(|_| Ok(UserRepository::new()))
    .on_init(|repo| {
      repo.initialized.store(true, Ordering::SeqCst);
      Ok(())
    })
    .build()
}

fn service() -> ComponentDescriptor {
  ComponentDescriptor::singleton(|deps| {
    Ok(UserService {
      repository: deps.get::<UserRepository>()?,
    })
  })
  .depends_on::<UserRepository>()
  .build()
}

fn token_generator() -> ComponentDescriptor {
  ComponentDescriptor::prototype(|_| {
    Ok(TokenGenerator {
      serial: NEXT_TOKEN.fetch_add(1, Ordering::SeqCst),
    })
  })
  .build()
}

fn session() -> ComponentDescriptor {
  ComponentDescriptor::prototype(|deps| {
    Ok(Session {
      tokens: deps.get::<TokenGenerator>()?,
      users: deps.get::<UserService>()?,
    })
  })
  .depends_on::<TokenGenerator>()
  .depends_on::<UserService>()
  .build()
}

fn app_catalog() -> StaticCatalog {
  StaticCatalog::new()
    .with(repository())
    .with(service())
    .with(token_generator())
}

// --- Basic Tests ---

#[test]
fn test_end_to_end_scenario() {
  // Arrange
  let container = Container::start(&app_catalog()).unwrap();

  // Act
  let service = container.get_bean::<UserService>().unwrap();
  let repository = container.get_bean::<UserRepository>().unwrap();
  let t1 = container.get_bean::<TokenGenerator>().unwrap();
  let t2 = container.get_bean::<TokenGenerator>().unwrap();

  // Assert
  assert_eq!(service.greeting(42), "Hello, user-42!");
  assert!(Arc::ptr_eq(&service.repository, &repository));
  assert!(repository.initialized.load(Ordering::SeqCst));
  assert!(!Arc::ptr_eq(&t1, &t2));
  assert_ne!(t1.new_token(), t2.new_token());
}

#[test]
fn test_singleton_identity() {
  let container = Container::start(&app_catalog()).unwrap();

  let r1 = container.get_bean::<UserRepository>().unwrap();
  let r2 = container.get_bean::<UserRepository>().unwrap();

  // Ensure it's a singleton by checking pointer equality.
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_prototype_shares_singleton_dependencies() {
  // Arrange
  let catalog = app_catalog().with(session());
  let container = Container::start(&catalog).unwrap();

  // Act
  let s1 = container.get_bean::<Session>().unwrap();
  let s2 = container.get_bean::<Session>().unwrap();

  // Assert
  assert!(!Arc::ptr_eq(&s1, &s2));
  // The prototype dependency is re-resolved for each session...
  assert!(!Arc::ptr_eq(&s1.tokens, &s2.tokens));
  // ...while the singleton one is shared.
  assert!(Arc::ptr_eq(&s1.users, &s2.users));
  assert!(Arc::ptr_eq(&s1.users, &container.get_bean::<UserService>().unwrap()));
}

#[test]
fn test_prototypes_are_not_created_at_start_up() {
  // Arrange
  struct Lazy;
  static CREATED: AtomicBool = AtomicBool::new(false);
  let catalog = StaticCatalog::new().with(
    ComponentDescriptor::prototype(|_| {
      CREATED.store(true, Ordering::SeqCst);
      Ok(Lazy)
    })
    .build(),
  );

  // Act
  let container = Container::start(&catalog).unwrap();

  // Assert
  assert!(!CREATED.load(Ordering::SeqCst));
  assert_eq!(container.singleton_count(), 0);
  assert_eq!(container.startup_report().prototypes, 1);

  container.get_bean::<Lazy>().unwrap();
  assert!(CREATED.load(Ordering::SeqCst));
}

#[test]
fn test_catalog_order_does_not_matter() {
  // The dependent is declared before its dependency.
  let catalog = StaticCatalog::new().with(service()).with(repository());

  let container = Container::start(&catalog).unwrap();

  assert_eq!(container.singleton_count(), 2);
  let service = container.get_bean::<UserService>().unwrap();
  assert!(Arc::ptr_eq(
    &service.repository,
    &container.get_bean::<UserRepository>().unwrap()
  ));
  assert_eq!(container.startup_report().singletons, 2);
}

#[test]
fn test_untyped_lookup_exposes_scope_and_identity() {
  use beanstalk_ioc::InjectionKey;

  let container = Container::start(&app_catalog()).unwrap();

  let a = container.get(&InjectionKey::new::<UserService>()).unwrap();
  let b = container.get(&InjectionKey::new::<UserService>()).unwrap();
  let t = container.get(&InjectionKey::new::<TokenGenerator>()).unwrap();

  assert_eq!(a.scope(), Scope::Singleton);
  assert_eq!(t.scope(), Scope::Prototype);
  assert!(a.same_instance(&b));
  assert!(a.downcast::<UserService>().is_some());
  assert!(a.downcast::<TokenGenerator>().is_none());
}

#[test]
fn test_contains_bean() {
  let container = Container::start(&app_catalog()).unwrap();

  assert!(container.contains_bean::<UserService>());
  assert!(container.contains_bean::<TokenGenerator>());
  assert!(!container.contains_bean::<Session>());
  assert_eq!(container.descriptors().len(), 3);
}

#[test]
fn test_debug_output_reports_ready_singletons() {
  let container = Container::start(&app_catalog()).unwrap();

  let rendered = format!("{:?}", container);

  assert!(rendered.contains("components: 3"));
  assert!(rendered.contains("singletons: 2"));
}

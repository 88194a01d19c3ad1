use beanstalk_ioc::{bean, ComponentDescriptor, Container, Error, StaticCatalog};
use std::sync::Arc;

// --- Test Fixtures ---

// The trait must be Send + Sync for the container to hand it out.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

struct GermanGreeter;
impl Greeter for GermanGreeter {
  fn greet(&self) -> String {
    "Hallo!".to_string()
  }
}

struct Concierge {
  greeter: Arc<dyn Greeter>,
}

fn english() -> ComponentDescriptor {
  ComponentDescriptor::singleton(|_| Ok(EnglishGreeter))
    .named("english")
    .provides::<dyn Greeter>(|g| g as Arc<dyn Greeter>)
    .build()
}

fn german() -> ComponentDescriptor {
  ComponentDescriptor::singleton(|_| Ok(GermanGreeter))
    .named("german")
    .provides::<dyn Greeter>(|g| g as Arc<dyn Greeter>)
    .build()
}

// --- Tests ---

#[test]
fn test_trait_and_concrete_lookups_share_one_singleton() {
  // Arrange
  let catalog = StaticCatalog::new().with(
    ComponentDescriptor::singleton(|_| Ok(EnglishGreeter))
      .provides::<dyn Greeter>(|g| g as Arc<dyn Greeter>)
      .build(),
  );
  let container = Container::start(&catalog).unwrap();

  // Act
  let by_trait = bean!(container, trait Greeter);
  let by_type = bean!(container, EnglishGreeter);

  // Assert
  assert_eq!(by_trait.greet(), "Hello!");
  assert_eq!(container.singleton_count(), 1);
  assert!(std::ptr::eq(
    Arc::as_ptr(&by_trait) as *const (),
    Arc::as_ptr(&by_type) as *const ()
  ));
}

#[test]
fn test_named_trait_resolution() {
  let catalog = StaticCatalog::new().with(english()).with(german());
  let container = Container::start(&catalog).unwrap();

  let greeter = bean!(container, trait Greeter, "german");

  assert_eq!(greeter.greet(), "Hallo!");
}

#[test]
fn test_named_concrete_resolution() {
  let catalog = StaticCatalog::new()
    .with(ComponentDescriptor::singleton(|_| Ok(String::from("primary"))).named("primary").build())
    .with(ComponentDescriptor::singleton(|_| Ok(String::from("replica"))).named("replica").build());
  let container = Container::start(&catalog).unwrap();

  assert_eq!(*bean!(container, String, "replica"), "replica");
  assert_eq!(*bean!(container, String, "primary"), "primary");
}

#[test]
fn test_unqualified_lookup_of_two_implementations_is_ambiguous() {
  let catalog = StaticCatalog::new().with(english()).with(german());
  let container = Container::start(&catalog).unwrap();

  let err = container.get_bean::<dyn Greeter>().err().unwrap();

  match err {
    Error::AmbiguousComponent { candidates, .. } => {
      assert_eq!(candidates.len(), 2);
      assert!(candidates.iter().any(|c| c.contains("EnglishGreeter")));
      assert!(candidates.iter().any(|c| c.contains("GermanGreeter")));
    }
    other => panic!("expected ambiguity, got: {other}"),
  }
}

#[test]
fn test_ambiguous_dependency_fails_start_up() {
  // Arrange
  let catalog = StaticCatalog::new()
    .with(english())
    .with(german())
    .with(
      ComponentDescriptor::singleton(|deps| {
        Ok(Concierge {
          greeter: deps.get::<dyn Greeter>()?,
        })
      })
      .depends_on::<dyn Greeter>()
      .build(),
    );

  // Act
  let err = Container::start(&catalog).unwrap_err();

  // Assert
  let message = err.to_string();
  assert!(matches!(err, Error::AmbiguousComponent { .. }));
  assert!(message.contains("EnglishGreeter"));
  assert!(message.contains("GermanGreeter"));
}

#[test]
fn test_qualified_dependency_resolves_the_ambiguity() {
  let catalog = StaticCatalog::new()
    .with(english())
    .with(german())
    .with(
      ComponentDescriptor::singleton(|deps| {
        Ok(Concierge {
          greeter: deps.get_named::<dyn Greeter>("english")?,
        })
      })
      .depends_on_named::<dyn Greeter>("english")
      .build(),
    );
  let container = Container::start(&catalog).unwrap();

  let concierge = bean!(container, Concierge);

  assert_eq!(concierge.greeter.greet(), "Hello!");
}

#[test]
fn test_scoped_catalog_only_sees_its_module() {
  mod front_desk {
    pub struct Bell;
  }
  mod back_office {
    pub struct Ledger;
  }

  let catalog = StaticCatalog::new()
    .with(ComponentDescriptor::singleton(|_| Ok(front_desk::Bell)).build())
    .with(ComponentDescriptor::singleton(|_| Ok(back_office::Ledger)).build());

  let bell_path = std::any::type_name::<front_desk::Bell>();
  let prefix = bell_path.trim_end_matches("::Bell");
  let container = Container::start(&catalog.within(prefix)).unwrap();

  assert!(container.contains_bean::<front_desk::Bell>());
  assert!(!container.contains_bean::<back_office::Ledger>());
}

#[test]
#[should_panic(expected = "Failed to resolve required bean")]
fn test_bean_panics_on_missing_concrete_type() {
  struct Missing;
  let container = Container::start(&StaticCatalog::new()).unwrap();
  bean!(container, Missing);
}

#[test]
#[should_panic(expected = "Failed to resolve required trait bean")]
fn test_bean_panics_on_missing_trait() {
  trait MissingTrait: Send + Sync {}
  let container = Container::start(&StaticCatalog::new()).unwrap();
  bean!(container, trait MissingTrait);
}

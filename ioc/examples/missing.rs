use beanstalk_ioc::{bean, ComponentDescriptor, Container, Error, StaticCatalog};
use std::panic;

struct UnregisteredService;

struct Alpha;
struct Beta;

fn main() {
  let container = Container::start(&StaticCatalog::new()).expect("empty container should start");

  // --- Using the panicking `bean!` macro ---
  println!("Attempting to resolve a bean that was never declared...");

  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _service = bean!(container, UnregisteredService);
  }));

  assert!(result.is_err(), "bean! should have panicked.");
  println!("Successfully caught the expected panic from bean!.");

  // --- Using the fallible `get_bean()` method ---
  println!("\nNow, attempting to resolve using the fallible `get_bean()` method...");

  match container.get_bean::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the bean!"),
    Err(err) => println!("Correctly received an error: {}", err),
  }

  // --- Start-up failures ---
  println!("\nStarting a container whose components depend on each other...");

  let cyclic = StaticCatalog::new()
    .with(ComponentDescriptor::singleton(|_| Ok(Alpha)).depends_on::<Beta>().build())
    .with(ComponentDescriptor::singleton(|_| Ok(Beta)).depends_on::<Alpha>().build());

  match Container::start(&cyclic) {
    Ok(_) => panic!("A cyclic catalog must not start!"),
    Err(err @ Error::CircularDependency { .. }) => println!("Start-up refused: {}", err),
    Err(other) => panic!("Unexpected error: {}", other),
  }
}

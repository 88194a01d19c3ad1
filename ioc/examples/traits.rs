use beanstalk_ioc::{bean, ComponentDescriptor, Container, StaticCatalog};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  // --- Declaration ---

  // ConsoleLogger is stored once, and served as Arc<dyn Logger> too.
  let logger = ComponentDescriptor::singleton(|_| Ok(ConsoleLogger))
    .provides::<dyn Logger>(|logger| logger as Arc<dyn Logger>)
    .build();

  // ReportService only declares what it needs; the container supplies it.
  let reports = ComponentDescriptor::singleton(|deps| {
    Ok(ReportService {
      logger: deps.get::<dyn Logger>()?,
    })
  })
  .depends_on::<dyn Logger>()
  .build();

  let container = Container::start(&StaticCatalog::new().with(reports).with(logger))
    .expect("container should start");

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = bean!(container, ReportService);

  println!("Using the service...");
  report_service.generate_report();

  let concrete = bean!(container, ConsoleLogger);
  assert!(std::ptr::eq(
    Arc::as_ptr(&concrete) as *const (),
    Arc::as_ptr(&report_service.logger) as *const ()
  ));
}

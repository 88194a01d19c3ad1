use beanstalk_ioc::{bean, find_config_file, ComponentDescriptor, Container, ContainerConfig, StaticCatalog};
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing_subscriber::EnvFilter;

struct UserRepository {
  initialized: AtomicBool,
}

impl UserRepository {
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

// A prototype that gets a unique ID upon creation.
struct TokenGenerator {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
    .init();

  let catalog = StaticCatalog::new()
    .with(
      ComponentDescriptor::singleton(|deps| {
        Ok(UserService {
          repository: deps.get::<UserRepository>()?,
        })
      })
      .depends_on::<UserRepository>()
      .build(),
    )
    .with(
      ComponentDescriptor::singleton(|_| {
        Ok(UserRepository {
          initialized: AtomicBool::new(false),
        })
      })
      .on_init(|repo| {
        repo.initialized.store(true, Ordering::SeqCst);
        println!("UserRepository initialized");
        Ok(())
      })
      .build(),
    )
    .with(
      ComponentDescriptor::prototype(|_| {
        Ok(TokenGenerator {
          id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
        })
      })
      .build(),
    );

  // Picks up ./beanstalk.<env>.yaml or ./beanstalk.yaml when present.
  let config = match find_config_file(None) {
    Ok(path) => {
      tracing::info!(path = %path.display(), "loading container config");
      ContainerConfig::from_file(&path).expect("config file should be valid")
    }
    Err(_) => ContainerConfig::default(),
  };

  let container = Container::start_with_config(&catalog, config).expect("container should start");

  println!("--- Resolving Singletons ---");
  let service = bean!(container, UserService);
  println!("{}", service.greeting(42));
  let repository = bean!(container, UserRepository);
  assert!(repository.initialized.load(Ordering::SeqCst));
  assert!(
    Arc::ptr_eq(&service.repository, &repository),
    "Singleton instances should be identical"
  );
  println!("The injected repository is the shared singleton, as expected.\n");

  println!("--- Resolving Prototypes ---");
  let t1 = bean!(container, TokenGenerator);
  let t2 = bean!(container, TokenGenerator);
  println!("Token 1 ID: {}, Token 2 ID: {}", t1.id, t2.id);
  assert!(
    !Arc::ptr_eq(&t1, &t2),
    "Prototype instances should be different"
  );
  println!("Prototype instances are different pointers, as expected.");
}

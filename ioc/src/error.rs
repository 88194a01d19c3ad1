use thiserror::Error;

/// Boxed error returned by user-supplied factories and initialization hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for `beanstalk_ioc`.
#[derive(Debug, Error)]
pub enum Error {
  #[error("No component satisfies {requested}")]
  NoSuchComponent { requested: String },

  #[error("{requested} is satisfied by {} components: {}", candidates.len(), candidates.join(", "))]
  AmbiguousComponent {
    requested: String,
    candidates: Vec<String>,
  },

  #[error("Circular dependency detected while resolving {requested}: {}", path.join(" -> "))]
  CircularDependency { requested: String, path: Vec<String> },

  #[error("Initialization hook of {component} failed: {source}")]
  InitializationFailure {
    component: String,
    #[source]
    source: BoxError,
  },

  #[error("Factory of {component} failed: {source}")]
  InstantiationFailure {
    component: String,
    #[source]
    source: BoxError,
  },

  #[error("{component} asked for {requested}, which it did not declare as a dependency")]
  UndeclaredDependency { component: String, requested: String },

  #[error("Resolution of {requested} exceeded the maximum depth of {limit}")]
  ResolutionTooDeep { requested: String, limit: usize },

  #[error("A singleton for {component} is already registered")]
  DuplicateSingleton { component: String },

  #[error("Bean {component} cannot be viewed as {requested}")]
  TypeMismatch { component: String, requested: String },

  #[error("Configuration file not found: {0}")]
  ConfigNotFound(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),

  #[error("Invalid configuration value for '{field}': {message}")]
  InvalidConfigValue { field: String, message: String },
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

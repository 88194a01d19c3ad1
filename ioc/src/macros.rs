//! Public macros for ergonomic bean lookup.

/// Resolves a required bean from a started container.
///
/// This macro is meant for beans the application cannot run without. It panics
/// if the bean cannot be resolved. For a non-panicking version, use
/// `container.get_bean::<T>()` directly.
///
/// # Panics
///
/// This macro will panic if the bean is missing, ambiguous, or its creation fails.
///
/// # Examples
///
/// ```
/// use beanstalk_ioc::{bean, ComponentDescriptor, Container, StaticCatalog};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let catalog = StaticCatalog::new()
///   .with(ComponentDescriptor::singleton(|_| Ok(String::from("hello"))).build())
///   .with(
///     ComponentDescriptor::singleton(|_| Ok(EnglishGreeter))
///       .provides::<dyn Greeter>(|g| g as Arc<dyn Greeter>)
///       .build(),
///   );
/// let container = Container::start(&catalog).unwrap();
///
/// let message = bean!(container, String);
/// assert_eq!(*message, "hello");
///
/// let greeter = bean!(container, trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! bean {
    // Arm for a trait object: bean!(container, trait MyTrait)
    ($container:expr, trait $trait_ident:ident) => {
        $container
            .get_bean::<dyn $trait_ident>()
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait bean {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    err
                )
            })
    };

    // Arm for a named trait object: bean!(container, trait MyTrait, "name")
    ($container:expr, trait $trait_ident:ident, $name:expr) => {
        $container
            .get_named_bean::<dyn $trait_ident>($name)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait bean {} named '{}': {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    $name,
                    err
                )
            })
    };

    // Arm for a concrete type: bean!(container, MyService)
    ($container:expr, $type:ty) => {
        $container
            .get_bean::<$type>()
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required bean {}: {}",
                    std::any::type_name::<$type>(),
                    err
                )
            })
    };

    // Arm for a named concrete type: bean!(container, MyService, "name")
    ($container:expr, $type:ty, $name:expr) => {
        $container
            .get_named_bean::<$type>($name)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required bean {} named '{}': {}",
                    std::any::type_name::<$type>(),
                    $name,
                    err
                )
            })
    };
}

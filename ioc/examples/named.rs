use beanstalk_ioc::{bean, ComponentDescriptor, Container, StaticCatalog};
use std::sync::Arc;

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() {
  // --- Declaration ---
  // Both implementations provide the trait, so each gets a qualifier name.
  let catalog = StaticCatalog::new()
    .with(
      ComponentDescriptor::singleton(|_| Ok(EmailSender))
        .named("email")
        .provides::<dyn MessageSender>(|s| s as Arc<dyn MessageSender>)
        .build(),
    )
    .with(
      ComponentDescriptor::singleton(|_| Ok(SmsSender))
        .named("sms")
        .provides::<dyn MessageSender>(|s| s as Arc<dyn MessageSender>)
        .build(),
    );
  let container = Container::start(&catalog).expect("container should start");

  // --- Resolution ---
  // Without a name the request is ambiguous and is refused.
  if let Err(err) = container.get_bean::<dyn MessageSender>() {
    println!("{}", err);
  }

  let email_notifier = bean!(container, trait MessageSender, "email");
  let sms_notifier = bean!(container, trait MessageSender, "sms");

  let result1 = email_notifier.send("test@example.com", "Hello from Beanstalk!");
  let result2 = sms_notifier.send("+123456789", "Hello from Beanstalk!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
}

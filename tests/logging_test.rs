//! Tests for init_logging (own binary: installs the global subscriber)

use mutxml::{init_logging, DocumentBuilder};

#[test]
fn given_verbosity_when_init_logging_then_installs_subscriber_once() {
    init_logging(2);
    assert!(tracing::dispatcher::has_been_set());

    // Second call finds a subscriber already installed and returns quietly.
    init_logging(3);

    let mut builder = DocumentBuilder::new();
    builder.add_subject("Foo.java", "Foo@bar(int)", 10);
    assert!(builder.add_mutant("Foo@bar(int)", "5", 42).is_ok());
}

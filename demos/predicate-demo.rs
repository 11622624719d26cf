//! Demo of the fluent predicate-assertion API.

use attest::{double, expect, expect_block, RaisedError, Registry, Spy};

fn main() -> anyhow::Result<()> {
    // Example 1: predicate queries on a stand-in
    println!("=== Predicate Example ===");
    let proud_man = double!("proud man", "humbled" => true);
    let result = expect(&proud_man).be("humbled").evaluate()?;
    println!(
        "{}: {}",
        result.description,
        if result.passed { "PASS" } else { "FAIL" }
    );

    // Example 2: size assertions with a descriptive label
    println!("\n=== Size Example ===");
    let result = expect(&"OOPs").have(4).of("characters").evaluate()?;
    println!(
        "{}: {}",
        result.description,
        if result.passed { "PASS" } else { "FAIL" }
    );

    let result = expect(&"OOPs").have(3).of("characters").evaluate()?;
    println!(
        "{}: {}",
        result.description,
        result.reason.as_deref().unwrap_or("PASS")
    );

    // Example 3: method-call expectations through a spy
    println!("\n=== Spy Example ===");
    let man = double!("man", "more_enlightened_than" => false);
    let spy = Spy::on(&man)
        .expect_received("more_enlightened_than")
        .and_return(true);

    expect(&spy).be("more_enlightened_than").with_arg("god").to_hold();
    spy.verify()?;
    println!(
        "more_enlightened_than? received {} time(s)",
        spy.received_count("more_enlightened_than")
    );

    // Example 4: raised errors carry their message verbatim
    println!("\n=== Raise Example ===");
    let result = expect_block(|| Err(RaisedError::new("killer's name is unknown")))
        .evaluate_raise("killer's name is unknown");
    println!(
        "{}: {}",
        result.description,
        if result.passed { "PASS" } else { "FAIL" }
    );

    // Example 5: an explicit registry instead of shared global state
    println!("\n=== Registry Example ===");
    let mut registry = Registry::new();
    registry.record(Some(1));
    registry.record(Some(1));
    registry.record(None);
    println!("recorded {} unique id(s)", registry.len());
    registry.reset();
    println!("after reset: {} id(s)", registry.len());

    Ok(())
}

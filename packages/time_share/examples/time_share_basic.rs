//! Simplified example demonstrating key `time_share` types working together.
//!
//! This example shows how to use the main types in the `time_share` package:
//! - `Session`: owns the timers and accumulated totals for one profiling run
//! - `ActionSpan`: scoped measurement that stops its action when dropped
//!
//! Run with: `cargo run --example time_share_basic`.

use std::collections::HashMap;
use std::fmt::Write;
use std::hint::black_box;

use time_share::{Error, Session};

fn main() -> Result<(), Error> {
    println!("=== Wall-Clock Time Tracking Example ===");
    println!();

    // Create a tracking session - the session clock starts here.
    let session = Session::new();
    println!("✓ Created tracking session");
    println!();

    // Time string formatting work with a scoped span.
    {
        let _span = session.measure("string_formatting")?;
        let mut result = String::new();
        for i in 0..5000 {
            write!(
                result,
                "String number {i} with some content that is longer to force more work. "
            )
            .expect("writing to a String cannot fail");
        }
        black_box(result);
    }

    // Time hashmap population, several cycles under the same action name.
    for i in 0..3 {
        let _span = session.measure("hashmap_creation")?;
        let mut map = HashMap::new();
        for j in 0..1000 {
            map.insert(format!("key{i}-{j}"), format!("value{i}-{j}"));
        }
        black_box(map);
    }

    // Time computation with explicit start/stop calls.
    session.start("computation")?;
    let mut sum = 0_u64;
    for j in 0..500_000_u64 {
        sum = sum.wrapping_add(j).wrapping_mul(1_103_515_245).wrapping_add(12_345);
    }
    black_box(sum);
    let elapsed = session.stop("computation")?;
    println!("computation alone took {elapsed:?}");
    println!();

    // One report ranking the actions by their share of elapsed session time.
    session.print_to_stdout();

    Ok(())
}

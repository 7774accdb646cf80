//! Example demonstrating how to auto-time existing functions.
//!
//! Wrapping a callable amounts to acquiring a scoped measurement around its
//! invocation: `Session::measure_call()` starts the action, invokes the
//! callable and stops the action on the way out - also when the callable
//! panics. The callable's own result passes through unchanged.
//!
//! Run with: `cargo run --example time_share_wrapped_calls`.

use std::hint::black_box;

use time_share::{Error, Session};

fn parse_records(input: &str) -> Vec<u64> {
    input
        .split(',')
        .filter_map(|field| field.trim().parse().ok())
        .collect()
}

fn summarize_records(records: &[u64]) -> u64 {
    records.iter().copied().map(|value| value.wrapping_mul(7)).sum()
}

fn main() -> Result<(), Error> {
    let session = Session::new();

    let input = (0..50_000)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    // Each wrapped call is timed under its own action name; repeated calls
    // accumulate into the same totals.
    let records = session.measure_call("parse_records", || parse_records(&input))?;

    for _ in 0..10 {
        let digest = session.measure_call("summarize_records", || summarize_records(&records))?;
        black_box(digest);
    }

    println!("{session}");

    Ok(())
}

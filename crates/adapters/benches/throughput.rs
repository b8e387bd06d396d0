//! Formatter throughput benchmark.

use kvlog_adapters::{JsonLogger, LogSink, TextLogger};
use kvlog_ports::{Logger, kvs};
use std::io;
use std::sync::Arc;
use std::time::Instant;

const ITERATIONS: u32 = 200_000;

/// Sink that discards everything, so only formatting is measured.
struct DiscardSink;

impl LogSink for DiscardSink {
    fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        std::hint::black_box(bytes);
        Ok(())
    }
}

fn run(name: &str, logger: &dyn Logger) {
    let start = Instant::now();
    for iteration in 0..ITERATIONS {
        logger.info(
            "request served",
            &kvs!["iteration", iteration, "path", "/api/v1/items", "ok", true],
        );
    }
    let elapsed = start.elapsed();
    let per_call = elapsed / ITERATIONS;
    println!("{name}: {ITERATIONS} calls in {} ms ({per_call:?}/call)", elapsed.as_millis());
}

fn main() {
    if std::env::args().any(|arg| arg == "--list") {
        println!("throughput: benchmark");
        return;
    }

    run("json", &JsonLogger::new(Arc::new(DiscardSink)));
    run("text", &TextLogger::new(Arc::new(DiscardSink)));
}

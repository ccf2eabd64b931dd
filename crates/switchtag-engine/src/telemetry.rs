// SPDX-License-Identifier: Apache-2.0 OR MIT
#![cfg_attr(not(feature = "telemetry"), allow(dead_code))]

#[cfg(feature = "telemetry")]
mod otel {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::OnceLock;
    use std::time::Duration;

    use opentelemetry::global;
    use opentelemetry::metrics::{Counter, Histogram};
    use opentelemetry::KeyValue;

    const METER_NAME: &str = "switchtag_engine";

    static ENABLED: AtomicBool = AtomicBool::new(false);
    static HANDLES: OnceLock<Handles> = OnceLock::new();

    struct Handles {
        parse_hist: Histogram<f64>,
        evaluate_hist: Histogram<f64>,
        parse_counter: Counter<u64>,
        evaluate_counter: Counter<u64>,
        pattern_failure_counter: Counter<u64>,
    }

    impl Handles {
        fn new() -> Self {
            let meter = global::meter(METER_NAME);
            let parse_hist = meter
                .f64_histogram("switchtag.parse.duration_ms")
                .with_description("Block parse duration in milliseconds")
                .init();
            let evaluate_hist = meter
                .f64_histogram("switchtag.evaluate.duration_ms")
                .with_description("Block evaluation duration in milliseconds")
                .init();
            let parse_counter = meter
                .u64_counter("switchtag.parse.count")
                .with_description("Number of switch blocks parsed")
                .init();
            let evaluate_counter = meter
                .u64_counter("switchtag.evaluate.count")
                .with_description("Number of switch block evaluations")
                .init();
            let pattern_failure_counter = meter
                .u64_counter("switchtag.pattern_failure.count")
                .with_description("Number of case patterns that failed to compile")
                .init();
            Self {
                parse_hist,
                evaluate_hist,
                parse_counter,
                evaluate_counter,
                pattern_failure_counter,
            }
        }
    }

    fn handles() -> &'static Handles {
        HANDLES.get_or_init(Handles::new)
    }

    pub fn enable() {
        ENABLED.store(true, Ordering::Relaxed);
    }

    pub fn disable() {
        ENABLED.store(false, Ordering::Relaxed);
    }

    fn enabled() -> bool {
        ENABLED.load(Ordering::Relaxed)
    }

    pub fn record_parse(tagdata_len: usize, nested_blocks: usize, duration: Duration) {
        if !enabled() {
            return;
        }
        let hs = handles();
        let attrs = [
            KeyValue::new("tagdata.length", tagdata_len as i64),
            KeyValue::new("tagdata.nested_blocks", nested_blocks as i64),
        ];
        hs.parse_counter.add(1, &attrs);
        hs.parse_hist
            .record(duration.as_secs_f64() * 1_000.0, &attrs);
    }

    pub fn record_evaluate(tagdata_len: usize, duration: Duration, matched: bool) {
        if !enabled() {
            return;
        }
        let hs = handles();
        let attrs = [
            KeyValue::new("tagdata.length", tagdata_len as i64),
            KeyValue::new("evaluate.matched", matched),
        ];
        hs.evaluate_counter.add(1, &attrs);
        hs.evaluate_hist
            .record(duration.as_secs_f64() * 1_000.0, &attrs);
    }

    pub fn record_pattern_failure(kind: &'static str) {
        if !enabled() {
            return;
        }
        let hs = handles();
        hs.pattern_failure_counter
            .add(1, &[KeyValue::new("failure.kind", kind)]);
    }
}

#[cfg(not(feature = "telemetry"))]
mod otel {
    use std::time::Duration;

    pub fn enable() {}
    pub fn disable() {}
    pub fn record_parse(_tagdata_len: usize, _nested_blocks: usize, _duration: Duration) {}
    pub fn record_evaluate(_tagdata_len: usize, _duration: Duration, _matched: bool) {}
    pub fn record_pattern_failure(_kind: &'static str) {}
}

pub use otel::{disable, enable, record_evaluate, record_parse, record_pattern_failure};

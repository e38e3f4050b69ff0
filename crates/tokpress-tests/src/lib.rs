//! Shared fixtures for the tokpress integration tests and benches.

/// A log excerpt with timestamps, repeated lines, and level markers.
#[must_use]
pub fn log_fixture() -> String {
    let mut log = String::new();
    for second in 0..20 {
        log.push_str(&format!(
            "2024-06-01T10:00:{second:02} [INFO] worker heartbeat ok\n"
        ));
    }
    // Section gap as emitted by the worker between runs.
    log.push_str("\n\n");
    log.push_str("2024-06-01T10:00:20 [ERROR] upstream timeout\n");
    log.push_str("2024-06-01T10:00:21 [WARN] retrying with backoff\n");
    log
}

/// Markdown with prose, hedges, a fenced example, and inline code.
#[must_use]
pub fn markdown_fixture() -> String {
    "\
# Worker guide

This guide is basically an overview of the worker. It is really very \
simple to run `worker start` in order to launch it.

## Example

```sh
worker start --pool 4
```

- actually supports hot reload
- definitely restarts on panic

As mentioned above, the worker is simple. The worker is simple.
"
    .to_owned()
}

/// Hedge-heavy prose that every preset can shorten further.
#[must_use]
pub fn hedge_fixture() -> String {
    "It is basically clear that we should simply retry. Obviously the \
     queue is really full at this point in time, and prior to restarting \
     we should actually drain it in order to avoid data loss. IMO this \
     is definitely the safest plan for the purpose of stability."
        .to_owned()
}

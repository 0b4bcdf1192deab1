//! Process-wide panic hook that keeps extractor panics off the console
//!
//! Extraction workers already turn an extractor panic into a parse error
//! count. The default hook would still print the panic to stderr, so the
//! binary installs this one: panics on `extract-N` threads are logged at
//! `debug` and every other panic goes to the hook that was installed before.

use std::panic;
use std::thread;

use super::extract_stage::{panic_message, EXTRACT_STAGE};

/// Wrap the current panic hook so extraction worker panics stay silent
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let current = thread::current();
        match current.name().filter(|name| is_extract_thread(name)) {
            Some(name) => tracing::debug!(
                thread = name,
                location = %info
                    .location()
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                panic = panic_message(info.payload()),
                "extractor panicked"
            ),
            None => previous(info),
        }
    }));
}

/// Whether a thread name belongs to the extraction pool
pub fn is_extract_thread(name: &str) -> bool {
    name.strip_prefix(EXTRACT_STAGE)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

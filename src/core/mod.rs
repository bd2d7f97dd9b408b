// src/core/mod.rs

// This makes the `models`, `domain`, `wordlist`, and `scanner` modules
// available to other parts of the application. The `mod.rs` file acts as the
// root of the `core` module, exposing its sub-modules to the crate.

/// Contains all data structures and models used throughout the application,
/// such as `ScanConfig`, `ScanReport`, `Subdomain` and `ParameterFinding`.
pub mod models;

/// Pure hostname/URL normalization: target cleaning, subdomain extraction
/// and query-parameter extraction. No I/O.
pub mod domain;

/// Keyword list loading for parameter flagging, with layered fallbacks down
/// to the built-in default set.
pub mod wordlist;

/// Houses the scan orchestrator and the individual discovery sources,
/// liveness prober and parameter flagger.
pub mod scanner;

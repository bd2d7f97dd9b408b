// src/ui/widgets/mod.rs

// Declare all of our widget modules here so the `ui` module can compose them.

pub mod disclaimer_popup; // The legal disclaimer popup shown at startup.
pub mod footer;           // The dynamic footer bar with key hints.
pub mod input;            // The target-domain input field.
pub mod log_view;         // The panel tailing the log file.
pub mod results_view;     // The subdomain table and flagged-parameter list.
pub mod summary;          // The scan summary / options panel.

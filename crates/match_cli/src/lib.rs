//! Match CLI library
//!
//! Scenario files (JSON/YAML) → simulator → event log as JSON lines,
//! plus the walkthrough demos. The simulator itself lives in `match_core`;
//! everything here is I/O around it.

pub mod demo;
pub mod scenario;

pub use scenario::{
    load_scenario, run_batch, run_scenario, write_json_lines, BatchEntry, RejectedStep,
    RunReport, Scenario, StepSpec,
};

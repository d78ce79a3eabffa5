//! ecgw-cli library - demo glue around the ECGW classification core
//!
//! Built-in patient cases, synthetic beat-train scenarios and text/JSON
//! report output. All clinical decisions live in `ecgw-common`.

pub mod cases;
pub mod report;
pub mod scenarios;

pub use cases::{DemoCase, DEMO_CASES};
pub use report::{AnalysisExport, ReportFormatter};
pub use scenarios::{Scenario, ScenarioError, SyntheticSegment};

//! Stress-test projection.

mod scenario_calculator;
mod scenario_model;


pub use scenario_calculator::run_stress_test;
pub use scenario_model::{HoldingProjection, StressScenario, StressTestResult};

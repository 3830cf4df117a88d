mod context;
mod features;
mod runner;

pub mod steps;

pub use {
  context::{PendingTransfer, ScenarioContext},
  features::{features, Feature, Scenario},
  runner::{run, Report, ScenarioResult},
};

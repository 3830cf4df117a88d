use {
  crate::{Feature, ScenarioContext},
  tracing::{error, info},
};

/// Outcome of one scenario run.
#[derive(Debug)]
pub struct ScenarioResult {
  pub feature: &'static str,
  pub scenario: &'static str,
  /// The failing step and the reason, if any step failed.
  pub failure: Option<(String, String)>,
}

#[derive(Debug, Default)]
pub struct Report {
  pub results: Vec<ScenarioResult>,
}

impl Report {
  pub fn passed(&self) -> usize {
    self.results.iter().filter(|r| r.failure.is_none()).count()
  }

  pub fn failed(&self) -> impl Iterator<Item = &ScenarioResult> {
    self.results.iter().filter(|r| r.failure.is_some())
  }

  pub fn is_success(&self) -> bool {
    self.failed().next().is_none()
  }
}

/// Runs every scenario whose name contains `filter`, each in a fresh
/// context produced by `setup`.
///
/// Steps of a scenario run strictly in order. The first failing step
/// fails the scenario and the remaining steps are skipped.
pub async fn run(
  features: &[Feature],
  filter: Option<&str>,
  setup: impl Fn() -> anyhow::Result<ScenarioContext>,
) -> anyhow::Result<Report> {
  let mut report = Report::default();
  let filter = filter.map(str::to_lowercase);

  for feature in features {
    for scenario in &feature.scenarios {
      if let Some(filter) = &filter {
        if !scenario.name.to_lowercase().contains(filter) {
          continue;
        }
      }

      info!("Scenario: {} / {}", feature.name, scenario.name);
      let mut ctx = setup()?;
      let mut failure = None;

      for step in &scenario.steps {
        info!("  {} {step}", step.keyword());
        if let Err(e) = step.run(&mut ctx).await {
          error!("  step failed: {e:#}");
          failure = Some((step.to_string(), format!("{e:#}")));
          break;
        }
      }

      report.results.push(ScenarioResult {
        feature: feature.name,
        scenario: scenario.name,
        failure,
      });
    }
  }

  Ok(report)
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-run regression detection.
//!
//! Diffs the two most recent snapshots per `(spec, scenario)` key and emits
//! only PASS→FAIL transitions. The narrow definition is deliberate:
//! FAIL→FAIL is already known, SKIP→FAIL was never green, and PASS→SKIP is
//! a coverage question, not a regression. Fewer than two snapshots yields
//! an empty list.

#[cfg(test)]
#[path = "regression_tests.rs"]
mod tests;

use std::collections::HashMap;

use serde::Serialize;

use crate::results::{self, Status};
use crate::runs::RunStore;

/// One scenario that degraded from PASS to FAIL between consecutive runs.
#[derive(Debug, Clone, Serialize)]
pub struct Regression {
    pub spec_id: String,
    pub scenario_id: String,
    pub previous: Status,
    pub current: Status,
}

/// Detect regressions between the two most recent snapshots.
pub fn detect(store: &RunStore) -> anyhow::Result<Vec<Regression>> {
    let (Some(latest), Some(previous)) = (store.latest()?, store.previous()?) else {
        return Ok(Vec::new());
    };

    let previous_results = results::parse_run_dir(&previous)?;
    let latest_results = results::parse_run_dir(&latest)?;

    let mut prior: HashMap<(&str, &str), Status> = HashMap::new();
    for result in &previous_results {
        for scenario in &result.scenarios {
            prior.insert((&result.spec_id, &scenario.scenario), scenario.status);
        }
    }

    let mut regressions = Vec::new();
    for result in &latest_results {
        for scenario in &result.scenarios {
            let was = prior.get(&(result.spec_id.as_str(), scenario.scenario.as_str()));
            if was == Some(&Status::Pass) && scenario.status == Status::Fail {
                regressions.push(Regression {
                    spec_id: result.spec_id.clone(),
                    scenario_id: scenario.scenario.clone(),
                    previous: Status::Pass,
                    current: Status::Fail,
                });
            }
        }
    }

    tracing::debug!(count = regressions.len(), "regression detection complete");
    Ok(regressions)
}

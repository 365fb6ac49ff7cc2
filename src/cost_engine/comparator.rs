//! Two-group cost comparison
//!
//! Runs the aggregate → cost-model chain once per group and reports the
//! difference. The comparator is generic over any two groups — "Derrick"
//! and "Non-Derrick" are display labels owned by the caller, not
//! semantics here. Each group carries its own configuration; there is no
//! shared state between the two sides.
//!
//! Sign convention: `delta = group B − group A`. A positive delta means
//! group B costs more than group A.

use super::{compute_cost, AnalysisError, GroupAggregates};
use crate::types::{CostConfig, CostDelta, GroupComparison, ShakerRecord};

/// Compare two independently filtered and configured record groups.
pub fn compare(
    records_a: &[&ShakerRecord],
    config_a: &CostConfig,
    records_b: &[&ShakerRecord],
    config_b: &CostConfig,
) -> Result<GroupComparison, AnalysisError> {
    let group_a = compute_cost(&GroupAggregates::from_records(records_a), config_a)?;
    let group_b = compute_cost(&GroupAggregates::from_records(records_b), config_b)?;

    let delta = CostDelta {
        total_cost: group_b.total_cost - group_a.total_cost,
        cost_per_foot: group_b.cost_per_foot - group_a.cost_per_foot,
    };

    Ok(GroupComparison {
        group_a,
        group_b,
        delta,
    })
}

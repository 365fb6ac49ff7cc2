//! Cost model
//!
//! Pure mapping from aggregated volumes plus a cost configuration to an
//! itemized breakdown:
//!
//! ```text
//! dilution_cost            = dilution_rate * total_dilution
//! haul_off_cost            = haul_off_rate * haul_off
//! screen_cost              = screen_price * screens_per_rig
//! equipment_cost_amortized = equipment_cost * shakers_installed / shaker_life_years
//! engineering_cost         = engineering_day_rate
//! other_cost               = other_cost
//! total_cost               = sum of the six components
//! cost_per_foot            = total_cost / interval_length   (0 when no footage)
//! ```
//!
//! Zero footage is a valid state (an empty selection), priced at
//! cost-per-foot 0. A zero shaker life is not — it is a configuration
//! error caught before any arithmetic.

use super::{AnalysisError, GroupAggregates};
use crate::types::{CostBreakdown, CostConfig};

/// Reject configurations the model cannot price: negative rates/costs and
/// a non-positive amortization period (a division operand).
pub fn validate_config(config: &CostConfig) -> Result<(), AnalysisError> {
    let non_negative = [
        ("dilution_rate", config.dilution_rate),
        ("haul_off_rate", config.haul_off_rate),
        ("screen_price", config.screen_price),
        ("equipment_cost", config.equipment_cost),
        ("engineering_day_rate", config.engineering_day_rate),
        ("other_cost", config.other_cost),
    ];
    for (name, value) in non_negative {
        if value < 0.0 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "{name} = {value} cannot be negative"
            )));
        }
    }
    if config.shaker_life_years <= 0.0 {
        return Err(AnalysisError::InvalidConfiguration(format!(
            "shaker_life_years = {} must be > 0 (amortization divisor)",
            config.shaker_life_years
        )));
    }
    Ok(())
}

/// Price one record group. Validates the configuration first; the
/// returned breakdown's `total_cost` is the exact unrounded sum of its
/// six components.
pub fn compute_cost(
    aggregates: &GroupAggregates,
    config: &CostConfig,
) -> Result<CostBreakdown, AnalysisError> {
    validate_config(config)?;

    let dilution_cost = config.dilution_rate * aggregates.total_dilution;
    let haul_off_cost = config.haul_off_rate * aggregates.haul_off;
    let screen_cost = config.screen_price * f64::from(config.screens_per_rig);
    let equipment_cost_amortized =
        config.equipment_cost * f64::from(config.shakers_installed) / config.shaker_life_years;
    let engineering_cost = config.engineering_day_rate;
    let other_cost = config.other_cost;

    let total_cost = dilution_cost
        + haul_off_cost
        + screen_cost
        + equipment_cost_amortized
        + engineering_cost
        + other_cost;

    let cost_per_foot = if aggregates.interval_length > 0.0 {
        total_cost / aggregates.interval_length
    } else {
        0.0
    };

    Ok(CostBreakdown {
        dilution_cost,
        haul_off_cost,
        screen_cost,
        equipment_cost_amortized,
        engineering_cost,
        other_cost,
        total_cost,
        cost_per_foot,
    })
}

//! Cost configuration and cost breakdown types

use serde::{Deserialize, Serialize};

/// Parameters for one cost calculation.
///
/// All values are per-calculation inputs: the comparator never shares a
/// config between groups, each side carries its own. Defaults match the
/// dashboard's initial slider positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Dilution cost rate ($ per bbl of dilution)
    pub dilution_rate: f64,
    /// Haul-off cost rate ($ per bbl hauled)
    pub haul_off_rate: f64,
    /// Price per screen ($)
    pub screen_price: f64,
    /// Screens consumed per rig over the interval
    pub screens_per_rig: u32,
    /// Purchase cost per shaker ($)
    pub equipment_cost: f64,
    /// Number of shakers installed on the rig
    pub shakers_installed: u32,
    /// Amortization period for the shaker fleet (years, must be > 0)
    pub shaker_life_years: f64,
    /// Solids-control engineering day rate ($)
    pub engineering_day_rate: f64,
    /// Other daily cost ($)
    pub other_cost: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            dilution_rate: 100.0,
            haul_off_rate: 20.0,
            screen_price: 500.0,
            screens_per_rig: 1,
            equipment_cost: 100_000.0,
            shakers_installed: 3,
            shaker_life_years: 7.0,
            engineering_day_rate: 1000.0,
            other_cost: 500.0,
        }
    }
}

/// Itemized cost result for one record group.
///
/// `total_cost` is the exact sum of the six component fields; nothing is
/// rounded here — rounding is a display concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub dilution_cost: f64,
    pub haul_off_cost: f64,
    pub screen_cost: f64,
    pub equipment_cost_amortized: f64,
    pub engineering_cost: f64,
    pub other_cost: f64,
    pub total_cost: f64,
    /// Total cost normalized by footage drilled; 0 when the group drilled
    /// no footage (an empty selection is a valid state, not an error).
    pub cost_per_foot: f64,
}

/// Difference between two group breakdowns, computed as group B minus
/// group A. Positive values mean group B costs more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDelta {
    pub total_cost: f64,
    pub cost_per_foot: f64,
}

/// Result of comparing two independently filtered and configured groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupComparison {
    pub group_a: CostBreakdown,
    pub group_b: CostBreakdown,
    pub delta: CostDelta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_dashboard_sliders() {
        let config = CostConfig::default();
        assert_eq!(config.dilution_rate, 100.0);
        assert_eq!(config.haul_off_rate, 20.0);
        assert_eq!(config.shakers_installed, 3);
        assert_eq!(config.shaker_life_years, 7.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CostConfig = toml::from_str("dilution_rate = 250.0").unwrap();
        assert_eq!(config.dilution_rate, 250.0);
        assert_eq!(config.haul_off_rate, 20.0);
        assert_eq!(config.other_cost, 500.0);
    }
}

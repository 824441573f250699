//! Live conditions suggested by the autofill flow.

use serde::{Deserialize, Serialize};

use super::session::{SessionInput, TideDirection};

/// Environmental fields only. Personal profile fields never appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsSuggestion {
    pub swell_height: Option<String>,
    pub swell_period: Option<String>,
    pub swell_direction: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub tide_height: Option<String>,
    pub tide_direction: TideDirection,
}

impl ConditionsSuggestion {
    /// Overwrite the environmental fields of `input` that this suggestion carries.
    ///
    /// Session time, spots, skill, weight and boards are left alone. Tide
    /// direction is always replaced since it is normalized, never absent.
    pub fn merge_into(&self, input: &mut SessionInput) {
        let fields = [
            (&self.swell_height, &mut input.swell_height),
            (&self.swell_period, &mut input.swell_period),
            (&self.swell_direction, &mut input.swell_direction),
            (&self.wind_speed, &mut input.wind_speed),
            (&self.wind_direction, &mut input.wind_direction),
            (&self.tide_height, &mut input.tide_height),
        ];
        for (suggested, target) in fields {
            if let Some(value) = suggested {
                target.clone_from(value);
            }
        }
        input.tide_direction = self.tide_direction;
    }
}

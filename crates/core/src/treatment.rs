//! Treatment plan lookup.

use crate::{HealthError, HealthResult};
use catalogue::{Catalogue, TreatmentPlan};
use serde::Serialize;

/// A plan ready for display, with the reminders shown beneath it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreatmentPlanView {
    pub condition: String,
    pub plan: TreatmentPlan,
    /// True when the condition had no dedicated plan and the fallback was used.
    pub is_fallback: bool,
    pub reminders: Vec<String>,
}

/// Build the plan for the selected condition.
///
/// Any non-blank name is accepted; names without a dedicated plan (including names outside
/// the condition table) get the fallback plan.
///
/// # Errors
///
/// Returns [`HealthError::NoConditionSelected`] if `condition` is blank.
pub fn plan_for(condition: &str, catalogue: &Catalogue) -> HealthResult<TreatmentPlanView> {
    let condition = condition.trim();
    if condition.is_empty() {
        return Err(HealthError::NoConditionSelected);
    }

    let (plan, is_fallback) = match catalogue.treatment_plan(condition) {
        Some(plan) => (plan.clone(), false),
        None => {
            tracing::debug!("no dedicated treatment plan for '{}', using fallback", condition);
            (catalogue.fallback_plan().clone(), true)
        }
    };

    Ok(TreatmentPlanView {
        condition: condition.to_string(),
        plan,
        is_fallback,
        reminders: catalogue.guidance().treatment_reminders.clone(),
    })
}

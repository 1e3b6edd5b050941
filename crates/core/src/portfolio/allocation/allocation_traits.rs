use super::allocation_model::TargetAllocationModel;
use crate::errors::Result;
use crate::portfolios::RiskProfile;

/// Read access to configured target allocation models.
pub trait TargetAllocationRepositoryTrait: Send + Sync {
    /// Configured model for a profile, or `None` when the built-in default applies.
    fn get_target_allocation(&self, risk_profile: RiskProfile)
        -> Result<Option<TargetAllocationModel>>;
}

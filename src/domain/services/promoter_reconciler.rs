use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{
    models::association::PromoterDiff,
    ports::{AccountDirectory, PromoterAssociationRepository},
};
use crate::error::AppError;

/// Plans the association changes needed to move an event from its current
/// promoter set to a desired one. Applying the plan is the repository's job,
/// inside the same transaction as the event write.
pub struct PromoterReconciler {
    accounts: Arc<dyn AccountDirectory>,
    associations: Arc<dyn PromoterAssociationRepository>,
}

impl PromoterReconciler {
    pub fn new(accounts: Arc<dyn AccountDirectory>, associations: Arc<dyn PromoterAssociationRepository>) -> Self {
        Self { accounts, associations }
    }

    /// Plans against the event's stored associations.
    pub async fn plan<I>(&self, event_id: &str, desired: I) -> Result<PromoterDiff, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let desired = collapse(desired)?;
        let current = self.associations.promoter_ids(event_id).await?;
        let diff = PromoterDiff::between(&current, &desired);
        self.verify_additions(&diff).await?;

        debug!(
            event_id = %event_id,
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "promoter diff planned"
        );
        Ok(diff)
    }

    /// Plans for an event that does not exist yet, so everything desired is an addition.
    pub async fn plan_initial<I>(&self, desired: I) -> Result<PromoterDiff, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let desired = collapse(desired)?;
        let diff = PromoterDiff::between(&BTreeSet::new(), &desired);
        self.verify_additions(&diff).await?;
        Ok(diff)
    }

    async fn verify_additions(&self, diff: &PromoterDiff) -> Result<(), AppError> {
        for promoter_id in &diff.to_add {
            let account = self.accounts.lookup(promoter_id).await?
                .ok_or_else(|| AppError::InvalidPromoter(format!("account {} not found", promoter_id)))?;

            if !account.is_promoter() {
                return Err(AppError::InvalidPromoter(format!(
                    "account {} is {}, not PROMOTER",
                    promoter_id, account.account_type
                )));
            }
        }
        Ok(())
    }
}

fn collapse<I>(desired: I) -> Result<BTreeSet<String>, AppError>
where
    I: IntoIterator<Item = String>,
{
    let set: BTreeSet<String> = desired
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    if set.is_empty() {
        return Err(AppError::EmptyPromoterSet);
    }
    Ok(set)
}

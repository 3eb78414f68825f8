pub mod capacity_guard;
pub mod lifecycle;
pub mod promoter_reconciler;
pub mod review_scores;
pub mod validation;

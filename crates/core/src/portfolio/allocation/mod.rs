//! Target allocation models, alignment scoring and constituent price checks.

mod allocation_calculator;
mod allocation_model;
mod allocation_service;
mod allocation_traits;


pub use allocation_calculator::{alignment_score, constituent_signal};
pub use allocation_model::*;
pub use allocation_service::AllocationService;
pub use allocation_traits::TargetAllocationRepositoryTrait;

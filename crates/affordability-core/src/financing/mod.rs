//! Financing plans, the down-payment and amortization-ladder engine, and
//! the form state the engine is fed from.

pub mod engine;
pub mod form;
pub mod plans;
pub mod transition;

pub use engine::{
    analyze_affordability, build_amortization_ladder, compute, compute_down_payment,
    resolve_term_index, ComputationInput, ComputationResult, DownPayment, LadderRow,
    TermResolution,
};
pub use form::{ConstructionStatus, FormState, LotType, PropertyDetails};
pub use plans::{DownPaymentModel, FinancingPlan, PlanTable};
pub use transition::{on_financing_change, PlanSelection};

pub mod compute;
pub mod payment;
pub mod plans;
pub mod reset;

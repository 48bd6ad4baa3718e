//! Command execution functions for release operations.

mod doctor;
mod publish;
mod release;

pub use doctor::{Check, Environment, collect_checks, run_doctor};
pub use publish::run_publish;
pub use release::{plan_release, run_release};

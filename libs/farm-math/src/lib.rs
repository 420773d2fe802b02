#![no_std]

pub mod accrual;
pub mod appraisal;
pub mod weight_math;

pub use accrual::*;
pub use appraisal::*;
pub use weight_math::*;

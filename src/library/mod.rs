//! Witness-column builders shared by the proving key finalisation steps.

mod grand_product;
mod logderiv;

pub use grand_product::{compute_grand_product, compute_public_input_delta};
pub use logderiv::compute_logderivative_inverse;

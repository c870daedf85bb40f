mod reduce;

pub use reduce::{check_finite, max_asymmetry, reduce_couplings};

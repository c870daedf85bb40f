mod pseudoinverse;
mod resistance;

pub use pseudoinverse::{
    pseudo_inverse, pseudo_inverse_connected, PseudoInverse, PseudoInverseOptions,
};
pub use resistance::{
    admittance_matrix, kirchhoff_index, kirchhoff_index_from_resistance,
    kirchhoff_transport_index, resistance_distance_matrix, resistance_distance_matrix_with,
    resistance_from_pinv, transport_index_from_resistance, TransportMetrics,
};

// NETWORK CONSTRUCTION
// couplings with an absolute value at or below this threshold (in the energy
// units of the coupling matrix) do not create an edge
pub const THRESHOLD: f64 = 0.0;
// edges carry the coupling magnitude as conductance
pub const WEIGHTED: bool = true;
// config file
pub const CONFIG_FILE_NAME: &str = "ctnet.toml";

// PSEUDOINVERSE
// eigenvalues of the Laplacian below RTOL_FACTOR * n * eps * max|lambda| are
// treated as zero. n is the number of fragments in the network
pub const PINV_RTOL_FACTOR: f64 = 1.0;
// if the smallest retained eigenvalue is below this ratio of the largest
// eigenvalue, the pseudoinverse is flagged as numerically unstable
pub const PINV_INSTABILITY_RATIO: f64 = 1.0e-10;
// treat an unstable pseudoinverse as an error instead of a warning
pub const PINV_STRICT: bool = false;

// PARALLELISATION
// evaluate the transport metrics of different networks in parallel
pub const PARALLEL: bool = true;

// symmetry of the full coupling matrix is checked with this relative tolerance
pub const SYMMETRY_TOL: f64 = 1.0e-8;

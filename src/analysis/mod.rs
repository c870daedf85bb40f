mod frame;
mod logging;
mod series;

pub use frame::{analyse_frame, FrameAnalysis, NetworkSummary};
pub use series::{analyse_series, largest_network_sizes};

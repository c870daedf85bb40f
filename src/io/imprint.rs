use crate::io::Configuration;
use crate::network::Weighting;
use log::info;

/// Name and version of the library, printed once before a series of frames.
pub fn write_header() {
    info!("{:=^80}", "");
    info!(
        "{: ^80}",
        format!("ctnet {}", env!("CARGO_PKG_VERSION"))
    );
    info!("{: ^80}", "charge-transport networks from fragment couplings");
    info!("{:=^80}", "");
}

pub fn write_settings(config: &Configuration) {
    let weighting: &str = match config.weighting {
        Weighting::Weighted => "weighted",
        Weighting::Unweighted => "unweighted",
    };
    info!("{: <25} {:e}", "coupling threshold:", config.threshold);
    info!("{: <25} {}", "edge weights:", weighting);
    info!("{: <25} {}", "parallel metrics:", config.parallel);
    info!("{: <25} {}", "pinv rtol factor:", config.pinv.rtol_factor);
    info!("{: <25} {:e}", "pinv instability ratio:", config.pinv.instability_ratio);
    info!("{: <25} {}", "strict pinv:", config.pinv.strict);
    info!("{:-^80} ", "");
}

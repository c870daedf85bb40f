use crate::analysis::FrameAnalysis;
use crate::network::Weighting;
use crate::utils::Timer;
use log::info;

pub fn print_frame_analysis(analysis: &FrameAnalysis, timer: Timer) {
    let weighting: &str = match analysis.weighting {
        Weighting::Weighted => "weighted",
        Weighting::Unweighted => "unweighted",
    };
    info!("{:^80}", "");
    info!("{: ^80}", format!("Transport networks of frame {}", analysis.frame));
    info!("{:-^80}", "");
    info!("{: <25} {}", "fragments:", analysis.n_fragments);
    info!("{: <25} {:e}", "coupling threshold:", analysis.threshold);
    info!("{: <25} {}", "edge weights:", weighting);
    info!("{: <25} {}", "networks:", analysis.networks.len());
    info!("{: <25} {}", "isolated fragments:", analysis.isolated);
    info!("{:^80}", "");
    info!(
        "{: >5} {: >8} {: >8} {: >16} {: >18} {: >18}",
        "Net.", "#Frags", "#Edges", "sum coupling", "Kirchhoff index", "transport index"
    );
    info!("{:-^80}", "");
    for (i, summary) in analysis.summaries.iter().enumerate() {
        match (summary.kirchhoff_index, summary.kirchhoff_transport_index) {
            (Some(k), Some(kt)) => info!(
                "{: >5} {: >8} {: >8} {: >16.8e} {: >18.8e} {: >18.8e}{}",
                i + 1,
                summary.size(),
                summary.n_edges,
                summary.total_coupling,
                k,
                kt,
                if summary.unstable { " *" } else { "" }
            ),
            _ => info!(
                "{: >5} {: >8} {: >8} {: >16.8e} {: >37}",
                i + 1,
                summary.size(),
                summary.n_edges,
                summary.total_coupling,
                summary.error.as_deref().unwrap_or("failed")
            ),
        }
    }
    info!("{:-^80}", "");
    if analysis.summaries.iter().any(|s| s.unstable) {
        info!("{: <80}", "* ill-conditioned Laplacian, see warnings above");
    }
    info!("{}", timer);
}

use std::fmt;
use std::time::Instant;

/// Wall-clock stopwatch for one labelled step of the analysis. Its `Display` output is the
/// last line of the result tables.
pub struct Timer {
    label: String,
    started: Instant,
}

impl Timer {
    pub fn start(label: &str) -> Self {
        Timer {
            label: label.to_owned(),
            started: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>68} {:>8.3} s", self.label, self.elapsed_secs())
    }
}

mod imprint;
pub(crate) mod settings;

pub use imprint::{write_header, write_settings};
pub use settings::Configuration;

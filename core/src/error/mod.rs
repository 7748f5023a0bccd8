mod config_error;
mod lab_error;

pub use config_error::ConfigError;
pub use lab_error::LabError;

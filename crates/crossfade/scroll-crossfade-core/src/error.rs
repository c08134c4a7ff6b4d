use thiserror::Error;

/// Errors raised while parsing a single gallery setting.
///
/// The lenient resolver in [`crate::config`] never surfaces these to the host;
/// it logs them and substitutes the documented default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("end point '{0}' is not a number")]
    EndPointNotNumeric(String),
    #[error("end point {0} is outside [0, 100]")]
    EndPointOutOfRange(f64),
    #[error("animation speed '{0}' is not a number")]
    AnimationSpeedNotNumeric(String),
    #[error("animation speed {0} must be positive")]
    AnimationSpeedNotPositive(f64),
    #[error("unknown start mode '{0}'")]
    UnknownStartMode(String),
    #[error("unknown scroll smoothing '{0}'")]
    UnknownScrollSmoothing(String),
}

use std::io;

use thiserror::Error;

/// Invalid resampler configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value} (must be a positive finite rate)")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("invalid {name}: {value} (must be at least 1)")]
    InvalidChannels { name: &'static str, value: usize },

    #[error("invalid filter window: {0} (must be at least 1)")]
    InvalidFilterWindow(usize),

    #[error("invalid volume: {0} (must be finite)")]
    InvalidVolume(f64),
}

/// Errors returned by the stream adapters.
#[derive(Debug, Error)]
pub enum ResamplerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<ResamplerError> for io::Error {
    fn from(e: ResamplerError) -> Self {
        match e {
            ResamplerError::Io(e) => e,
            ResamplerError::Config(e) => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidRate { name: "in_rate", value: 0.0 };
        assert_eq!(format!("{}", err), "invalid in_rate: 0 (must be a positive finite rate)");

        let err = ConfigError::InvalidChannels { name: "out_channels", value: 0 };
        assert!(format!("{}", err).contains("out_channels"));

        let err = ConfigError::InvalidFilterWindow(0);
        assert!(format!("{}", err).contains("filter window"));
    }

    #[test]
    fn test_resampler_error_from() {
        let err: ResamplerError = ConfigError::InvalidFilterWindow(0).into();
        assert!(matches!(err, ResamplerError::Config(_)));
        assert!(format!("{}", err).starts_with("config error"));

        let err: ResamplerError = io::Error::new(io::ErrorKind::Other, "test").into();
        assert!(matches!(err, ResamplerError::Io(_)));
    }

    #[test]
    fn test_resampler_error_into_io() {
        let err: io::Error = ResamplerError::Config(ConfigError::InvalidVolume(f64::NAN)).into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err: io::Error =
            ResamplerError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "pipe")).into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}

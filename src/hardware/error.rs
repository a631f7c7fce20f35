//! Location source failure types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a location source could not deliver a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationErrorKind {
    /// The user or platform refused access to location
    PermissionDenied,
    /// No position could be determined (signal loss, no hardware)
    PositionUnavailable,
    /// No fix arrived within the configured timeout
    Timeout,
}

impl LocationErrorKind {
    /// Platform error code, as numbered by the W3C geolocation API
    pub fn code(&self) -> u16 {
        match self {
            LocationErrorKind::PermissionDenied => 1,
            LocationErrorKind::PositionUnavailable => 2,
            LocationErrorKind::Timeout => 3,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(LocationErrorKind::PermissionDenied),
            2 => Some(LocationErrorKind::PositionUnavailable),
            3 => Some(LocationErrorKind::Timeout),
            _ => None,
        }
    }
}

/// A location-unavailable failure with the source's human-readable message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationError {
    pub kind: LocationErrorKind,
    pub message: String,
}

impl LocationError {
    pub fn new(kind: LocationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(LocationErrorKind::PermissionDenied, message)
    }

    pub fn position_unavailable(message: impl Into<String>) -> Self {
        Self::new(LocationErrorKind::PositionUnavailable, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(LocationErrorKind::Timeout, message)
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LocationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for kind in [
            LocationErrorKind::PermissionDenied,
            LocationErrorKind::PositionUnavailable,
            LocationErrorKind::Timeout,
        ] {
            assert_eq!(LocationErrorKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(LocationErrorKind::from_code(0), None);
    }

    #[test]
    fn test_display_is_raw_message() {
        let error = LocationError::permission_denied("User denied Geolocation");
        assert_eq!(error.to_string(), "User denied Geolocation");
    }
}

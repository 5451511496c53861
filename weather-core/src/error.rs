use thiserror::Error;

/// Failures that end the current run. None of these are retried.
///
/// A sensor value missing from an otherwise valid response is not an error;
/// it shows up as `None` on the corresponding [`crate::Observation`] field.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("upstream request failed with HTTP {status}{}", status_hint(.status))]
    Http { status: u16 },

    #[error("authorization denied: upstream reported an authentication failure")]
    Auth,

    #[error("upstream response is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("station '{0}' not found (HTTP 404) -- possible invalid station id specified?")]
    InvalidStation(String),

    #[error("failed to reach upstream API")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse upstream JSON")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// HTTP status behind this error, if it came from a status code.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status } => Some(*status),
            GatewayError::InvalidStation(_) => Some(404),
            _ => None,
        }
    }
}

fn status_hint(status: &u16) -> &'static str {
    match *status {
        401 | 403 => " (authorization denied)",
        422 => " (request rejected as unprocessable)",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_mentions_authorization() {
        let err = GatewayError::Http { status: 401 };
        assert!(err.to_string().contains("authorization denied"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn invalid_station_is_a_404() {
        let err = GatewayError::InvalidStation("XXXX".into());
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("XXXX"));
    }
}

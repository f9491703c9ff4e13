use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the resolve/fetch pipeline. Every variant is terminal for a
/// single-shot invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Geocoding succeeded but no candidate's country equals the requested one.
    #[error("could not find a proper location match for {city} of country {country}")]
    NoMatch { city: String, country: String },

    /// The HTTP request failed to complete.
    #[error("request to the {endpoint} endpoint failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The response body was not valid JSON of the expected shape.
    #[error("failed to parse {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_names_city_and_country() {
        let err = Error::NoMatch {
            city: "The Hague".to_string(),
            country: "Netherlands".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not find a proper location match for The Hague of country Netherlands"
        );
    }

    #[test]
    fn status_error_carries_endpoint_and_body() {
        let err = Error::Status {
            endpoint: "geocoding",
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("geocoding"));
        assert!(msg.contains("429"));
        assert!(msg.contains("slow down"));
    }
}

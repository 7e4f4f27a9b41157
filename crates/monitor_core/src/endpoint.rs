use url::Url;

use crate::PROGRESS_PATH;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid page origin {origin}: {message}")]
    InvalidOrigin { origin: String, message: String },
    #[error("unsupported page scheme {0}")]
    UnsupportedScheme(String),
    #[error("page origin {0} has no host")]
    MissingHost(String),
}

/// Derive the progress stream URL from the hosting page's origin.
pub fn progress_endpoint(origin: &str) -> Result<Url, EndpointError> {
    endpoint_for_path(origin, PROGRESS_PATH)
}

/// Map `https` to `wss` and `http` to `ws`, keeping host and port, replacing the path.
pub fn endpoint_for_path(origin: &str, path: &str) -> Result<Url, EndpointError> {
    let origin = origin.trim();
    let page = Url::parse(origin).map_err(|err| EndpointError::InvalidOrigin {
        origin: origin.to_string(),
        message: err.to_string(),
    })?;

    let scheme = match page.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
    };
    let host = page
        .host_str()
        .ok_or_else(|| EndpointError::MissingHost(origin.to_string()))?;
    let authority = match page.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    Url::parse(&format!("{scheme}://{authority}{path}")).map_err(|err| {
        EndpointError::InvalidOrigin {
            origin: origin.to_string(),
            message: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_origin_maps_to_ws() {
        let url = progress_endpoint("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8000/ws/progress");
    }

    #[test]
    fn secure_origin_maps_to_wss_and_drops_page_path() {
        let url = progress_endpoint("https://captions.example.com/dashboard?tab=2").unwrap();
        assert_eq!(url.as_str(), "wss://captions.example.com/ws/progress");
    }

    #[test]
    fn ipv6_hosts_keep_brackets() {
        let url = progress_endpoint("http://[::1]:5173").unwrap();
        assert_eq!(url.as_str(), "ws://[::1]:5173/ws/progress");
    }

    #[test]
    fn rejects_non_web_schemes() {
        assert_eq!(
            progress_endpoint("ftp://example.com"),
            Err(EndpointError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            progress_endpoint("not a url"),
            Err(EndpointError::InvalidOrigin { .. })
        ));
    }

    #[test]
    fn custom_path_gets_leading_slash() {
        let url = endpoint_for_path("http://localhost", "stream").unwrap();
        assert_eq!(url.as_str(), "ws://localhost/stream");
    }
}

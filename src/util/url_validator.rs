use std::net::IpAddr;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// Plain HTTP to a non-loopback host.
    #[error("Insecure base URL {0}: HTTPS required except for localhost")]
    Insecure(String),
    #[error("Base URL must not carry a query or fragment")]
    HasQuery,
}

/// Validate the base URL of the task endpoint.
///
/// Accepts `https://` for any host and `http://` only for loopback hosts
/// (`localhost`, `127.0.0.0/8`, `::1`), which is how the server is reached
/// during development. A path prefix is allowed; a query or fragment is not,
/// since `/api/task/{id}` is appended to it.
///
/// ```
/// use taskdeck::util::validate_base_url;
///
/// assert!(validate_base_url("https://tasks.example.com").is_ok());
/// assert!(validate_base_url("http://127.0.0.1:8000").is_ok());
/// assert!(validate_base_url("http://tasks.example.com").is_err());
/// ```
pub fn validate_base_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(UrlValidationError::HasQuery);
    }

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback_host(&url) => {
            tracing::debug!(base_url = %url, "Using plain HTTP task endpoint (loopback only)");
            Ok(url)
        }
        "http" => Err(UrlValidationError::Insecure(url.to_string())),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}

fn is_loopback_host(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    if host == "localhost" {
        return true;
    }
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_accepted() {
        assert!(validate_base_url("https://tasks.example.com").is_ok());
        assert!(validate_base_url("https://tasks.example.com:8443/app").is_ok());
    }

    #[test]
    fn test_loopback_http_accepted() {
        assert!(validate_base_url("http://localhost:8000").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8000").is_ok());
        assert!(validate_base_url("http://[::1]:8000").is_ok());
    }

    #[test]
    fn test_remote_http_rejected() {
        let err = validate_base_url("http://tasks.example.com").unwrap_err();
        assert!(matches!(err, UrlValidationError::Insecure(_)));
        assert!(validate_base_url("http://192.168.1.10").is_err());
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(matches!(
            validate_base_url("ftp://example.com"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(validate_base_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_query_rejected() {
        assert!(matches!(
            validate_base_url("https://example.com/?a=1"),
            Err(UrlValidationError::HasQuery)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            validate_base_url("not a url"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }
}

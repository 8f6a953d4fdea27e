//! API URL helpers for frontend-backend communication.
//!
//! In production the dashboard is served behind the same reverse proxy as
//! the API, so all requests go to the same origin under `/api/public`.

const API_ROOT: &str = "/api/public";

/// Build a full API URL from a path relative to the public API root.
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// let url = api_url("/stats/by-department");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", API_ROOT, path)
}

/// Build an API URL with query parameters. Values are percent-encoded;
/// an empty parameter list yields the bare path.
pub fn api_url_with(path: &str, params: &[(&str, String)]) -> String {
    let mut url = api_url(path);
    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_plain_and_parameterized_urls() {
        assert_eq!(api_url("/financial-years"), "/api/public/financial-years");
        assert_eq!(
            api_url_with("/stats/by-ward", &[]),
            "/api/public/stats/by-ward"
        );
        assert_eq!(
            api_url_with(
                "/projects",
                &[
                    ("finYearId", "5".to_string()),
                    ("search", "water pan".to_string()),
                ]
            ),
            "/api/public/projects?finYearId=5&search=water%20pan"
        );
    }
}

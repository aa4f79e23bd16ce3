use url::Url;

/// Extracts the network location from a URL string
///
/// Returns the lowercase host, followed by `:port` when the URL names a
/// non-default port. Path, query and fragment never affect the result. A
/// string that does not parse as a URL yields an empty string, which will not
/// match any registered site.
///
/// # Examples
///
/// ```
/// use grammar_scraper::url::get_domain;
///
/// assert_eq!(get_domain("https://example.com/path?q=1#frag"), "example.com");
/// assert_eq!(get_domain("https://EXAMPLE.COM/"), "example.com");
/// assert_eq!(get_domain("http://127.0.0.1:8080/list/a"), "127.0.0.1:8080");
/// assert_eq!(get_domain("not a url"), "");
/// ```
pub fn get_domain(url: &str) -> String {
    let parsed = match Url::parse(url.trim()) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host.to_lowercase(), port),
        (Some(host), None) => host.to_lowercase(),
        (None, _) => String::new(),
    }
}

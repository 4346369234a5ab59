/// Default host when none is configured.
pub const DEFAULT_HOSTNAME: &str = "github.com";

const LOCALHOST: &str = "github.localhost";
const TENANCY_SUFFIX: &str = ".ghe.com";

/// Lowercase a hostname and fold `*.github.com` / `*.github.localhost`
/// subdomains onto their parent host.
pub fn normalize_hostname(hostname: &str) -> String {
    let host = hostname.trim().to_lowercase();
    if host.ends_with(".github.com") {
        return DEFAULT_HOSTNAME.to_string();
    }
    if host.ends_with(".github.localhost") {
        return LOCALHOST.to_string();
    }
    host
}

/// Whether the host is a GitHub Enterprise Server instance.
pub fn is_enterprise(hostname: &str) -> bool {
    let host = normalize_hostname(hostname);
    host != DEFAULT_HOSTNAME && host != LOCALHOST && !is_tenancy(&host)
}

/// Whether the host is a GitHub Enterprise Cloud tenancy (`*.ghe.com`).
pub fn is_tenancy(hostname: &str) -> bool {
    normalize_hostname(hostname).ends_with(TENANCY_SUFFIX)
}

/// Base URL of the REST API for `hostname`, always ending in `/`.
pub fn rest_prefix(hostname: &str) -> String {
    let host = normalize_hostname(hostname);
    if is_enterprise(&host) {
        return format!("https://{host}/api/v3/");
    }
    if host == LOCALHOST {
        return format!("http://api.{host}/");
    }
    format!("https://api.{host}/")
}

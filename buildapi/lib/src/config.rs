//! Client configuration.
//!
//! [`ClientOptions`] is what callers supply (every field optional);
//! [`ClientConfig`] is the resolved, immutable result that every synthesized
//! operation of one client shares.

use std::fmt;

use buildapi_define::ApiDefinition;
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Query string appended to every request; the API answers HTML otherwise.
pub const FORMAT_QUERY: &str = "format=json";

/// Basic-auth credentials, sent preemptively with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Option<String>,
}

impl Credentials {
    /// Creates credentials from a username and optional password.
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password, if any.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Client construction options.
///
/// Every field is optional: unset URI parts fall back to the
/// [`ApiDefinition`] defaults and unset credentials mean unauthenticated
/// requests.
///
/// ## Examples
///
/// ```
/// use buildapi::ClientOptions;
///
/// let options = ClientOptions::new()
///     .username("someone@example.com")
///     .password("hunter2")
///     .host("builds.example.com");
///
/// assert_eq!(options.host.as_deref(), Some("builds.example.com"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    /// Basic-auth username.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// URI scheme, with or without a trailing `:` (`https`, `https:`).
    pub protocol: Option<String>,
    /// Host, optionally with a port.
    pub host: Option<String>,
    /// Root path under which every operation path is appended.
    pub root_path: Option<String>,
}

impl ClientOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads credentials from the environment variables named by the API
    /// definition (`env_username`, `env_password`).
    ///
    /// Variables that are unset or empty are ignored.
    pub fn from_env(api: &ApiDefinition) -> Self {
        let read = |var: &Option<String>| {
            var.as_deref()
                .and_then(|name| std::env::var(name).ok())
                .filter(|value| !value.is_empty())
        };

        Self {
            username: read(&api.env_username),
            password: read(&api.env_password),
            ..Self::default()
        }
    }

    /// Sets the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the URI scheme.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the root path.
    pub fn root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    /// Layers `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(self, overrides: ClientOptions) -> Self {
        Self {
            username: overrides.username.or(self.username),
            password: overrides.password.or(self.password),
            protocol: overrides.protocol.or(self.protocol),
            host: overrides.host.or(self.host),
            root_path: overrides.root_path.or(self.root_path),
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (None, None) => None,
            (username, password) => Some(Credentials::new(
                username.clone().unwrap_or_default(),
                password.clone(),
            )),
        }
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("root_path", &self.root_path)
            .finish()
    }
}

/// Resolved configuration shared by every operation of one client.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    credentials: Option<Credentials>,
}

impl ClientConfig {
    /// Resolves options against the API defaults.
    ///
    /// The base URL is `<protocol>://<host>/<root_path>?format=json`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the protocol is not a valid URI scheme, the host
    /// is empty, or the assembled URL does not parse.
    pub fn new(api: &ApiDefinition, options: &ClientOptions) -> Result<Self, ConfigError> {
        let protocol = options.protocol.as_deref().unwrap_or(&api.protocol);
        let host = options.host.as_deref().unwrap_or(&api.host);
        let root_path = options.root_path.as_deref().unwrap_or(&api.root_path);

        let base_url = base_url(protocol, host, root_path)?;

        Ok(Self {
            base_url,
            credentials: options.credentials(),
        })
    }

    /// The base URL, including the `format=json` query.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Credentials applied to every request.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Appends path segments to the base path.
    ///
    /// Each segment stays a single segment: `/` and `%` inside it are
    /// percent-encoded. Callers must reject `.` and `..` beforehand, since the
    /// URL layer drops them. The base query string is preserved, and no
    /// segments yields the base URL itself.
    pub fn operation_url<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.base_url.clone();
        if segments.is_empty() {
            return url;
        }
        // The base URL is always hierarchical, so this never fails.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments.iter().map(|s| s.as_ref()));
        }
        url
    }
}

fn base_url(protocol: &str, host: &str, root_path: &str) -> Result<Url, ConfigError> {
    let scheme = protocol.trim_end_matches("//").trim_end_matches(':');
    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return Err(ConfigError::InvalidProtocol {
            protocol: protocol.to_string(),
        });
    }

    let host = host.trim_end_matches('/');
    if host.is_empty() {
        return Err(ConfigError::missing_field("host"));
    }

    let mut url = Url::parse(&format!("{scheme}://{host}/"))?;
    url.set_path(root_path.trim_matches('/'));
    url.set_query(Some(FORMAT_QUERY));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildapi_definitions::define_self_serve_api;

    #[test]
    fn defaults_come_from_the_definition() {
        let api = define_self_serve_api();
        let config = ClientConfig::new(&api, &ClientOptions::new()).unwrap();

        assert_eq!(
            config.base_url().as_str(),
            "https://secure.pub.build.mozilla.org/buildapi/self-serve?format=json"
        );
        assert!(config.credentials().is_none());
    }

    #[test]
    fn options_override_each_part() {
        let api = define_self_serve_api();
        let options = ClientOptions::new()
            .protocol("http:")
            .host("localhost:8080")
            .root_path("/api/");
        let config = ClientConfig::new(&api, &options).unwrap();

        assert_eq!(
            config.base_url().as_str(),
            "http://localhost:8080/api?format=json"
        );
    }

    #[test]
    fn protocol_with_slashes_is_accepted() {
        let api = define_self_serve_api();
        let config = ClientConfig::new(&api, &ClientOptions::new().protocol("http://")).unwrap();
        assert_eq!(config.base_url().scheme(), "http");
    }

    #[test]
    fn invalid_protocol_rejected() {
        let api = define_self_serve_api();
        let err = ClientConfig::new(&api, &ClientOptions::new().protocol("ht tp")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProtocol { .. }));

        let err = ClientConfig::new(&api, &ClientOptions::new().protocol("")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProtocol { .. }));
    }

    #[test]
    fn empty_host_rejected() {
        let api = define_self_serve_api();
        let err = ClientConfig::new(&api, &ClientOptions::new().host("")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "host" }));
    }

    #[test]
    fn operation_url_appends_and_keeps_query() {
        let api = define_self_serve_api();
        let config = ClientConfig::new(&api, &ClientOptions::new()).unwrap();
        let url = config.operation_url(&["X", "build", "Y"]);

        assert_eq!(url.path(), "/buildapi/self-serve/X/build/Y");
        assert_eq!(url.query(), Some("format=json"));
    }

    #[test]
    fn operation_url_with_empty_root() {
        let api = define_self_serve_api();
        let config = ClientConfig::new(&api, &ClientOptions::new().root_path("")).unwrap();

        assert_eq!(config.operation_url(&["branches"]).path(), "/branches");
        let none: [&str; 0] = [];
        assert_eq!(config.operation_url(&none).path(), "/");
    }

    #[test]
    fn operation_url_escapes_through_url_layer() {
        let api = define_self_serve_api();
        let config = ClientConfig::new(&api, &ClientOptions::new()).unwrap();
        let url = config.operation_url(&["try", "user", "a b"]);

        assert_eq!(url.path(), "/buildapi/self-serve/try/user/a%20b");
        assert_eq!(url.query(), Some("format=json"));
    }

    #[test]
    fn operation_url_keeps_each_value_in_one_segment() {
        let api = define_self_serve_api();
        let config = ClientConfig::new(&api, &ClientOptions::new()).unwrap();
        let url = config.operation_url(&["try", "build", "1/../../x", "%2e%2e"]);

        assert_eq!(
            url.path(),
            "/buildapi/self-serve/try/build/1%2F..%2F..%2Fx/%252e%252e"
        );
    }

    #[test]
    fn credentials_from_options() {
        let api = define_self_serve_api();
        let options = ClientOptions::new().username("alice").password("secret");
        let config = ClientConfig::new(&api, &options).unwrap();
        let creds = config.credentials().unwrap();

        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password(), Some("secret"));
    }

    #[test]
    fn password_without_username_uses_empty_username() {
        let api = define_self_serve_api();
        let config = ClientConfig::new(&api, &ClientOptions::new().password("secret")).unwrap();
        let creds = config.credentials().unwrap();

        assert_eq!(creds.username(), "");
        assert_eq!(creds.password(), Some("secret"));
    }

    #[test]
    fn debug_redacts_password() {
        let options = ClientOptions::new().username("alice").password("secret");
        let creds = Credentials::new("alice", Some("secret".to_string()));

        assert!(!format!("{options:?}").contains("secret"));
        assert!(!format!("{creds:?}").contains("secret"));
        assert!(format!("{creds:?}").contains("alice"));
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = ClientOptions::new().username("env-user").host("a.example.com");
        let merged = base.merge(ClientOptions::new().host("b.example.com"));

        assert_eq!(merged.username.as_deref(), Some("env-user"));
        assert_eq!(merged.host.as_deref(), Some("b.example.com"));
    }

    #[test]
    fn options_deserialize_camel_case() {
        let options: ClientOptions =
            serde_json::from_str(r#"{"host": "h.example.com", "rootPath": "x/y"}"#).unwrap();

        assert_eq!(options.host.as_deref(), Some("h.example.com"));
        assert_eq!(options.root_path.as_deref(), Some("x/y"));
        assert!(options.username.is_none());
    }
}

//! Project configuration documents
//!
//! Central definition of the configuration values an operator assembles
//! during an editing session and of the document shape the backend expects
//! on submit. All wire-facing structs serialize camelCase.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity token of a location rule.
///
/// Assigned once when the rule is created and never reused. The token
/// exists for rendering/iteration stability only: it is excluded from the
/// wire document and takes no part in content equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationId(Uuid);

impl LocationId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One location rule of the reverse-proxy configuration
///
/// `location` is the request path to match, `url` the proxy-pass target.
/// Both start empty; a rule left blank is kept in the list but skipped by
/// the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyLocation {
    #[serde(skip, default = "LocationId::generate")]
    id: LocationId,

    /// Request path to match, e.g. `/api/`
    #[serde(default)]
    pub location: String,

    /// Upstream target for `proxy_pass`, e.g. `http://127.0.0.1:8081`
    #[serde(default)]
    pub url: String,
}

impl ProxyLocation {
    /// Create a blank rule with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: LocationId::generate(),
            location: String::new(),
            url: String::new(),
        }
    }

    /// Create a rule with the given routing fields and a fresh identity.
    pub fn with_route(location: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: LocationId::generate(),
            location: location.into(),
            url: url.into(),
        }
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    /// True when both routing fields are empty. Blank rules stay in the
    /// list while the operator edits but produce no server-block output.
    pub fn is_blank(&self) -> bool {
        self.location.is_empty() && self.url.is_empty()
    }
}

impl Default for ProxyLocation {
    fn default() -> Self {
        Self::new()
    }
}

// Content equality only; the identity token is deliberately left out.
impl PartialEq for ProxyLocation {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.url == other.url
    }
}

impl Eq for ProxyLocation {}

/// TLS certificate paths for the https server block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpsOption {
    /// Path to the certificate, e.g. `/etc/letsencrypt/live/example.com/fullchain.pem`
    pub ssl_certificate: String,

    /// Path to the certificate key
    pub ssl_certificate_key: String,
}

fn default_max_body_size() -> u32 {
    50
}

/// Reverse-proxy server configuration
///
/// `locations` is order-significant: rules are rendered and evaluated in
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NginxConfig {
    /// Server names, e.g. `["example.com", "www.example.com"]`
    #[serde(default)]
    pub domains: Vec<String>,

    /// Ordered location rules
    #[serde(default)]
    pub locations: Vec<ProxyLocation>,

    /// Serve over https (requires `https_option`)
    #[serde(default)]
    pub https: bool,

    /// Certificate paths, required when `https` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_option: Option<HttpsOption>,

    /// `client_max_body_size` in megabytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: u32,
}

impl Default for NginxConfig {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            locations: Vec::new(),
            https: false,
            https_option: None,
            max_body_size: default_max_body_size(),
        }
    }
}

/// One `property`/`data` pair of a build configuration (port publish,
/// environment value, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProperty {
    pub property: String,
    pub data: String,
}

/// Build configuration for one service of the project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub name: String,

    /// Framework preset, e.g. `SpringBoot`, `React`
    #[serde(default)]
    pub framework: String,

    /// Base image version for the build container
    #[serde(default)]
    pub docker_version: String,

    #[serde(default)]
    pub properties: Vec<ConfigProperty>,

    /// Directory of this service inside the repository
    #[serde(default)]
    pub project_directory: String,

    /// Build output path
    #[serde(default)]
    pub build_path: String,

    /// Service type, e.g. `backend`, `frontend`
    #[serde(default, rename = "type")]
    pub build_type: String,
}

/// Source-control configuration of the project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitConfig {
    pub repository_url: String,

    #[serde(default)]
    pub branch: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Opaque project identifier assigned by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub i32);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The document submitted to the backend in one atomic write
///
/// Composed from the independently held sub-configurations at the instant
/// of submission; it lives only for the duration of one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfigPayload {
    pub build_configs: Vec<BuildConfig>,
    pub git_config: GitConfig,
    pub nginx_config: NginxConfig,
    pub project_name: String,
    pub project_id: ProjectId,
}

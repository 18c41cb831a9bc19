//! Session aggregate over the independently held sub-configurations

use dockhand_core::{
    BuildConfig, GitConfig, HttpsOption, NginxConfig, ProjectConfigPayload, ProjectId,
};
use tracing::debug;

use crate::store::LocationStore;

/// Proxy settings of the session: the scalar server options plus the
/// location store.
pub struct NginxSettings {
    domains: Vec<String>,
    https: bool,
    https_option: Option<HttpsOption>,
    max_body_size: u32,
    locations: LocationStore,
}

impl NginxSettings {
    pub fn new() -> Self {
        Self::from_config(NginxConfig::default())
    }

    pub fn from_config(config: NginxConfig) -> Self {
        Self {
            domains: config.domains,
            https: config.https,
            https_option: config.https_option,
            max_body_size: config.max_body_size,
            locations: LocationStore::from_locations(config.locations),
        }
    }

    /// Materialize the config value, embedding the current rule sequence.
    pub fn to_config(&self) -> NginxConfig {
        NginxConfig {
            domains: self.domains.clone(),
            locations: self.locations.current().to_vec(),
            https: self.https,
            https_option: self.https_option.clone(),
            max_body_size: self.max_body_size,
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn set_domains(&mut self, domains: Vec<String>) {
        self.domains = domains;
    }

    pub fn https(&self) -> bool {
        self.https
    }

    pub fn set_https(&mut self, https: bool) {
        self.https = https;
    }

    pub fn https_option(&self) -> Option<&HttpsOption> {
        self.https_option.as_ref()
    }

    pub fn set_https_option(&mut self, option: Option<HttpsOption>) {
        self.https_option = option;
    }

    pub fn max_body_size(&self) -> u32 {
        self.max_body_size
    }

    pub fn set_max_body_size(&mut self, megabytes: u32) {
        self.max_body_size = megabytes;
    }

    pub fn locations(&self) -> &LocationStore {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut LocationStore {
        &mut self.locations
    }
}

impl Default for NginxSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// One editing session of a project's deployment configuration.
///
/// Each sub-configuration is an independently owned value behind a read
/// accessor; nothing here is ambient or shared across sessions. The
/// session composes them only at [`snapshot`](Self::snapshot) time.
pub struct SettingSession {
    project_id: ProjectId,
    project_name: String,
    build_configs: Vec<BuildConfig>,
    git_config: GitConfig,
    nginx: NginxSettings,
}

impl SettingSession {
    pub fn new(project_id: ProjectId, project_name: impl Into<String>) -> Self {
        Self {
            project_id,
            project_name: project_name.into(),
            build_configs: Vec::new(),
            git_config: GitConfig::default(),
            nginx: NginxSettings::new(),
        }
    }

    /// Resume a session from a previously assembled document. The
    /// document's location rules are fed through the store so they regain
    /// live identities and the view-refresh channel.
    pub fn from_document(document: ProjectConfigPayload) -> Self {
        Self {
            project_id: document.project_id,
            project_name: document.project_name,
            build_configs: document.build_configs,
            git_config: document.git_config,
            nginx: NginxSettings::from_config(document.nginx_config),
        }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn build_configs(&self) -> &[BuildConfig] {
        &self.build_configs
    }

    pub fn set_build_configs(&mut self, configs: Vec<BuildConfig>) {
        self.build_configs = configs;
    }

    pub fn push_build_config(&mut self, config: BuildConfig) {
        self.build_configs.push(config);
    }

    pub fn git_config(&self) -> &GitConfig {
        &self.git_config
    }

    pub fn set_git_config(&mut self, config: GitConfig) {
        self.git_config = config;
    }

    pub fn nginx(&self) -> &NginxSettings {
        &self.nginx
    }

    pub fn nginx_mut(&mut self) -> &mut NginxSettings {
        &mut self.nginx
    }

    /// Compose the submission document from the sub-configurations as they
    /// stand right now. The session keeps ownership; the returned value is
    /// transient and lives only for one submission attempt.
    pub fn snapshot(&self) -> ProjectConfigPayload {
        debug!(
            project = %self.project_name,
            locations = self.nginx.locations().len(),
            "composing submission document"
        );
        ProjectConfigPayload {
            build_configs: self.build_configs.clone(),
            git_config: self.git_config.clone(),
            nginx_config: self.nginx.to_config(),
            project_name: self.project_name.clone(),
            project_id: self.project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockhand_core::ProxyLocation;

    fn sample_session() -> SettingSession {
        let mut session = SettingSession::new(ProjectId(7), "shop");
        session.set_git_config(GitConfig {
            repository_url: "https://git.example.com/acme/shop.git".to_string(),
            branch: "main".to_string(),
            access_token: None,
        });
        session.push_build_config(BuildConfig {
            name: "backend".to_string(),
            build_type: "backend".to_string(),
            ..BuildConfig::default()
        });
        session
            .nginx_mut()
            .set_domains(vec!["example.com".to_string()]);
        session
    }

    #[test]
    fn snapshot_embeds_current_rule_sequence() {
        let mut session = sample_session();
        session
            .nginx_mut()
            .locations_mut()
            .append(ProxyLocation::with_route("/api/", "http://127.0.0.1:8081"));
        session
            .nginx_mut()
            .locations_mut()
            .append(ProxyLocation::with_route("/ws/", "http://127.0.0.1:8082"));

        let payload = session.snapshot();
        let paths: Vec<&str> = payload
            .nginx_config
            .locations
            .iter()
            .map(|l| l.location.as_str())
            .collect();
        assert_eq!(paths, ["/api/", "/ws/"]);
        assert_eq!(payload.project_name, "shop");
        assert_eq!(payload.project_id, ProjectId(7));
    }

    #[test]
    fn snapshot_reflects_mutations_up_to_the_call() {
        let mut session = sample_session();
        let store = session.nginx_mut().locations_mut();
        store.append(ProxyLocation::with_route("/a/", "http://a"));
        store.append(ProxyLocation::with_route("/b/", "http://b"));

        let before = session.snapshot();
        assert_eq!(before.nginx_config.locations.len(), 2);

        session.nginx_mut().locations_mut().remove_at(0);
        let after = session.snapshot();
        assert_eq!(after.nginx_config.locations.len(), 1);
        assert_eq!(after.nginx_config.locations[0].location, "/b/");

        // The earlier snapshot is untouched: it was a copy, not a live view.
        assert_eq!(before.nginx_config.locations.len(), 2);
    }

    #[test]
    fn from_document_round_trips_through_the_store() {
        let mut session = sample_session();
        session
            .nginx_mut()
            .locations_mut()
            .append(ProxyLocation::with_route("/api/", "http://127.0.0.1:8081"));

        let resumed = SettingSession::from_document(session.snapshot());
        assert_eq!(resumed.project_name(), "shop");
        assert_eq!(resumed.nginx().locations().len(), 1);
        assert_eq!(resumed.nginx().locations().current()[0].location, "/api/");
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub leads: LeadConfig,
    pub forms: FormConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

/// Public identity of the site, used for sitemap URLs and page metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadConfig {
    pub base_url: String,
    pub contact_path: String,
    pub estimate_path: String,
    pub mortgage_path: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub status_ttl_ms: u64,
    pub session_idle_seconds: u64,
    pub sweep_interval_seconds: u64,
    pub max_sessions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            content: ContentConfig::default(),
            leads: LeadConfig::default(),
            forms: FormConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://soldbyghost.com".to_string(),
            name: "Diego Garcia, Realtor".to_string(),
            description: "Diego Garcia is a realtor in the Chicago area and the surrounding suburbs. \
                Diego assists sellers in maximizing property value, guides investors to profitable \
                opportunities, and helps buyers find their ideal homes across the region."
                .to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.soldbyghost.com".to_string(),
            contact_path: "/api/submit/form".to_string(),
            estimate_path: "/api/submit/estimate".to_string(),
            mortgage_path: "/api/calculator".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            status_ttl_ms: 5000,
            session_idle_seconds: 1800,
            sweep_interval_seconds: 60,
            max_sessions: 10_000,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://soldbyghost.com".to_string(),
                "https://www.soldbyghost.com".to_string(),
            ],
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        for (name, url) in [
            ("site.base_url", &self.site.base_url),
            ("content.base_url", &self.content.base_url),
            ("leads.base_url", &self.leads.base_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::Message(format!("{} cannot be empty", name)));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Message(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.forms.status_ttl_ms == 0 {
            return Err(ConfigError::Message(
                "Form status TTL must be greater than 0".to_string(),
            ));
        }

        if self.forms.sweep_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "Form sweep interval must be greater than 0".to_string(),
            ));
        }

        if self.forms.max_sessions == 0 {
            return Err(ConfigError::Message(
                "Form session limit must be greater than 0".to_string(),
            ));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url has a trailing slash; it will be trimmed when building URLs");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

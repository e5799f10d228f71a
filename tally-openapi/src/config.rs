use serde::Serialize;
use tally_core::config::{AppConfig, ConfigError, ConfigValue, FromConfigValue};

/// Contact block of the document's `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
}

/// License block of the document's `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub name: String,
    pub url: Option<String>,
}

/// One entry of the document's `servers` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ServerInfo {
    pub fn new(url: &str, description: &str) -> Self {
        Self {
            url: url.to_string(),
            description: Some(description.to_string()),
        }
    }
}

impl FromConfigValue for ServerInfo {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(url) => Ok(Self {
                url: url.clone(),
                description: None,
            }),
            ConfigValue::Map(_) => {
                let url = value
                    .field("url")
                    .ok_or_else(|| ConfigError::NotFound(format!("{key}.url")))?;
                let description = value
                    .field("description")
                    .map(|d| String::from_config_value(d, &format!("{key}.description")))
                    .transpose()?;
                Ok(Self {
                    url: String::from_config_value(url, &format!("{key}.url"))?,
                    description,
                })
            }
            _ => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "server (url or {url, description})",
            }),
        }
    }
}

/// Static metadata and serving options for the compiled document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub servers: Vec<ServerInfo>,
    /// Path the JSON document is served under.
    pub docs_path: String,
    /// Serve a Swagger UI page at `/docs`.
    pub docs_ui: bool,
    /// Fail compilation when an annotated member is incomplete.
    pub strict: bool,
}

impl OpenApiConfig {
    /// Bare config: no description, contact, license or servers.
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            contact: None,
            license: None,
            servers: Vec::new(),
            docs_path: "/api-docs".to_string(),
            docs_ui: false,
            strict: false,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_contact(mut self, name: &str, email: Option<&str>) -> Self {
        self.contact = Some(Contact {
            name: name.to_string(),
            email: email.map(str::to_string),
        });
        self
    }

    pub fn with_license(mut self, name: &str, url: Option<&str>) -> Self {
        self.license = Some(License {
            name: name.to_string(),
            url: url.map(str::to_string),
        });
        self
    }

    pub fn with_server(mut self, url: &str, description: &str) -> Self {
        self.servers.push(ServerInfo::new(url, description));
        self
    }

    pub fn with_docs_path(mut self, path: &str) -> Self {
        self.docs_path = path.to_string();
        self
    }

    pub fn with_docs_ui(mut self, enabled: bool) -> Self {
        self.docs_ui = enabled;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Overlay the `openapi.*` section of `config` onto [`OpenApiConfig::default`].
    ///
    /// Keys: `title`, `version`, `description`, `contact.name`, `contact.email`,
    /// `license.name`, `license.url`, `servers`, `docs.path`, `docs.ui`, `strict`.
    /// A `servers` list replaces the default servers.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let mut out = Self::default();

        if let Some(title) = config.get_opt("openapi.title")? {
            out.title = title;
        }
        if let Some(version) = config.get_opt("openapi.version")? {
            out.version = version;
        }
        if let Some(description) = config.get_opt::<String>("openapi.description")? {
            out.description = Some(description);
        }
        if let Some(name) = config.get_opt::<String>("openapi.contact.name")? {
            out.contact = Some(Contact {
                name,
                email: config.get_opt("openapi.contact.email")?,
            });
        }
        if let Some(name) = config.get_opt::<String>("openapi.license.name")? {
            out.license = Some(License {
                name,
                url: config.get_opt("openapi.license.url")?,
            });
        }
        if let Some(servers) = config.get_opt("openapi.servers")? {
            out.servers = servers;
        }
        if let Some(path) = config.get_opt("openapi.docs.path")? {
            out.docs_path = path;
        }
        out.docs_ui = config.get_or("openapi.docs.ui", out.docs_ui);
        out.strict = config.get_or("openapi.strict", out.strict);

        Ok(out)
    }
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self::new("API Documentation", "1.0.0")
            .with_description("Comprehensive API Documentation generated using decorators")
            .with_contact("API Support", Some("support@example.com"))
            .with_license("MIT", Some("https://opensource.org/licenses/MIT"))
            .with_server("http://localhost:3000", "Local Development")
            .with_server("https://api.example.com", "Production")
    }
}

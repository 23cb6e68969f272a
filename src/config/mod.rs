// ABOUTME: Configuration types and parsing for slipway.yml.
// ABOUTME: Handles YAML parsing, secret interpolation, and param building.

mod env_value;
mod init;

pub use env_value::EnvValue;
pub use init::init_config;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::deploy::{
    CustomContainer, RegistryCredential, RolloutParams, SettingsInput, SourceSpec, Target,
    Timeouts,
};
use crate::error::{Error, Result};
use crate::types::{AppName, DeploymentName};

pub const CONFIG_FILENAME: &str = "slipway.yml";
pub const CONFIG_FILENAME_ALT: &str = "slipway.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Management endpoint joined with the service resource path.
    pub service_url: String,

    /// App to deploy to, unique within the service instance.
    pub app: String,

    /// Bearer token for the management API.
    pub auth: AuthConfig,

    #[serde(default)]
    pub target: TargetConfig,

    pub source: SourceConfig,

    #[serde(default)]
    pub settings: SettingsConfig,

    /// Optional version tag attached to the deployment source.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub token: EnvValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetConfig {
    /// Target the currently inactive slot instead of a named one.
    #[serde(default)]
    pub use_staging: bool,

    /// Named slot to target when `use_staging` is false.
    #[serde(default)]
    pub deployment: Option<String>,

    /// Create the slot when it does not exist yet.
    #[serde(default)]
    pub create_if_missing: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// Local package: prebuilt archive or source directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Route the artifact through the shared build service.
    #[serde(default)]
    pub use_build_service: bool,

    /// Builder resource reference for build-service deploys.
    #[serde(default)]
    pub builder: Option<String>,

    /// Custom container image instead of a local package.
    #[serde(default)]
    pub container: Option<ContainerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerConfig {
    pub image: String,

    #[serde(default)]
    pub server: Option<String>,

    #[serde(default)]
    pub command: Option<Vec<String>>,

    #[serde(default)]
    pub args: Option<Vec<String>>,

    #[serde(default)]
    pub language_framework: Option<String>,

    #[serde(default)]
    pub registry: Option<RegistryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    pub username: EnvValue,
    pub password: EnvValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsConfig {
    #[serde(default)]
    pub runtime_version: Option<String>,

    #[serde(default)]
    pub jvm_options: Option<String>,

    /// Raw `-key value -key2 "value 2"` environment string.
    #[serde(default)]
    pub environment: Option<String>,

    #[serde(default)]
    pub entry_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default, with = "humantime_serde")]
    pub operation: Option<Duration>,

    #[serde(default, with = "humantime_serde")]
    pub build: Option<Duration>,
}

impl Config {
    /// Find and parse the config file in `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = [CONFIG_FILENAME, CONFIG_FILENAME_ALT]
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
            .ok_or_else(|| Error::ConfigNotFound(dir.to_path_buf()))?;

        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.target.use_staging && self.target.deployment.is_some() {
            return Err(Error::InvalidConfig(
                "target.use_staging and target.deployment are mutually exclusive".to_string(),
            ));
        }
        if !self.target.use_staging && self.target.deployment.is_none() {
            return Err(Error::InvalidConfig(
                "either target.use_staging or target.deployment is required".to_string(),
            ));
        }
        match (&self.source.path, &self.source.container) {
            (Some(_), Some(_)) => Err(Error::InvalidConfig(
                "source.path and source.container are mutually exclusive".to_string(),
            )),
            (None, None) => Err(Error::InvalidConfig(
                "either source.path or source.container is required".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Resolve the bearer token at the process boundary.
    pub fn resolve_token(&self) -> Result<String> {
        self.auth.token.resolve()
    }

    /// Build rollout parameters, resolving names and secret references.
    /// Core logic only ever sees the resulting explicit struct.
    pub fn rollout_params(&self) -> Result<RolloutParams> {
        let app = AppName::new(&self.app).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let target = if self.target.use_staging {
            Target::Inactive
        } else {
            let name = self
                .target
                .deployment
                .as_deref()
                .expect("validated: deployment is set when use_staging is false");
            Target::Named(
                DeploymentName::new(name).map_err(|e| Error::InvalidConfig(e.to_string()))?,
            )
        };

        let source = match (&self.source.path, &self.source.container) {
            (Some(path), None) => SourceSpec::Artifact {
                path: path.clone(),
                use_build_service: self.source.use_build_service,
                builder: self.source.builder.clone(),
            },
            (None, Some(container)) => SourceSpec::Container(self.custom_container(container)?),
            _ => unreachable!("validated: exactly one source shape"),
        };

        Ok(RolloutParams {
            app,
            target,
            allow_create: self.target.create_if_missing,
            source,
            settings: SettingsInput {
                runtime_version: self.settings.runtime_version.clone(),
                jvm_options: self.settings.jvm_options.clone(),
                environment: self.settings.environment.clone(),
                entry_path: self.settings.entry_path.clone(),
            },
            version: self.version.clone(),
            timeouts: Timeouts {
                operation: self.timeouts.operation,
                build: self.timeouts.build,
            },
        })
    }

    fn custom_container(&self, container: &ContainerConfig) -> Result<CustomContainer> {
        let image_registry_credential = match &container.registry {
            Some(registry) => Some(RegistryCredential {
                username: registry.username.resolve()?,
                password: registry.password.resolve()?,
            }),
            None => None,
        };

        Ok(CustomContainer {
            container_image: container.image.clone(),
            server: container.server.clone(),
            command: container.command.clone(),
            args: container.args.clone(),
            image_registry_credential,
            language_framework: container.language_framework.clone(),
        })
    }

    /// A minimal valid config, used by `init` and tests.
    pub fn template() -> Self {
        Config {
            service_url:
                "https://management.example.com/subscriptions/sub/resourceGroups/rg/providers/Example.AppPlatform/services/my-service"
                    .to_string(),
            app: "my-app".to_string(),
            auth: AuthConfig {
                token: EnvValue::FromEnv {
                    var: "SLIPWAY_TOKEN".to_string(),
                    default: None,
                },
            },
            target: TargetConfig {
                use_staging: true,
                deployment: None,
                create_if_missing: true,
            },
            source: SourceConfig {
                path: Some(PathBuf::from("target/app.jar")),
                use_build_service: false,
                builder: None,
                container: None,
            },
            settings: SettingsConfig::default(),
            version: None,
            timeouts: TimeoutsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_yaml() -> &'static str {
        r#"
service_url: https://management.example.com/services/demo
app: gateway
auth:
  token:
    env: SLIPWAY_TOKEN
target:
  use_staging: true
source:
  path: target/app.jar
"#
    }

    #[test]
    fn parses_minimal_config() {
        let config: Config = serde_yaml::from_str(minimal_yaml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.app, "gateway");
        assert!(config.target.use_staging);
        assert!(!config.source.use_build_service);
        assert!(config.timeouts.operation.is_none());
    }

    #[test]
    fn rejects_ambiguous_target() {
        let yaml = minimal_yaml().replace(
            "target:\n  use_staging: true",
            "target:\n  use_staging: true\n  deployment: green",
        );
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_missing_source() {
        let yaml = minimal_yaml().replace("source:\n  path: target/app.jar", "source: {}");
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn timeouts_parse_humantime() {
        let yaml = format!("{}timeouts:\n  operation: 30m\n  build: 1h\n", minimal_yaml());
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            config.timeouts.operation,
            Some(Duration::from_secs(30 * 60))
        );
        assert_eq!(config.timeouts.build, Some(Duration::from_secs(3600)));
    }

    #[test]
    fn rollout_params_resolve_names() {
        let config: Config = serde_yaml::from_str(minimal_yaml()).unwrap();
        let params = config.rollout_params().unwrap();
        assert_eq!(params.app.as_str(), "gateway");
        assert!(matches!(params.target, Target::Inactive));
        assert!(matches!(params.source, SourceSpec::Artifact { .. }));
    }

    #[test]
    fn template_is_valid() {
        Config::template().validate().unwrap();
    }
}

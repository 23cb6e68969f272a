// ABOUTME: Deployment-update payload construction.
// ABOUTME: Pure functions; omitted fields mean "leave unchanged" on update.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::artifact::ArtifactKind;

/// Closed sum type for the deployment source. Exactly one shape is ever
/// sent; the serialized form carries a `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SourceKind {
    #[serde(rename_all = "camelCase")]
    Jar { relative_path: String },
    #[serde(rename_all = "camelCase")]
    War { relative_path: String },
    #[serde(rename_all = "camelCase")]
    NetCoreZip { relative_path: String },
    #[serde(rename_all = "camelCase")]
    Source { relative_path: String },
    #[serde(rename_all = "camelCase")]
    BuildResult { build_result_id: String },
    Container {
        #[serde(rename = "customContainer")]
        custom_container: CustomContainer,
    },
}

impl SourceKind {
    /// Source shape for an uploaded artifact, keyed off the local package.
    pub fn artifact(kind: ArtifactKind, local_path: &Path, relative_path: String) -> Self {
        match kind {
            ArtifactKind::SourceDirectory => SourceKind::Source { relative_path },
            ArtifactKind::PrebuiltArchive | ArtifactKind::Container => {
                match local_path.extension().and_then(|e| e.to_str()) {
                    Some("war") => SourceKind::War { relative_path },
                    Some("zip") => SourceKind::NetCoreZip { relative_path },
                    _ => SourceKind::Jar { relative_path },
                }
            }
        }
    }

    /// Only the source-directory variant produces a deploy log remotely.
    pub fn has_remote_log(&self) -> bool {
        matches!(self, SourceKind::Source { .. })
    }

    pub fn relative_path(&self) -> Option<&str> {
        match self {
            SourceKind::Jar { relative_path }
            | SourceKind::War { relative_path }
            | SourceKind::NetCoreZip { relative_path }
            | SourceKind::Source { relative_path } => Some(relative_path),
            _ => None,
        }
    }
}

/// Custom container descriptor for image-based deployments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomContainer {
    pub container_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_registry_credential: Option<RegistryCredential>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_framework: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCredential {
    pub username: String,
    pub password: String,
}

/// Optional per-slot settings supplied by the caller. Fields left `None`
/// are omitted from the payload so an update leaves them unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsInput {
    pub runtime_version: Option<String>,
    pub jvm_options: Option<String>,
    /// Raw `-key value -key2 "value 2"` string, parsed on build.
    pub environment: Option<String>,
    pub entry_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_core_main_entry_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentPayload {
    pub properties: DeploymentProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProperties {
    pub source: SourcePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_settings: Option<DeploymentSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcePayload {
    #[serde(flatten)]
    pub kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Build the deployment-update payload from optional inputs.
///
/// Pure: identical inputs yield byte-identical JSON (environment
/// variables are held in a sorted map). Settings that do not apply to
/// the chosen source variant are dropped rather than sent.
pub fn build_payload(
    source: SourceKind,
    settings: &SettingsInput,
    version: Option<String>,
) -> DeploymentPayload {
    let is_container = matches!(source, SourceKind::Container { .. });
    let is_net_core = matches!(source, SourceKind::NetCoreZip { .. });

    let environment_variables = settings
        .environment
        .as_deref()
        .map(parse_environment_string);

    let deployment_settings = DeploymentSettings {
        runtime_version: if is_container {
            None
        } else {
            settings.runtime_version.clone()
        },
        jvm_options: if is_container {
            None
        } else {
            settings.jvm_options.clone()
        },
        environment_variables,
        net_core_main_entry_path: if is_net_core {
            settings.entry_path.clone()
        } else {
            None
        },
    };

    let deployment_settings = if deployment_settings == empty_settings() {
        None
    } else {
        Some(deployment_settings)
    };

    DeploymentPayload {
        properties: DeploymentProperties {
            source: SourcePayload {
                kind: source,
                version,
            },
            deployment_settings,
        },
    }
}

fn empty_settings() -> DeploymentSettings {
    DeploymentSettings {
        runtime_version: None,
        jvm_options: None,
        environment_variables: None,
        net_core_main_entry_path: None,
    }
}

/// Parse a `-key value -key2 "value 2"` environment string into a map.
///
/// Keys are introduced by a leading `-`; a quoted value keeps its interior
/// whitespace byte-for-byte. Stray tokens without a key are ignored.
pub fn parse_environment_string(input: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.peek() {
            Some('-') => {
                chars.next();
            }
            Some(_) => {
                // Token without a leading dash: skip it.
                while chars.next_if(|c| !c.is_whitespace()).is_some() {}
                continue;
            }
            None => break,
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
            key.push(c);
        }
        if key.is_empty() {
            continue;
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if chars.next_if(|c| *c == '"').is_some() {
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                value.push(c);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        }

        map.insert(key, value);
    }

    map
}

// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates slipway.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, TEMPLATE_YAML)?;
    Ok(())
}

const TEMPLATE_YAML: &str = r#"# Management endpoint joined with the service resource path
service_url: https://management.example.com/subscriptions/sub/resourceGroups/rg/providers/Example.AppPlatform/services/my-service

app: my-app

auth:
  # Bearer token read from the environment at startup
  token:
    env: SLIPWAY_TOKEN

target:
  # Deploy to whichever slot is currently inactive
  use_staging: true
  # ...or to a named slot instead:
  # deployment: green
  create_if_missing: true

source:
  path: target/app.jar
  # Route through the build service (source directories and buildpack deploys)
  # use_build_service: true
  # builder: builders/my-builder
  # ...or deploy a container image instead of a local package:
  # container:
  #   image: myregistry.io/app:1.0
  #   server: myregistry.io
  #   registry:
  #     username: {env: REGISTRY_USER}
  #     password: {env: REGISTRY_PASS}

# settings:
#   runtime_version: Java_17
#   jvm_options: -Xmx512m
#   environment: -spring.profiles.active prod

# Bound the two polling loops; unbounded when omitted
# timeouts:
#   operation: 30m
#   build: 1h
"#;

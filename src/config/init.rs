// ABOUTME: Config scaffolding for new hosts.
// ABOUTME: Creates ananeo.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, EngineConfig};

pub fn init_config(dir: &Path, registry_prefix: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = EngineConfig::template();

    if let Some(prefix) = registry_prefix {
        config.registry_prefix = prefix.to_string();
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &EngineConfig) -> String {
    format!(
        r#"registry_prefix: {}
engine_image: {}
config_file: {}
# Pin the version activated when the command line does not name one:
# version: "1.0.0"
# probe:
#   interval: 2s
#   retries: 15
#   start_period: 5s
"#,
        config.registry_prefix,
        config.engine_image,
        config.config_file.display()
    )
}

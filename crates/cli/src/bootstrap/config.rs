use tracing::info;
use tubegate_domain::{CliOverrides, Config};

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        port = config.server.port,
        bind = %config.server.bind_address,
        cache_enabled = config.cache.enabled,
        source_block = config.upstream.source_block.as_deref().unwrap_or("none"),
        "Configuration loaded"
    );

    Ok(config)
}

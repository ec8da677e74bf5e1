//! Environment variable source: THEME_RELEASE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses THEME_RELEASE_ prefix and __ as separator for nested keys.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("THEME_RELEASE")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("publisher.args")
            .try_parsing(true),
    );
    Ok(builder)
}

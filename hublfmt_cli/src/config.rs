use std::path::Path;

use hublfmt_core::HublFmtError;
use hublfmt_core::HublFmtResult;
use serde::Deserialize;

/// Config file name resolved from the project root.
pub const CONFIG_FILE_NAME: &str = "hublfmt.toml";

/// Formatter command used when neither `--formatter` nor the config file
/// provides one.
pub const DEFAULT_FORMATTER: &str = "prettier --parser html";

/// Configuration loaded from `hublfmt.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HublFmtConfig {
	/// External HTML formatter command. The masked document is written to the
	/// command's stdin and the formatted document read from its stdout.
	pub formatter: Option<String>,
}

impl HublFmtConfig {
	/// Load configuration from `hublfmt.toml` in the given root directory.
	/// Returns `Ok(None)` when no config file exists.
	pub fn load(root: &Path) -> HublFmtResult<Option<Self>> {
		let config_path = root.join(CONFIG_FILE_NAME);

		if !config_path.exists() {
			return Ok(None);
		}

		let content = std::fs::read_to_string(&config_path)?;
		let config = toml::from_str(&content)
			.map_err(|error: toml::de::Error| HublFmtError::ConfigParse(error.to_string()))?;

		Ok(Some(config))
	}
}

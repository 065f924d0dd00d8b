use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// A missing Gemini API key is not an error: the server still starts
    /// and every edit fails at the upstream call.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream or server settings are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_gemini_config()?;
        self.validate_server_config()?;

        if self.gemini.resolve_api_key().is_none() {
            tracing::warn!(
                "no Gemini API key configured (gemini.api_key or {}); edit requests will fail",
                crate::API_KEY_ENV
            );
        }

        Ok(())
    }

    fn validate_gemini_config(&self) -> anyhow::Result<()> {
        if self.gemini.model.trim().is_empty() {
            anyhow::bail!("gemini.model must not be empty");
        }

        if let Some(ref base_url) = self.gemini.base_url
            && !matches!(base_url.scheme(), "http" | "https")
        {
            anyhow::bail!("gemini.base_url must use http or https, got '{}'", base_url.scheme());
        }

        self.gemini.timeout_duration()?;

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        if self.server.max_body_size == 0 {
            anyhow::bail!("server.max_body_size must be greater than 0");
        }

        if let Some(ref cors) = self.server.cors
            && cors.credentials
            && cors.origins == crate::AnyOrList::Any
        {
            anyhow::bail!("server.cors.credentials cannot be combined with wildcard origins");
        }

        Ok(())
    }
}

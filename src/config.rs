use crate::errors::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable holding the Azure OpenAI resource endpoint
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
/// Environment variable holding the API version
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";

/// Default API version when the environment does not pin one
pub const DEFAULT_API_VERSION: &str = "2024-02-01";

/// Full runtime configuration: credentials from the environment, everything
/// else from the settings file (or defaults).
#[derive(Debug, Clone)]
pub struct Config {
    pub azure: AzureConfig,
    pub settings: Settings,
}

/// Azure OpenAI connection parameters, loaded once at process start
#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
}

/// Non-secret settings, persisted as TOML at ~/.workorder/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub signature: SignatureBlock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model identifier sent in the request body
    pub model: String,
    /// Azure deployment name in the request path
    pub deployment: String,
    /// Sampling temperature. Fixed at 0 for deterministic drafts; always
    /// serialized so identical inputs produce identical request bodies.
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            deployment: "gpt-4o".to_string(),
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Maximum number of excerpts handed to the generator
    pub top_k: usize,
    /// Minimum lexical score for an excerpt to count as relevant
    pub threshold: f32,
    /// Maximum characters per document chunk
    pub max_chunk_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            top_k: 4,
            threshold: 0.1,
            max_chunk_chars: 1600,
        }
    }
}

/// Fixed closing block appended verbatim to every composed email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    pub name: String,
    pub organization: String,
}

impl Default for SignatureBlock {
    fn default() -> Self {
        Self {
            name: "Brandon Hancock".to_string(),
            organization: "Hancock Realty".to_string(),
        }
    }
}

impl SignatureBlock {
    /// Render the closing lines exactly as they must appear at the end of
    /// every email.
    pub fn render(&self) -> String {
        format!("Best regards,\n\n{},\n{}", self.name, self.organization)
    }
}

impl Settings {
    /// Load settings from file, creating defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;

        if !path.exists() {
            let settings = Settings::default();
            settings.save()?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(&path)?;
        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PipelineError::ConfigurationFailure(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            PipelineError::ConfigurationFailure(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(&path, toml_string)?;

        Ok(())
    }

    /// Get the settings file path
    pub fn settings_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            PipelineError::ConfigurationFailure("Could not determine home directory".to_string())
        })?;

        Ok(home.join(".workorder").join("config.toml"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            model: ModelSettings::default(),
            search: SearchSettings::default(),
            signature: SignatureBlock::default(),
        }
    }
}

impl AzureConfig {
    /// Read connection parameters from the environment. Missing endpoint or
    /// key is fatal before the pipeline starts.
    pub fn from_env() -> Result<Self> {
        let endpoint = required_env(ENV_ENDPOINT)?;
        let api_key = required_env(ENV_API_KEY)?;
        let api_version =
            env::var(ENV_API_VERSION).unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            api_version,
        })
    }
}

fn required_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PipelineError::ConfigurationFailure(format!(
            "{} is not set",
            name
        ))),
    }
}

impl Config {
    /// Assemble the full configuration: env for secrets, file for settings
    pub fn load() -> Result<Self> {
        Ok(Self {
            azure: AzureConfig::from_env()?,
            settings: Settings::load()?,
        })
    }

    /// Display the effective configuration with the API key redacted
    pub fn redacted_display(&self) -> String {
        format!(
            "endpoint:    {}\napi_version: {}\napi_key:     <redacted>\nmodel:       {}\ndeployment:  {}\ntemperature: {}\ntop_k:       {}\nthreshold:   {}\nsignature:   {}, {}",
            self.azure.endpoint,
            self.azure.api_version,
            self.settings.model.model,
            self.settings.model.deployment,
            self.settings.model.temperature,
            self.settings.search.top_k,
            self.settings.search.threshold,
            self.settings.signature.name,
            self.settings.signature.organization,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.model.deployment, "gpt-4o");
        assert_eq!(settings.model.temperature, 0.0);
        assert_eq!(settings.search.top_k, 4);
    }

    #[test]
    fn test_signature_render() {
        let signature = SignatureBlock::default();
        assert_eq!(
            signature.render(),
            "Best regards,\n\nBrandon Hancock,\nHancock Realty"
        );
    }

    #[test]
    fn test_signature_render_custom() {
        let signature = SignatureBlock {
            name: "Jane Doe".to_string(),
            organization: "Doe Inspections".to_string(),
        };
        assert!(signature.render().ends_with("Jane Doe,\nDoe Inspections"));
        assert!(signature.render().starts_with("Best regards,"));
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();

        let toml_string = toml::to_string(&settings).unwrap();
        assert!(toml_string.contains("gpt-4o"));
        assert!(toml_string.contains("Brandon Hancock"));

        let deserialized: Settings = toml::from_str(&toml_string).unwrap();
        assert_eq!(deserialized.model.deployment, "gpt-4o");
        assert_eq!(deserialized.signature, settings.signature);
    }

    #[test]
    fn test_redacted_display_hides_key() {
        let config = Config {
            azure: AzureConfig {
                endpoint: "https://example.openai.azure.com".to_string(),
                api_key: "secret-key-value".to_string(),
                api_version: DEFAULT_API_VERSION.to_string(),
            },
            settings: Settings::default(),
        };

        let display = config.redacted_display();
        assert!(!display.contains("secret-key-value"));
        assert!(display.contains("<redacted>"));
        assert!(display.contains("https://example.openai.azure.com"));
    }
}

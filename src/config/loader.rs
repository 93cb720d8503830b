use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One question-set flavor: the name the user selects by and the file
/// suffix tying it to its question file and answer log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub question_prefix: String,
    pub answer_prefix: String,
    pub variants: Vec<VariantConfig>,
    #[serde(skip)]
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let variant = |name: &str, suffix: &str| VariantConfig {
            name: name.to_string(),
            suffix: suffix.to_string(),
        };

        Self {
            question_prefix: "600Q_".to_string(),
            answer_prefix: "600A_".to_string(),
            variants: vec![
                variant("spanish", "español"),
                variant("english", "ingles"),
                variant("german", "aleman"),
                variant("chinese", "chino"),
                variant("french", "frances"),
                variant("greek", "griego"),
                variant("hungarian", "hungaro"),
                variant("italian", "italiano"),
                variant("japanese", "japones"),
                variant("polish", "polaco"),
                variant("portuguese", "portugues"),
                variant("russian", "ruso"),
            ],
            data_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path.unwrap_or_else(Self::default_config_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn default_config_path() -> PathBuf {
        if let Some(config_path) = std::env::var_os("INTAKE_CONFIG") {
            PathBuf::from(config_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("intake")
                .join("config.yaml")
        }
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn variant(&self, name: &str) -> Option<&VariantConfig> {
        self.variants
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }

    pub fn question_file(&self, variant: &VariantConfig) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.txt", self.question_prefix, variant.suffix))
    }

    pub fn answer_file(&self, variant: &VariantConfig) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.txt", self.answer_prefix, variant.suffix))
    }

    /// Variants whose question file is present on disk.
    pub fn available_variants(&self) -> Vec<&VariantConfig> {
        self.variants
            .iter()
            .filter(|v| self.question_file(v).exists())
            .collect()
    }
}

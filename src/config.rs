use crate::affix::StandaloneConvention;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dictionary_dir: PathBuf,
    pub dictionary_name: String,
    pub number_of_words: usize,
    pub separator: String,
    pub ignore: String,
    pub convention: StandaloneConvention,
    pub require_count_header: bool,
    pub strict_affixes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_dir: PathBuf::from("/usr/share/myspell/dicts/"),
            dictionary_name: "en_GB-large".to_string(),
            number_of_words: 1,
            separator: " ".to_string(),
            ignore: "M".to_string(),
            convention: StandaloneConvention::Swapped,
            require_count_header: true,
            strict_affixes: false,
        }
    }
}

impl Config {
    pub fn dictionary_file(&self) -> PathBuf {
        self.dictionary_dir.join(format!("{}.dic", self.dictionary_name))
    }

    pub fn affix_file(&self) -> PathBuf {
        self.dictionary_dir.join(format!("{}.aff", self.dictionary_name))
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "randword") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("randword_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
            log::warn!("ignoring unreadable config {}", self.path.display());
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

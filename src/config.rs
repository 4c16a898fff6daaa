use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub convert: Convert,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: Default::default(),
            selection: Default::default(),
            sections: Default::default(),
            convert: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Global {
    /// Worker pool size for the parallel transforms. 0 = one fewer than the
    /// CPU count, never below one.
    pub workers: usize,
    pub print_summary: bool,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            workers: 0,
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// Length threshold for the filter command, compared strictly
    /// greater-than.
    pub min_length: u64,
}
impl Default for Selection {
    fn default() -> Self {
        Self { min_length: 500 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sections {
    /// Full heading marker that opens the description section in raw pages.
    pub description_heading: String,
    /// Prefix of the next heading at the same level; slicing stops there.
    pub next_heading: String,
}
impl Default for Sections {
    fn default() -> Self {
        Self {
            description_heading: "<h2 class=\"heading-size-3\">Description</h2>".into(),
            next_heading: "<h2".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convert {
    pub line_width: usize,
    pub normalize_unicode: bool,
    pub normalize_newlines: bool,
    pub trim_trailing_whitespace: bool,
}
impl Default for Convert {
    fn default() -> Self {
        Self {
            line_width: 80,
            normalize_unicode: true,
            normalize_newlines: true,
            trim_trailing_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

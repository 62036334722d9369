//! Configuration constants and settings for runeline
//!
//! Settings come from an INI file; command-line flags override them.
//!
//! ```ini
//! [editor]
//! prompt = "$ "
//! start_mode = insert
//! history_file = ~/.runeline/history.json
//! history_size = 1000
//!
//! [shell]
//! program = /bin/bash
//!
//! [abbreviations]
//! gti = git
//!
//! [aliases]
//! ll = ls -l
//! ```

use anyhow::{bail, Context, Result};
use ini::Ini;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cmd_args::CommandLineArgs;
use crate::repl::editor::{EditorOptions, StartMode};

/// Default settings file path
pub const DEFAULT_CONFIG_PATH: &str = "~/.runeline/config";

/// Environment variable name for overriding the settings file path
pub const CONFIG_PATH_ENV_VAR: &str = "RUNELINE_CONFIG_PATH";

pub const DEFAULT_HISTORY_PATH: &str = "~/.runeline/history.json";

pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Get the settings file path, checking environment variable first, then falling back to default
pub fn get_config_path() -> String {
    std::env::var_os(CONFIG_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Everything the binary needs to build a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub prompt: String,
    pub start_mode: StartMode,
    pub history_file: PathBuf,
    pub history_size: usize,
    pub shell_program: String,
    pub abbreviations: HashMap<String, String>,
    pub aliases: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: "$ ".to_string(),
            start_mode: StartMode::Insert,
            history_file: expand_path(DEFAULT_HISTORY_PATH),
            history_size: DEFAULT_HISTORY_SIZE,
            shell_program: std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string()),
            abbreviations: HashMap::new(),
            aliases: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file gives the defaults
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_path(path);
        if !path.exists() {
            tracing::debug!("no settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_ini_str(&text)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    pub fn from_ini_str(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str(text)?;
        let mut settings = Self::default();

        if let Some(editor) = ini.section(Some("editor")) {
            if let Some(prompt) = editor.get("prompt") {
                settings.prompt = prompt.to_string();
            }
            if let Some(mode) = editor.get("start_mode") {
                settings.start_mode = parse_start_mode(mode)?;
            }
            if let Some(file) = editor.get("history_file") {
                settings.history_file = expand_path(file);
            }
            if let Some(size) = editor.get("history_size") {
                settings.history_size = size
                    .trim()
                    .parse()
                    .with_context(|| format!("history_size is not a number: {size}"))?;
            }
        }
        if let Some(program) = ini.section(Some("shell")).and_then(|s| s.get("program")) {
            settings.shell_program = program.to_string();
        }
        settings.abbreviations = read_pairs(&ini, "abbreviations");
        settings.aliases = read_pairs(&ini, "aliases");

        tracing::debug!(
            "settings: {} abbreviations, {} aliases",
            settings.abbreviations.len(),
            settings.aliases.len()
        );
        Ok(settings)
    }

    /// Let command-line flags win over the file
    pub fn apply_args(&mut self, args: &CommandLineArgs) {
        if let Some(prompt) = args.prompt() {
            self.prompt = prompt.to_string();
        }
        if args.normal() {
            self.start_mode = StartMode::Normal;
        }
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            prompt: self.prompt.clone(),
            start_mode: self.start_mode,
            abbreviations: self.abbreviations.clone(),
        }
    }

    pub fn history_path(&self) -> &Path {
        &self.history_file
    }
}

fn parse_start_mode(value: &str) -> Result<StartMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "insert" => Ok(StartMode::Insert),
        "normal" => Ok(StartMode::Normal),
        other => bail!("start_mode must be insert or normal, got {other:?}"),
    }
}

fn read_pairs(ini: &Ini, section: &str) -> HashMap<String, String> {
    ini.section(Some(section))
        .map(|props| {
            props
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

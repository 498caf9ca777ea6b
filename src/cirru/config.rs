//! Conversion options and their loader
//!
//! `defaults/cirru.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Applications layer user files and single-key
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`Options`]. [`Options::default`] mirrors the embedded file.

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/cirru.default.toml");

/// Everything that tunes lexing, parsing and printing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Options {
    pub syntax: SyntaxOptions,
    pub printer: PrinterOptions,
}

/// Conventions of the notation itself
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyntaxOptions {
    pub indent_width: usize,
    pub fold_marker: String,
    pub splice_marker: String,
    pub comment_marker: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrinterOptions {
    pub layout: Layout,
    pub separator: String,
    /// Keep consecutive flat groups on one line when writing Cirru text
    pub use_inline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Every expression on one line
    Compact,
    /// Nested child groups start on their own indented line
    Pretty,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            fold_marker: "$".to_string(),
            splice_marker: ",".to_string(),
            comment_marker: ";".to_string(),
        }
    }
}

impl SyntaxOptions {
    pub fn is_fold(&self, symbol: &str) -> bool {
        symbol == self.fold_marker
    }

    pub fn is_splice(&self, symbol: &str) -> bool {
        !self.splice_marker.is_empty() && symbol == self.splice_marker
    }

    pub fn is_comment(&self, content: &str) -> bool {
        !self.comment_marker.is_empty() && content.starts_with(&self.comment_marker)
    }

    /// Check that markers can actually appear as standalone tokens
    pub fn validate(&self) -> Result<(), String> {
        if self.indent_width == 0 {
            return Err("syntax.indent_width must be at least 1".to_string());
        }
        if !is_marker_text(&self.fold_marker) {
            return Err(format!(
                "syntax.fold_marker {:?} must be non-empty without spaces, parens or quotes",
                self.fold_marker
            ));
        }
        if !self.splice_marker.is_empty() && !is_marker_text(&self.splice_marker) {
            return Err(format!(
                "syntax.splice_marker {:?} must be without spaces, parens or quotes",
                self.splice_marker
            ));
        }
        if self.splice_marker == self.fold_marker {
            return Err("syntax.splice_marker must differ from syntax.fold_marker".to_string());
        }
        Ok(())
    }
}

fn is_marker_text(text: &str) -> bool {
    !text.is_empty()
        && !text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"'))
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Compact,
            separator: "\n".to_string(),
            use_inline: false,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            syntax: SyntaxOptions::default(),
            printer: PrinterOptions::default(),
        }
    }
}

/// Layers configuration sources over the embedded defaults
///
/// Sources added later win. The CLI stacks them as defaults, then the user
/// file from [`user_config_path`], then `--config`, then flag overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        tracing::debug!(path = %path.display(), required, "layering config file");
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML file that must exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file, skipping it when absent
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Layer the per-user file when a config directory can be found
    pub fn with_user_file(self) -> Self {
        match user_config_path() {
            Some(path) => self.with_optional_file(path),
            None => self,
        }
    }

    /// Set one dotted key, e.g. `printer.separator`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Deserialize the layered sources and validate the syntax markers
    pub fn build(self) -> Result<Options, ConfigError> {
        let options: Options = self.builder.build()?.try_deserialize()?;
        options.syntax.validate().map_err(ConfigError::Message)?;
        tracing::debug!(?options, "loaded conversion options");
        Ok(options)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// `$XDG_CONFIG_HOME/cirru-lisp/config.toml`, falling back to
/// `~/.config/cirru-lisp/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
    Some(config_home.join("cirru-lisp").join("config.toml"))
}

pub fn load_defaults() -> Result<Options, ConfigError> {
    Loader::new().build()
}

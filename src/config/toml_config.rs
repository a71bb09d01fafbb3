use crate::core::chapter_scaffold::{CHAPTER_NOTES_FILE, MANIFEST_FILE};
use crate::core::ConfigProvider;
use crate::domain::model::Variant;
use crate::utils::error::{Result, WorkbenchError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_ROOT: &str = "./chapters";
pub const DEFAULT_BOOK: &str = "Fluent Python";
pub const DEFAULT_NOTES_FILE: &str = "comparison.md";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbenchConfig {
    #[serde(default)]
    pub workbench: WorkbenchSection,
    #[serde(default)]
    pub scaffold: ScaffoldSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbenchSection {
    #[serde(default = "default_root")]
    pub root: Option<String>,
    #[serde(default = "default_book")]
    pub book: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldSection {
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,
    #[serde(default = "default_notes_file")]
    pub notes_file: String,
    #[serde(default)]
    pub force: bool,
}

fn default_root() -> Option<String> {
    Some(DEFAULT_ROOT.to_string())
}

fn default_book() -> String {
    DEFAULT_BOOK.to_string()
}

fn default_variants() -> Vec<String> {
    Variant::names().into_iter().map(String::from).collect()
}

fn default_notes_file() -> String {
    DEFAULT_NOTES_FILE.to_string()
}

impl Default for WorkbenchSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            book: default_book(),
        }
    }
}

impl Default for ScaffoldSection {
    fn default() -> Self {
        Self {
            variants: default_variants(),
            notes_file: default_notes_file(),
            force: false,
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl WorkbenchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        Ok(toml::from_str(&processed_content)?)
    }

    /// 載入設定檔；檔案不存在時使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("Loading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            tracing::debug!("{} not found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    /// 替換環境變數 (例如 ${WORKBENCH_ROOT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let root = validation::validate_required_field("workbench.root", &self.workbench.root)?;
        validation::validate_path("workbench.root", root)?;
        validation::validate_non_empty_string("workbench.book", &self.workbench.book)?;

        if self.scaffold.variants.is_empty() {
            return Err(WorkbenchError::ConfigValidationError {
                field: "scaffold.variants".to_string(),
                message: "At least one variant is required".to_string(),
            });
        }
        validation::validate_allowed_values(
            "scaffold.variants",
            &self.scaffold.variants,
            &Variant::names(),
        )?;
        validation::validate_no_duplicates("scaffold.variants", &self.scaffold.variants)?;
        validation::validate_file_name("scaffold.notes_file", &self.scaffold.notes_file)?;
        self.validate_notes_file_is_free()?;

        Ok(())
    }

    /// 筆記檔名不可與章節內其他產生的檔案或變體目錄重複
    fn validate_notes_file_is_free(&self) -> Result<()> {
        let notes_file = self.scaffold.notes_file.as_str();
        let reserved = [CHAPTER_NOTES_FILE, MANIFEST_FILE]
            .into_iter()
            .chain(Variant::ALL.into_iter().map(Variant::dir_name));

        for name in reserved {
            if notes_file.eq_ignore_ascii_case(name) {
                return Err(WorkbenchError::ConfigValidationError {
                    field: "scaffold.notes_file".to_string(),
                    message: format!("'{}' is already used inside every chapter", name),
                });
            }
        }
        Ok(())
    }

    pub fn variants(&self) -> Result<Vec<Variant>> {
        self.scaffold.variants.iter().map(|name| name.parse()).collect()
    }

    pub fn set_root(&mut self, root: impl Into<String>) {
        self.workbench.root = Some(root.into());
    }

    pub fn set_variants(&mut self, variants: Vec<String>) {
        self.scaffold.variants = variants;
    }
}

impl ConfigProvider for WorkbenchConfig {
    fn workspace_root(&self) -> &str {
        self.workbench.root.as_deref().unwrap_or(DEFAULT_ROOT)
    }

    fn book(&self) -> &str {
        &self.workbench.book
    }

    fn variant_names(&self) -> &[String] {
        &self.scaffold.variants
    }

    fn notes_file(&self) -> &str {
        &self.scaffold.notes_file
    }

    fn force(&self) -> bool {
        self.scaffold.force
    }
}

impl Validate for WorkbenchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[workbench]
root = "./notes/chapters"
book = "Fluent Python, 2nd Edition"

[scaffold]
variants = ["original", "robust"]
notes_file = "differences.md"
force = true
"#;

        let config = WorkbenchConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.workspace_root(), "./notes/chapters");
        assert_eq!(config.book(), "Fluent Python, 2nd Edition");
        assert_eq!(config.variants().unwrap(), vec![Variant::Original, Variant::Robust]);
        assert_eq!(config.notes_file(), "differences.md");
        assert!(config.force());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = WorkbenchConfig::from_toml_str("").unwrap();
        assert_eq!(config, WorkbenchConfig::default());
        assert_eq!(config.variant_names().len(), 4);
        assert_eq!(config.notes_file(), DEFAULT_NOTES_FILE);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FLUENT_WORKBENCH_TEST_ROOT", "/tmp/fluent");

        let toml_content = r#"
[workbench]
root = "${FLUENT_WORKBENCH_TEST_ROOT}"
book = "${FLUENT_WORKBENCH_TEST_UNSET_BOOK}"
"#;

        let config = WorkbenchConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.workspace_root(), "/tmp/fluent");
        assert_eq!(config.book(), "${FLUENT_WORKBENCH_TEST_UNSET_BOOK}");

        std::env::remove_var("FLUENT_WORKBENCH_TEST_ROOT");
    }

    #[test]
    fn test_config_validation() {
        let unknown_variant = WorkbenchConfig::from_toml_str(
            r#"
[scaffold]
variants = ["original", "remix"]
"#,
        )
        .unwrap();
        assert!(unknown_variant.validate().is_err());

        let duplicate = WorkbenchConfig::from_toml_str(
            r#"
[scaffold]
variants = ["robust", "robust"]
"#,
        )
        .unwrap();
        assert!(duplicate.validate().is_err());

        let escaping_notes = WorkbenchConfig::from_toml_str(
            r#"
[scaffold]
notes_file = "../outside.md"
"#,
        )
        .unwrap();
        assert!(escaping_notes.validate().is_err());

        let mut cleared_root = WorkbenchConfig::default();
        cleared_root.workbench.root = None;
        assert!(matches!(
            cleared_root.validate(),
            Err(WorkbenchError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_workbench_section_without_root_uses_default_root() {
        let config = WorkbenchConfig::from_toml_str(
            r#"
[workbench]
book = "Fluent Python"
"#,
        )
        .unwrap();

        assert_eq!(config.workbench.root.as_deref(), Some(DEFAULT_ROOT));
        assert_eq!(config.workspace_root(), DEFAULT_ROOT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_notes_file_cannot_shadow_generated_paths() {
        for name in ["chapter.toml", "README.md", "readme.md", "original", "extensions"] {
            let mut config = WorkbenchConfig::default();
            config.scaffold.notes_file = name.to_string();
            assert!(
                matches!(
                    config.validate(),
                    Err(WorkbenchError::ConfigValidationError { ref field, .. })
                        if field == "scaffold.notes_file"
                ),
                "{} should be rejected",
                name
            );
        }

        let mut config = WorkbenchConfig::default();
        config.scaffold.notes_file = "original.md".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = WorkbenchConfig::from_toml_str("[workbench\nroot = 1").unwrap_err();
        assert!(matches!(err, WorkbenchError::TomlParseError(_)));
    }

    #[test]
    fn test_config_from_file_and_back() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let mut config = WorkbenchConfig::default();
        config.set_root("./book");
        temp_file
            .write_all(config.to_toml_string().unwrap().as_bytes())
            .unwrap();

        let loaded = WorkbenchConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkbenchConfig::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, WorkbenchConfig::default());
    }
}

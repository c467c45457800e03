use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::color::Rgb;
use crate::error::{PaletteError, Result};

/// Bundled rows for the 31 editor themes
const BUNDLED_TABLE: &str = include_str!("../../assets/themes.json");

static BUNDLED: OnceLock<std::result::Result<ThemeTable, String>> = OnceLock::new();

// ═══════════════════════════════════════════════════════════════════════════════
// Rule
// ═══════════════════════════════════════════════════════════════════════════════

/// Syntax or structural category that maps to one color within a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Keyword,
    Operator,
    ConstLang,
    String,
    Comment,
    Background,
    BaseText,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::Keyword,
        Rule::Operator,
        Rule::ConstLang,
        Rule::String,
        Rule::Comment,
        Rule::Background,
        Rule::BaseText,
    ];

    /// Order in which syntax rules are projected into a palette
    pub const PALETTE_ORDER: [Rule; 5] = [
        Rule::Keyword,
        Rule::Operator,
        Rule::ConstLang,
        Rule::String,
        Rule::Comment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Keyword => "keyword",
            Rule::Operator => "operator",
            Rule::ConstLang => "const_lang",
            Rule::String => "string",
            Rule::Comment => "comment",
            Rule::Background => "background",
            Rule::BaseText => "base_text",
        }
    }

    pub fn from_name(name: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|r| r.as_str() == name)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table rows
// ═══════════════════════════════════════════════════════════════════════════════

/// Row as it appears on disk, before validation
#[derive(Debug, Deserialize)]
struct ThemeRowJson {
    theme: String,
    rule: String,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeRow {
    pub theme: String,
    pub rule: Rule,
    /// Normalized `#RRGGBB`
    pub value: String,
}

/// Immutable `(theme, rule, value)` table.
///
/// Construction validates integrity: every value is a hex color, no
/// `(theme, rule)` pair appears twice, and every theme defines `background`
/// and `base_text`. Syntax rules may be missing; the palette builder skips
/// them.
#[derive(Debug, Clone)]
pub struct ThemeTable {
    rows: Vec<ThemeRow>,
    themes: Vec<String>,
    values: HashMap<String, HashMap<Rule, String>>,
}

impl ThemeTable {
    /// Process-wide table parsed from the bundled asset on first use
    pub fn bundled() -> Result<&'static ThemeTable> {
        BUNDLED
            .get_or_init(|| Self::from_json(BUNDLED_TABLE).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|msg| PaletteError::CorruptTable(msg.clone()))
    }

    /// Parse a JSON array of `{"theme", "rule", "value"}` rows
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Vec<ThemeRowJson> = serde_json::from_str(content)?;
        let rows = raw
            .into_iter()
            .map(|row| {
                let rule = Rule::from_name(row.rule.trim()).ok_or_else(|| {
                    PaletteError::CorruptTable(format!(
                        "theme '{}' has unknown rule '{}'",
                        row.theme, row.rule
                    ))
                })?;
                Ok(ThemeRow {
                    theme: row.theme,
                    rule,
                    value: row.value,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Load a user-supplied table file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let table = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), themes = table.themes.len(), "loaded theme table");
        Ok(table)
    }

    pub fn from_rows(rows: Vec<ThemeRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(PaletteError::CorruptTable("table has no rows".to_string()));
        }

        let mut themes: Vec<String> = Vec::new();
        let mut values: HashMap<String, HashMap<Rule, String>> = HashMap::new();
        let mut normalized = Vec::with_capacity(rows.len());

        for row in rows {
            if row.theme.trim().is_empty() {
                return Err(PaletteError::CorruptTable("row with empty theme name".to_string()));
            }
            let value = Rgb::parse(&row.value)
                .map_err(|_| {
                    PaletteError::CorruptTable(format!(
                        "theme '{}' rule '{}' has invalid color '{}'",
                        row.theme, row.rule, row.value
                    ))
                })?
                .to_hex();

            let rules = values.entry(row.theme.clone()).or_insert_with(|| {
                themes.push(row.theme.clone());
                HashMap::new()
            });
            if rules.insert(row.rule, value.clone()).is_some() {
                return Err(PaletteError::CorruptTable(format!(
                    "theme '{}' defines rule '{}' more than once",
                    row.theme, row.rule
                )));
            }

            normalized.push(ThemeRow {
                theme: row.theme,
                rule: row.rule,
                value,
            });
        }

        for theme in &themes {
            for required in [Rule::Background, Rule::BaseText] {
                let present = values
                    .get(theme)
                    .is_some_and(|rules| rules.contains_key(&required));
                if !present {
                    return Err(PaletteError::CorruptTable(format!(
                        "theme '{}' is missing rule '{}'",
                        theme, required
                    )));
                }
            }
        }

        tracing::debug!(rows = normalized.len(), themes = themes.len(), "theme table validated");

        Ok(Self {
            rows: normalized,
            themes,
            values,
        })
    }

    /// Distinct theme names in order of first appearance
    pub fn list_themes(&self) -> Vec<&str> {
        self.themes.iter().map(String::as_str).collect()
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.values.contains_key(theme)
    }

    /// Color for `rule` in `theme`, `None` if the theme or rule is absent
    pub fn value(&self, theme: &str, rule: Rule) -> Option<&str> {
        self.values
            .get(theme)
            .and_then(|rules| rules.get(&rule))
            .map(String::as_str)
    }

    pub fn rows(&self) -> &[ThemeRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(theme: &str, rule: &str, value: &str) -> String {
        format!(r#"{{"theme":"{}","rule":"{}","value":"{}"}}"#, theme, rule, value)
    }

    fn table_json(rows: &[String]) -> String {
        format!("[{}]", rows.join(","))
    }

    #[test]
    fn test_bundled_table_loads() {
        let table = ThemeTable::bundled().unwrap();
        assert_eq!(table.list_themes().len(), 31);
        assert_eq!(table.rows().len(), 31 * 7);
    }

    #[test]
    fn test_bundled_every_theme_has_every_rule() {
        let table = ThemeTable::bundled().unwrap();
        for theme in table.list_themes() {
            for rule in Rule::ALL {
                assert!(table.value(theme, rule).is_some(), "{} missing {}", theme, rule);
            }
        }
    }

    #[test]
    fn test_list_themes_first_appearance_order() {
        let table = ThemeTable::bundled().unwrap();
        let themes = table.list_themes();
        assert_eq!(themes.first(), Some(&"Ambiance"));
        assert_eq!(themes.last(), Some(&"Xcode"));
        assert!(themes.contains(&"Twilight"));
        assert!(themes.contains(&"Textmate (default)"));
    }

    #[test]
    fn test_twilight_values() {
        let table = ThemeTable::bundled().unwrap();
        assert_eq!(table.value("Twilight", Rule::Background), Some("#141414"));
        assert_eq!(table.value("Twilight", Rule::BaseText), Some("#F8F8F8"));
        assert_eq!(table.value("Twilight", Rule::Keyword), Some("#CDA869"));
        assert_eq!(table.value("NotATheme", Rule::Keyword), None);
    }

    #[test]
    fn test_values_are_normalized() {
        let json = table_json(&[
            row("Mini", "background", "#fff"),
            row("Mini", "base_text", "000000"),
        ]);
        let table = ThemeTable::from_json(&json).unwrap();
        assert_eq!(table.value("Mini", Rule::Background), Some("#FFFFFF"));
        assert_eq!(table.value("Mini", Rule::BaseText), Some("#000000"));
    }

    #[test]
    fn test_duplicate_rule_is_corrupt() {
        let json = table_json(&[
            row("Dup", "background", "#000000"),
            row("Dup", "base_text", "#FFFFFF"),
            row("Dup", "keyword", "#FF0000"),
            row("Dup", "keyword", "#00FF00"),
        ]);
        let err = ThemeTable::from_json(&json).unwrap_err();
        assert!(matches!(err, PaletteError::CorruptTable(ref msg) if msg.contains("Dup")));
    }

    #[test]
    fn test_unknown_rule_is_corrupt() {
        let json = table_json(&[row("Odd", "selection", "#000000")]);
        assert!(matches!(
            ThemeTable::from_json(&json),
            Err(PaletteError::CorruptTable(_))
        ));
    }

    #[test]
    fn test_invalid_color_is_corrupt() {
        let json = table_json(&[
            row("Bad", "background", "not-a-color"),
            row("Bad", "base_text", "#FFFFFF"),
        ]);
        assert!(matches!(
            ThemeTable::from_json(&json),
            Err(PaletteError::CorruptTable(_))
        ));
    }

    #[test]
    fn test_missing_structural_rule_is_corrupt() {
        let json = table_json(&[
            row("Half", "background", "#000000"),
            row("Half", "keyword", "#FF0000"),
        ]);
        let err = ThemeTable::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("base_text"));
    }

    #[test]
    fn test_empty_table_is_corrupt() {
        assert!(matches!(
            ThemeTable::from_json("[]"),
            Err(PaletteError::CorruptTable(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ThemeTable::from_json("{not json"),
            Err(PaletteError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        let json = table_json(&[
            row("Custom", "background", "#101010"),
            row("Custom", "base_text", "#EEEEEE"),
            row("Custom", "string", "#00AA00"),
        ]);
        std::fs::write(&path, json).unwrap();

        let table = ThemeTable::from_path(&path).unwrap();
        assert_eq!(table.list_themes(), vec!["Custom"]);
        assert_eq!(table.value("Custom", Rule::String), Some("#00AA00"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ThemeTable::from_path(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PaletteError::Io(_))));
    }

    #[test]
    fn test_rule_names() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_name(rule.as_str()), Some(rule));
        }
        assert_eq!(Rule::from_name("const_lang"), Some(Rule::ConstLang));
        assert_eq!(Rule::from_name("constant"), None);
    }
}

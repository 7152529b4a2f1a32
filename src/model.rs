use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Number,
    Email,
    Password,
    Date,
    File,
}

impl FieldType {
    /// Palette order.
    pub const ALL: [FieldType; 10] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Number,
        FieldType::Email,
        FieldType::Password,
        FieldType::Date,
        FieldType::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Date => "date",
            FieldType::File => "file",
        }
    }

    /// Only choice-style inputs carry option values.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox
        )
    }

    /// Button caption in the palette, e.g. `+ Textarea`.
    pub fn palette_caption(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("+ {}{}", first.to_uppercase(), chars.as_str()),
            None => "+".to_string(),
        }
    }

    pub fn parse(s: &str) -> Option<FieldType> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    pub required: bool,
    pub values: Vec<String>,
}

pub const DEFAULT_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    // dark|light
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "default_options")]
    pub default_options: Vec<String>,
    // Fields to seed the builder with on startup
    #[serde(default)]
    pub initial_fields: Vec<FieldType>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            theme: None,
            default_options: default_options(),
            initial_fields: vec![],
        }
    }
}

fn default_title() -> String {
    "Form Builder".to_string()
}

fn default_options() -> Vec<String> {
    DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn validate_app_config(cfg: &AppConfig) -> Result<(), String> {
    if cfg.default_options.is_empty() {
        return Err("default_options must contain at least one option".to_string());
    }
    for (i, opt) in cfg.default_options.iter().enumerate() {
        if opt.trim().is_empty() {
            return Err(format!("default_options[{i}] must not be blank"));
        }
    }
    if let Some(mode) = cfg.theme.as_deref() {
        if crate::theme::ThemeMode::parse(mode).is_none() {
            return Err(format!("unknown theme '{mode}' (expected dark|light)"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_choice_types_have_options() {
        let with: Vec<FieldType> = FieldType::ALL
            .iter()
            .copied()
            .filter(|t| t.has_options())
            .collect();
        assert_eq!(
            with,
            vec![FieldType::Select, FieldType::Checkbox, FieldType::Radio]
        );
    }

    #[test]
    fn palette_caption_capitalizes() {
        assert_eq!(FieldType::Textarea.palette_caption(), "+ Textarea");
        assert_eq!(FieldType::Email.palette_caption(), "+ Email");
    }

    #[test]
    fn parse_accepts_lowercase_names() {
        assert_eq!(FieldType::parse("select"), Some(FieldType::Select));
        assert_eq!(FieldType::parse(" Date "), Some(FieldType::Date));
        assert_eq!(FieldType::parse("range"), None);
    }

    #[test]
    fn config_yaml_defaults_and_types() {
        let cfg: AppConfig =
            serde_yaml::from_str("theme: light\ninitial_fields: [select, text]\n").unwrap();
        assert_eq!(cfg.title, "Form Builder");
        assert_eq!(cfg.default_options, vec!["Option 1", "Option 2"]);
        assert_eq!(
            cfg.initial_fields,
            vec![FieldType::Select, FieldType::Text]
        );
        assert!(validate_app_config(&cfg).is_ok());
    }

    #[test]
    fn validate_rejects_empty_options() {
        let cfg = AppConfig {
            default_options: vec![],
            ..Default::default()
        };
        let err = validate_app_config(&cfg).unwrap_err();
        assert!(err.contains("default_options"));
    }

    #[test]
    fn validate_rejects_unknown_theme() {
        let cfg = AppConfig {
            theme: Some("neon".into()),
            ..Default::default()
        };
        let err = validate_app_config(&cfg).unwrap_err();
        assert!(err.contains("unknown theme"));
    }
}

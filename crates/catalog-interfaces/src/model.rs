//! Strict component schema
//!
//! These are the normalized shapes every consumer sees. Raw provider data is
//! repaired into them by the catalog normalizer; nothing here is tolerant of
//! aliases or missing fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version assigned to components that do not declare one
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Source language of a component's code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// TypeScript + JSX
    #[default]
    Tsx,
    /// JavaScript + JSX
    Jsx,
}

impl Language {
    /// Lowercase name as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tsx => "tsx",
            Language::Jsx => "jsx",
        }
    }
}

/// Styling technology of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    /// Sass stylesheet
    Scss,
    /// Plain CSS
    #[default]
    Css,
    /// CSS module
    Module,
}

impl StyleType {
    /// Lowercase name as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleType::Scss => "scss",
            StyleType::Css => "css",
            StyleType::Module => "module",
        }
    }
}

/// Style information attached to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpec {
    /// Styling technology
    #[serde(rename = "type")]
    pub style_type: StyleType,

    /// Entry file of the stylesheet, relative to the component
    pub entry: String,
}

/// Declared property of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prop {
    /// Property name
    pub name: String,

    /// Free-form type descriptor (e.g. `string`, `"sm" | "lg"`)
    #[serde(rename = "type")]
    pub prop_type: String,

    /// Whether the property must be supplied
    pub required: bool,

    /// Default value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Named preset of property overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant name
    pub name: String,

    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Property name to override value, in declaration order
    #[serde(default)]
    pub props: Map<String, Value>,
}

/// Kind of file shipped alongside a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Stylesheet
    Style,
    /// Script or module
    Script,
    /// HTML or other markup
    Markup,
    /// Image, including SVG
    Image,
    /// Font file
    Font,
    /// JSON or other data
    Data,
}

/// File shipped alongside a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Path relative to the component root
    pub path: String,

    /// File contents
    pub contents: String,

    /// Kind of file, when known
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<AssetType>,
}

/// Fully normalized component definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Identity key, unique within a catalog ignoring case
    pub name: String,

    /// Package the component is published in
    pub package: String,

    /// Semver-like version string
    pub version: String,

    /// Human readable description
    pub description: String,

    /// Source language of `code`
    pub language: Language,

    /// Styling information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleSpec>,

    /// Declared properties, in declaration order
    pub props: Vec<Prop>,

    /// Named variants, in declaration order
    pub variants: Vec<Variant>,

    /// Component source; may be empty for listing-only data
    pub code: String,

    /// Files shipped with the component
    pub assets: Vec<Asset>,

    /// Tags; order carries no meaning
    pub tags: Vec<String>,

    /// External packages the component imports
    pub dependencies: Vec<String>,
}

impl ComponentSpec {
    /// Creates a spec with the given name and every other field defaulted
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            version: DEFAULT_VERSION.to_string(),
            description: String::new(),
            language: Language::default(),
            style: None,
            props: Vec::new(),
            variants: Vec::new(),
            code: String::new(),
            assets: Vec::new(),
            tags: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Looks up a variant by name, ignoring case
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }
}

/// Browsing projection of a component, without code or assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentListItem {
    /// Component name
    pub name: String,

    /// Human readable description
    pub description: String,

    /// Package the component is published in
    pub package: String,

    /// Semver-like version string
    pub version: String,

    /// Styling information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleSpec>,

    /// Tags; order carries no meaning
    pub tags: Vec<String>,
}

impl From<&ComponentSpec> for ComponentListItem {
    fn from(spec: &ComponentSpec) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            package: spec.package.clone(),
            version: spec.version.clone(),
            style: spec.style.clone(),
            tags: spec.tags.clone(),
        }
    }
}

//! Named repair rules applied by the normalizer
//!
//! Each function resolves one concept of the strict schema from a raw JSON
//! record: it tries the accepted field aliases in order, coerces what it can
//! and falls back to a fixed default otherwise. None of them fail; only the
//! component name is mandatory and that check lives in `record_name`.

use serde_json::{Map, Value};

use crate::data::{
    Asset, AssetType, CatalogError, CatalogMetadata, Language, Prop, StyleSpec, StyleType,
    Variant, DEFAULT_VERSION,
};

/// A raw record is a JSON object; everything else is rejected up front.
pub type Record = Map<String, Value>;

pub const PACKAGE_FIELDS: &[&str] = &["package", "pkg"];
pub const VERSION_FIELDS: &[&str] = &["version", "ver"];
pub const DESCRIPTION_FIELDS: &[&str] = &["description", "desc"];
pub const LANGUAGE_FIELDS: &[&str] = &["language", "lang"];
pub const CODE_FIELDS: &[&str] = &["code", "source"];
pub const DEPENDENCY_FIELDS: &[&str] = &["dependencies", "deps"];
pub const STYLE_ENTRY_FIELDS: &[&str] = &["entry", "entryPoint", "main"];
pub const TYPE_FIELDS: &[&str] = &["type", "kind"];
pub const REQUIRED_FIELDS: &[&str] = &["required", "isRequired"];
pub const DEFAULT_FIELDS: &[&str] = &["default", "defaultValue"];
pub const ASSET_BODY_FIELDS: &[&str] = &["contents", "content", "data"];
pub const OVERRIDE_FIELDS: &[&str] = &["props", "overrides"];

/// Type given to props that do not declare one
pub const DEFAULT_PROP_TYPE: &str = "any";

/// Returns the first alias whose value is present and not null.
pub fn first_field<'a>(record: &'a Record, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| record.get(*alias))
        .find(|value| !value.is_null())
}

/// Reads a scalar as trimmed, non-empty text. Numbers and booleans are
/// rendered; containers are not text.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn text_field(record: &Record, aliases: &[&str]) -> Option<String> {
    first_field(record, aliases).and_then(scalar_text)
}

/// Accepts a raw value as a record and extracts its mandatory name.
pub fn record_name(raw: &Value) -> Result<(&Record, String), CatalogError> {
    let record = raw.as_object().ok_or_else(|| {
        CatalogError::missing_field("name", format!("expected an object, found {}", kind_of(raw)))
    })?;

    match record.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok((record, name.trim().to_string())),
        Some(Value::String(_)) => Err(CatalogError::missing_field("name", "name is blank")),
        Some(other) => Err(CatalogError::missing_field(
            "name",
            format!("expected a string, found {}", kind_of(other)),
        )),
        None => Err(CatalogError::missing_field("name", "record has no name")),
    }
}

/// Best-effort name for diagnostics about a record that failed elsewhere.
pub fn loose_name(raw: &Value) -> Option<String> {
    raw.get("name").and_then(scalar_text)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `package` / `pkg`, defaulting to the empty string.
pub fn package(record: &Record) -> String {
    text_field(record, PACKAGE_FIELDS).unwrap_or_default()
}

/// `version` / `ver` as text (numbers are rendered), defaulting to 1.0.0.
pub fn version(record: &Record) -> String {
    text_field(record, VERSION_FIELDS).unwrap_or_else(|| DEFAULT_VERSION.to_string())
}

/// `description` / `desc`, defaulting to the empty string.
pub fn description(record: &Record) -> String {
    text_field(record, DESCRIPTION_FIELDS).unwrap_or_default()
}

/// `language` / `lang`; anything that does not name JavaScript is tsx.
pub fn language(record: &Record) -> Language {
    match text_field(record, LANGUAGE_FIELDS)
        .map(|l| l.to_ascii_lowercase())
        .as_deref()
    {
        Some("jsx") | Some("js") | Some("javascript") => Language::Jsx,
        _ => Language::Tsx,
    }
}

/// Restricts a style type to the enum; unknown values become css.
pub fn style_type(value: &str) -> StyleType {
    match value.trim().to_ascii_lowercase().as_str() {
        "scss" => StyleType::Scss,
        "module" => StyleType::Module,
        _ => StyleType::Css,
    }
}

/// `style` as `{type, entry|entryPoint|main}` or as a bare type string.
pub fn style(record: &Record) -> Option<StyleSpec> {
    match record.get("style")? {
        Value::Object(style) => Some(StyleSpec {
            style_type: text_field(style, TYPE_FIELDS)
                .map(|t| style_type(&t))
                .unwrap_or_default(),
            entry: text_field(style, STYLE_ENTRY_FIELDS).unwrap_or_default(),
        }),
        Value::String(kind) if !kind.trim().is_empty() => Some(StyleSpec {
            style_type: style_type(kind),
            entry: String::new(),
        }),
        _ => None,
    }
}

/// Reads a boolean flag; accepts `true`/`false` strings as well.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Renders a prop type descriptor; structured descriptors keep their JSON form.
pub fn prop_type(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) | Some(Value::Null) | None => DEFAULT_PROP_TYPE.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Builds a prop from its name and its configuration value. A bare string
/// configuration is the type.
pub fn prop(name: &str, config: &Value) -> Prop {
    match config {
        Value::Object(config) => Prop {
            name: name.to_string(),
            prop_type: prop_type(first_field(config, TYPE_FIELDS)),
            required: first_field(config, REQUIRED_FIELDS)
                .and_then(flag)
                .unwrap_or(false),
            default: first_field(config, DEFAULT_FIELDS).cloned(),
            description: text_field(config, DESCRIPTION_FIELDS),
        },
        Value::String(_) => Prop {
            name: name.to_string(),
            prop_type: prop_type(Some(config)),
            required: false,
            default: None,
            description: None,
        },
        _ => Prop {
            name: name.to_string(),
            prop_type: DEFAULT_PROP_TYPE.to_string(),
            required: false,
            default: None,
            description: None,
        },
    }
}

/// `props` as an array of `{name, ...}` (bare strings are names) or as a
/// keyed object `name -> config`. Order follows the array or the key
/// insertion order; nameless entries are skipped.
pub fn props(record: &Record) -> Vec<Prop> {
    match record.get("props") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(name) if !name.trim().is_empty() => Some(prop(name.trim(), &Value::Null)),
                Value::Object(config) => {
                    text_field(config, &["name"]).map(|name| prop(&name, entry))
                }
                _ => None,
            })
            .collect(),
        Some(Value::Object(keyed)) => keyed
            .iter()
            .filter(|(name, _)| !name.trim().is_empty())
            .map(|(name, config)| prop(name.trim(), config))
            .collect(),
        _ => Vec::new(),
    }
}

fn override_map(config: &Record) -> Map<String, Value> {
    match first_field(config, OVERRIDE_FIELDS) {
        Some(Value::Object(overrides)) => overrides.clone(),
        _ => Map::new(),
    }
}

/// Builds a variant from its name and configuration.
///
/// In keyed form a configuration carrying neither an override map nor a
/// description is itself the override map (`{"primary": {"color": "blue"}}`).
pub fn variant(name: &str, config: &Value, keyed: bool) -> Variant {
    match config {
        Value::Object(config) => {
            let has_overrides = first_field(config, OVERRIDE_FIELDS).is_some();
            let description = text_field(config, DESCRIPTION_FIELDS);
            let props = if keyed && !has_overrides && description.is_none() {
                config.clone()
            } else {
                override_map(config)
            };
            Variant {
                name: name.to_string(),
                description,
                props,
            }
        }
        _ => Variant {
            name: name.to_string(),
            description: None,
            props: Map::new(),
        },
    }
}

/// `variants` as an array of `{name, ...}` or a keyed object.
pub fn variants(record: &Record) -> Vec<Variant> {
    match record.get("variants") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(name) if !name.trim().is_empty() => {
                    Some(variant(name.trim(), &Value::Null, false))
                }
                Value::Object(config) => {
                    text_field(config, &["name"]).map(|name| variant(&name, entry, false))
                }
                _ => None,
            })
            .collect(),
        Some(Value::Object(keyed)) => keyed
            .iter()
            .filter(|(name, _)| !name.trim().is_empty())
            .map(|(name, config)| variant(name.trim(), config, true))
            .collect(),
        _ => Vec::new(),
    }
}

/// `code` / `source`, kept verbatim, defaulting to the empty string.
pub fn code(record: &Record) -> String {
    match first_field(record, CODE_FIELDS) {
        Some(Value::String(code)) => code.clone(),
        _ => String::new(),
    }
}

/// Maps loose asset kinds onto the enum; unknown kinds are dropped.
pub fn asset_type(value: &str) -> Option<AssetType> {
    match value.trim().to_ascii_lowercase().as_str() {
        "style" | "css" | "scss" | "stylesheet" => Some(AssetType::Style),
        "script" | "js" | "jsx" | "ts" | "tsx" => Some(AssetType::Script),
        "markup" | "html" => Some(AssetType::Markup),
        "image" | "svg" | "png" | "jpg" | "jpeg" | "gif" | "webp" => Some(AssetType::Image),
        "font" => Some(AssetType::Font),
        "data" | "json" => Some(AssetType::Data),
        _ => None,
    }
}

fn asset_body(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(body)) => body.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn asset(path: &str, config: &Value) -> Asset {
    match config {
        Value::Object(config) => Asset {
            path: path.to_string(),
            contents: asset_body(first_field(config, ASSET_BODY_FIELDS)),
            asset_type: text_field(config, TYPE_FIELDS).and_then(|t| asset_type(&t)),
        },
        other => Asset {
            path: path.to_string(),
            contents: asset_body(Some(other)),
            asset_type: None,
        },
    }
}

/// `assets` as an array of `{path, contents|content|data, type}` or a keyed
/// object `path -> contents`. Pathless entries are skipped.
pub fn assets(record: &Record) -> Vec<Asset> {
    match record.get("assets") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let path = entry.as_object().and_then(|e| text_field(e, &["path"]))?;
                Some(asset(&path, entry))
            })
            .collect(),
        Some(Value::Object(keyed)) => keyed
            .iter()
            .filter(|(path, _)| !path.trim().is_empty())
            .map(|(path, config)| asset(path.trim(), config))
            .collect(),
        _ => Vec::new(),
    }
}

/// Trims, drops blanks and removes case-insensitive duplicates, keeping the
/// first spelling.
pub fn dedup_labels<I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(label.to_lowercase()))
        .collect()
}

fn label_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(entries) => Some(dedup_labels(entries.iter().filter_map(scalar_text))),
        Value::String(joined) => Some(dedup_labels(joined.split(',').map(str::to_string))),
        _ => None,
    }
}

/// Explicit `tags` (array or comma-separated string); without a tag list a
/// `category` becomes the only tag.
pub fn tags(record: &Record) -> Vec<String> {
    if let Some(tags) = record.get("tags").and_then(label_list) {
        return tags;
    }
    text_field(record, &["category"]).into_iter().collect()
}

/// `dependencies` / `deps` as a list, or a package.json style object whose
/// keys are the package names.
pub fn dependencies(record: &Record) -> Vec<String> {
    match first_field(record, DEPENDENCY_FIELDS) {
        Some(Value::Object(versions)) => dedup_labels(versions.keys().cloned()),
        Some(other) => label_list(other).unwrap_or_default(),
        None => Vec::new(),
    }
}

fn string_list(record: &Record, field: &str) -> Vec<String> {
    record.get(field).and_then(label_list).unwrap_or_default()
}

/// Source-declared catalog metadata. Returns `None` unless the value is an
/// object; individual fields are repaired like component fields.
pub fn catalog_metadata(raw: &Value) -> Option<CatalogMetadata> {
    let record = raw.as_object()?;
    Some(CatalogMetadata {
        version: text_field(record, VERSION_FIELDS),
        last_updated: text_field(record, &["lastUpdated", "last_updated", "updatedAt"]),
        total_components: first_field(record, &["totalComponents", "total_components", "total"])
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(0),
        packages: string_list(record, "packages"),
        tags: string_list(record, "tags"),
    })
}

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::rules::{self, Record};
use super::{normalize_catalog, normalize_component, normalize_list_item};
use crate::data::{AssetType, CatalogError, ErrorCode, Language, StyleType, DEFAULT_VERSION};

fn record(value: Value) -> Record {
    value.as_object().cloned().expect("test record must be an object")
}

#[test]
fn test_minimal_record_gets_defaults() {
    let spec = normalize_component(&json!({ "name": "  Button " })).unwrap();

    assert_eq!(spec.name, "Button");
    assert_eq!(spec.package, "");
    assert_eq!(spec.version, DEFAULT_VERSION);
    assert_eq!(spec.description, "");
    assert_eq!(spec.language, Language::Tsx);
    assert_eq!(spec.style, None);
    assert!(spec.props.is_empty());
    assert!(spec.variants.is_empty());
    assert_eq!(spec.code, "");
    assert!(spec.assets.is_empty());
    assert!(spec.tags.is_empty());
    assert!(spec.dependencies.is_empty());
}

#[test]
fn test_missing_name_is_the_only_fatal_condition() {
    for raw in [
        json!({ "description": "nameless" }),
        json!({ "name": "   " }),
        json!({ "name": 7 }),
        json!("Button"),
        Value::Null,
    ] {
        let err = normalize_component(&raw).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingRequiredField, "input: {}", raw);
        assert!(matches!(err, CatalogError::MissingRequiredField { ref field, .. } if field == "name"));

        let err = normalize_list_item(&raw).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingRequiredField);
    }
}

#[test]
fn test_field_aliases_resolve() {
    let spec = normalize_component(&json!({
        "name": "Badge",
        "pkg": "@ui/core",
        "ver": 2,
        "desc": "Small status label",
        "lang": "JSX",
        "source": "export default Badge;",
        "deps": ["clsx"]
    }))
    .unwrap();

    assert_eq!(spec.package, "@ui/core");
    assert_eq!(spec.version, "2");
    assert_eq!(spec.description, "Small status label");
    assert_eq!(spec.language, Language::Jsx);
    assert_eq!(spec.code, "export default Badge;");
    assert_eq!(spec.dependencies, vec!["clsx".to_string()]);
}

#[test]
fn test_canonical_field_wins_over_alias() {
    let rec = record(json!({ "package": "@ui/core", "pkg": "@legacy/ui" }));
    assert_eq!(rules::package(&rec), "@ui/core");

    let rec = record(json!({ "package": null, "pkg": "@legacy/ui" }));
    assert_eq!(rules::package(&rec), "@legacy/ui");
}

#[test]
fn test_props_array_and_keyed_object_are_equivalent() {
    let from_array = normalize_component(&json!({
        "name": "Button",
        "props": [
            { "name": "label", "type": "string", "required": true, "description": "Text" },
            { "name": "size", "type": "'sm' | 'lg'", "default": "sm" },
            { "name": "onClick", "type": "() => void" }
        ]
    }))
    .unwrap();

    let from_object = normalize_component(&json!({
        "name": "Button",
        "props": {
            "label": { "type": "string", "isRequired": true, "desc": "Text" },
            "size": { "type": "'sm' | 'lg'", "defaultValue": "sm" },
            "onClick": "() => void"
        }
    }))
    .unwrap();

    assert_eq!(from_array.props, from_object.props);
    let names: Vec<_> = from_object.props.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["label", "size", "onClick"]);
    assert!(from_object.props[0].required);
    assert_eq!(from_object.props[1].default, Some(json!("sm")));
    assert_eq!(from_object.props[0].description.as_deref(), Some("Text"));
}

#[test]
fn test_prop_rules() {
    let prop = rules::prop("disabled", &json!({ "required": "true" }));
    assert!(prop.required);
    assert_eq!(prop.prop_type, rules::DEFAULT_PROP_TYPE);

    let prop = rules::prop("variant", &json!({ "kind": ["primary", "ghost"] }));
    assert_eq!(prop.prop_type, r#"["primary","ghost"]"#);

    let prop = rules::prop("count", &json!(3));
    assert_eq!(prop.prop_type, rules::DEFAULT_PROP_TYPE);
    assert_eq!(prop.default, None);

    let rec = record(json!({ "props": ["label", { "type": "no name" }, 4] }));
    let props = rules::props(&rec);
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].name, "label");
}

#[test]
fn test_variants_array_and_keyed_object() {
    let from_array = normalize_component(&json!({
        "name": "Button",
        "variants": [
            { "name": "primary", "description": "Main action", "props": { "color": "blue" } },
            { "name": "ghost", "props": { "outline": true } }
        ]
    }))
    .unwrap();

    let from_object = normalize_component(&json!({
        "name": "Button",
        "variants": {
            "primary": { "desc": "Main action", "overrides": { "color": "blue" } },
            "ghost": { "outline": true }
        }
    }))
    .unwrap();

    assert_eq!(from_array.variants, from_object.variants);
    assert_eq!(from_object.variants[1].props.get("outline"), Some(&json!(true)));
}

#[test]
fn test_style_rules() {
    let rec = record(json!({ "style": { "type": "SCSS", "entryPoint": "button.scss" } }));
    let style = rules::style(&rec).unwrap();
    assert_eq!(style.style_type, StyleType::Scss);
    assert_eq!(style.entry, "button.scss");

    let rec = record(json!({ "style": { "type": "less", "main": "button.less" } }));
    let style = rules::style(&rec).unwrap();
    assert_eq!(style.style_type, StyleType::Css);
    assert_eq!(style.entry, "button.less");

    let rec = record(json!({ "style": "module" }));
    assert_eq!(rules::style(&rec).unwrap().style_type, StyleType::Module);

    let rec = record(json!({ "style": { "entry": "x.css" } }));
    assert_eq!(rules::style(&rec).unwrap().style_type, StyleType::Css);

    let rec = record(json!({ "style": null }));
    assert!(rules::style(&rec).is_none());
}

#[test]
fn test_asset_rules() {
    let rec = record(json!({
        "assets": [
            { "path": "button.css", "contents": ".btn {}", "type": "css" },
            { "path": "icon.svg", "content": "<svg/>", "type": "svg" },
            { "path": "tokens.json", "data": { "primary": "#00f" } },
            { "contents": "pathless" }
        ]
    }));
    let assets = rules::assets(&rec);

    assert_eq!(assets.len(), 3);
    assert_eq!(assets[0].asset_type, Some(AssetType::Style));
    assert_eq!(assets[1].contents, "<svg/>");
    assert_eq!(assets[1].asset_type, Some(AssetType::Image));
    assert_eq!(assets[2].contents, r##"{"primary":"#00f"}"##);
    assert_eq!(assets[2].asset_type, None);

    let rec = record(json!({ "assets": { "README.md": "# Button", "x.bin": { "type": "blob" } } }));
    let assets = rules::assets(&rec);
    assert_eq!(assets[0].path, "README.md");
    assert_eq!(assets[0].contents, "# Button");
    assert_eq!(assets[1].contents, "");
    assert_eq!(assets[1].asset_type, None);
}

#[test]
fn test_tag_rules() {
    let rec = record(json!({ "tags": ["Form", " action ", "form", "", 3] }));
    assert_eq!(rules::tags(&rec), vec!["Form", "action", "3"]);

    let rec = record(json!({ "tags": "form, action" }));
    assert_eq!(rules::tags(&rec), vec!["form", "action"]);

    let rec = record(json!({ "category": "navigation" }));
    assert_eq!(rules::tags(&rec), vec!["navigation"]);

    let rec = record(json!({ "tags": [], "category": "navigation" }));
    assert!(rules::tags(&rec).is_empty());

    let rec = record(json!({ "tags": 5, "category": "navigation" }));
    assert_eq!(rules::tags(&rec), vec!["navigation"]);

    let rec = record(json!({}));
    assert!(rules::tags(&rec).is_empty());
}

#[test]
fn test_dependency_rules() {
    let rec = record(json!({ "dependencies": { "react": "^18", "clsx": "^2" } }));
    assert_eq!(rules::dependencies(&rec), vec!["react", "clsx"]);

    let rec = record(json!({ "dependencies": "react,clsx" }));
    assert_eq!(rules::dependencies(&rec), vec!["react", "clsx"]);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let plain = normalize_component(&json!({ "name": "Card" })).unwrap();
    let noisy = normalize_component(&json!({ "name": "Card", "x-internal": { "a": 1 }, "rating": 5 })).unwrap();
    assert_eq!(plain, noisy);
}

#[test]
fn test_normalization_is_deterministic() {
    let raw = json!({
        "name": "Table",
        "props": { "rows": { "type": "Row[]" }, "dense": "boolean" },
        "tags": "data, grid"
    });
    assert_eq!(normalize_component(&raw).unwrap(), normalize_component(&raw).unwrap());
}

#[test]
fn test_list_item_matches_projection() {
    let raw = json!({
        "name": "Modal",
        "pkg": "@ui/overlay",
        "style": { "type": "module", "entry": "modal.module.css" },
        "category": "overlay",
        "code": "..."
    });
    let spec = normalize_component(&raw).unwrap();
    let item = normalize_list_item(&raw).unwrap();
    assert_eq!(item, crate::data::ComponentListItem::from(&spec));
}

#[test]
fn test_batch_skips_invalid_items() {
    let raw = vec![
        json!({ "name": "Button" }),
        json!({ "description": "missing name" }),
        json!({ "name": "Card" }),
        json!({ "name": "Input" }),
    ];
    let valid_input_count = 3;

    let catalog = normalize_catalog(&raw);

    assert_eq!(catalog.len(), valid_input_count);
    assert_eq!(catalog.list_items.len(), catalog.components.len());
    assert_eq!(catalog.raw_count, 4);
    assert_eq!(catalog.diagnostics.len(), 1);
    assert_eq!(catalog.diagnostics[0].index, 1);
    assert_eq!(catalog.diagnostics[0].code, ErrorCode::MissingRequiredField);
}

#[test]
fn test_batch_with_one_nameless_item_drops_exactly_one() {
    let mut raw: Vec<Value> = (0..5).map(|i| json!({ "name": format!("Widget{}", i) })).collect();
    let valid_input_count = raw.len();
    raw.push(json!({ "package": "@ui/core" }));

    let catalog = normalize_catalog(&raw);
    assert_eq!(catalog.len(), valid_input_count);
    assert_eq!(catalog.len(), raw.len() - 1);
}

#[test]
fn test_batch_keeps_first_of_duplicate_names() {
    let catalog = normalize_catalog(&[
        json!({ "name": "Button", "package": "@ui/core" }),
        json!({ "name": "BUTTON", "package": "@ui/legacy" }),
    ]);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.components[0].package, "@ui/core");
    assert_eq!(catalog.diagnostics.len(), 1);
    assert_eq!(catalog.diagnostics[0].name.as_deref(), Some("BUTTON"));
    assert_eq!(catalog.diagnostics[0].code, ErrorCode::InvalidResponse);
}

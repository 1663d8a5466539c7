//! Raw catalog fixtures shared by unit and integration tests

use serde_json::{json, Value};

/// The two-component catalog used throughout the query tests
pub fn button_and_card() -> Vec<Value> {
    vec![
        json!({
            "name": "Button",
            "package": "@ui/core",
            "description": "Clickable action trigger",
            "tags": ["form", "action"],
            "props": {
                "label": { "type": "string", "required": true },
                "size": { "type": "'sm' | 'md' | 'lg'", "default": "md" }
            },
            "variants": {
                "primary": { "description": "Main call to action", "props": { "color": "blue" } },
                "small": { "size": "sm" }
            },
            "code": "export function Button() { return null; }"
        }),
        json!({
            "name": "Card",
            "pkg": "@ui/layout",
            "desc": "Content container",
            "tags": ["layout"]
        }),
    ]
}

/// A static catalog document in the shape the file loader expects, with a
/// deliberately broken record in the middle.
pub fn catalog_document() -> Value {
    let mut components = button_and_card();
    components.insert(1, json!({ "description": "record without a name" }));
    components.push(json!({
        "name": "Modal",
        "package": "@ui/overlay",
        "category": "overlay",
        "style": { "type": "module", "entry": "modal.module.css" },
        "dependencies": { "react-dom": "^18" }
    }));

    json!({
        "components": components,
        "metadata": {
            "version": "2024.06",
            "lastUpdated": "2024-06-01T00:00:00Z",
            "totalComponents": 3
        }
    })
}

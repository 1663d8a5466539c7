use serde_json::Value;
use tracing::debug;

use crate::data::{
    CatalogError, CatalogSnapshot, ComponentFilter, ComponentListItem, ComponentSpec, Prop,
    QueryPage, SearchOptions, DEFAULT_LIMIT, MAX_LIMIT,
};
use crate::normalize::rules::DEFAULT_PROP_TYPE;

/// Most suggestions attached to a not found error
pub const MAX_SUGGESTIONS: usize = 3;

/// Length of the leading stem used for loose name suggestions
const SUGGESTION_STEM: usize = 3;

/// Filters the snapshot and returns one page of list items in load order.
///
/// Text matches name, description or any tag (case-insensitive substring),
/// tags use ANY semantics, package must match exactly. `total` counts every
/// match, not just the page.
pub fn query(
    snapshot: &CatalogSnapshot,
    options: &SearchOptions,
) -> Result<QueryPage<ComponentListItem>, CatalogError> {
    let limit = validate_limit(options.limit)?;
    let offset = options.offset.unwrap_or(0);

    let text = options
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);
    let tags: Vec<String> = options
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let matches: Vec<&ComponentListItem> = snapshot
        .list_items()
        .iter()
        .filter(|item| text.as_deref().map_or(true, |t| matches_text(item, t)))
        .filter(|item| tags.is_empty() || matches_any_tag(item, &tags))
        .filter(|item| {
            options
                .package
                .as_deref()
                .map_or(true, |p| item.package == p)
        })
        .collect();

    let total = matches.len();
    let items: Vec<ComponentListItem> = matches
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    debug!(total, offset, limit, returned = items.len(), "Catalog query evaluated");

    Ok(QueryPage {
        items,
        total,
        has_more: offset.saturating_add(limit) < total,
        offset,
        limit,
    })
}

/// First page of matches for a listing filter
pub fn list(
    snapshot: &CatalogSnapshot,
    filter: &ComponentFilter,
) -> Result<Vec<ComponentListItem>, CatalogError> {
    query(snapshot, &SearchOptions::from(filter)).map(|page| page.items)
}

/// Case-insensitive lookup by name, with suggestions on a miss
pub fn get_by_name<'a>(
    snapshot: &'a CatalogSnapshot,
    name: &str,
) -> Result<&'a ComponentSpec, CatalogError> {
    let wanted = name.trim();
    if wanted.is_empty() {
        return Err(CatalogError::InvalidArgument(
            "component name must not be empty".to_string(),
        ));
    }

    snapshot.find(wanted).ok_or_else(|| CatalogError::NotFound {
        name: wanted.to_string(),
        suggestions: suggest(snapshot.list_items(), wanted),
    })
}

/// Names related to `wanted` by plain containment, at most three, in load
/// order.
pub fn suggest(items: &[ComponentListItem], wanted: &str) -> Vec<String> {
    let wanted = wanted.to_lowercase();
    let stem: String = wanted.chars().take(SUGGESTION_STEM).collect();

    items
        .iter()
        .filter(|item| {
            let candidate = item.name.to_lowercase();
            candidate.contains(&wanted) || wanted.contains(&candidate) || candidate.contains(&stem)
        })
        .map(|item| item.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Returns a copy of `spec` with the named variant's overrides applied to
/// its prop defaults. Overrides for props the component does not declare
/// are appended as optional props.
pub fn apply_variant(spec: &ComponentSpec, variant: &str) -> Result<ComponentSpec, CatalogError> {
    let selected = spec.variant(variant).ok_or_else(|| CatalogError::NotFound {
        name: format!("{}#{}", spec.name, variant),
        suggestions: spec.variants.iter().map(|v| v.name.clone()).collect(),
    })?;

    let mut resolved = spec.clone();
    for (key, value) in &selected.props {
        match resolved.props.iter_mut().find(|p| &p.name == key) {
            Some(prop) => prop.default = Some(value.clone()),
            None => resolved.props.push(override_prop(key, value)),
        }
    }
    Ok(resolved)
}

fn override_prop(name: &str, value: &Value) -> Prop {
    Prop {
        name: name.to_string(),
        prop_type: DEFAULT_PROP_TYPE.to_string(),
        required: false,
        default: Some(value.clone()),
        description: None,
    }
}

fn validate_limit(limit: Option<usize>) -> Result<usize, CatalogError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(0) => Err(CatalogError::InvalidArgument(
            "limit must be at least 1".to_string(),
        )),
        Some(l) if l > MAX_LIMIT => Err(CatalogError::InvalidArgument(format!(
            "limit must not exceed {}, got {}",
            MAX_LIMIT, l
        ))),
        Some(l) => Ok(l),
    }
}

fn matches_text(item: &ComponentListItem, text: &str) -> bool {
    item.name.to_lowercase().contains(text)
        || item.description.to_lowercase().contains(text)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(text))
}

fn matches_any_tag(item: &ComponentListItem, tags: &[String]) -> bool {
    item.tags
        .iter()
        .map(|tag| tag.to_lowercase())
        .any(|tag| tags.contains(&tag))
}

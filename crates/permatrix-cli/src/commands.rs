use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use permatrix::{ApplyMode, TemplateResolver};
use permatrix_core::{BoundaryPolicy, Catalog, codec, wire};
use permatrix_models::{PermissionDraft, PermissionTemplate, find_template};
use permatrix_observability::track_search;
use permatrix_search::{CatalogEntry, SearchIndex, default_template_fields, search};
use tracing::info;

/// Read a JSON array of templates.
pub fn load_templates(path: &Path) -> Result<Vec<PermissionTemplate>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read templates from {}", path.display()))?;
    let templates = PermissionTemplate::list_from_json(&json)
        .with_context(|| format!("Invalid templates file {}", path.display()))?;

    info!(path = %path.display(), count = templates.len(), "Templates loaded");
    Ok(templates)
}

/// Resources and their allowed actions, in catalog order.
pub fn catalog(catalog: &Catalog) -> Result<String> {
    if !catalog.is_available() {
        return Err(anyhow!("Permission catalog is unavailable"));
    }

    let mut out = format!("Catalog version {}\n", catalog.version());
    for resource in catalog.resources() {
        out.push_str(&format!(
            "\n{} ({})\n   {}\n",
            resource.label, resource.resource, resource.description
        ));
        for key in &resource.allowed_actions {
            let label = catalog.action(key).map_or(key.as_str(), |a| a.label.as_str());
            out.push_str(&format!("   - {}:{}  {}\n", resource.resource, key, label));
        }
    }
    Ok(out)
}

/// Canonical wire form of `codes`, after boundary checks.
pub fn validate(catalog: &Catalog, codes: &[String], policy: BoundaryPolicy) -> Result<String> {
    let parsed = wire::parse(catalog, codes, policy)?;

    let mut out = wire::to_wire(catalog, &parsed.permissions).join("\n");
    if !parsed.stripped.is_empty() {
        out.push_str(&format!("\n\nStripped: {}", parsed.stripped.join(", ")));
    }
    Ok(out)
}

/// The grouped view of `codes`, as JSON.
pub fn group(catalog: &Catalog, codes: &[String], policy: BoundaryPolicy) -> Result<String> {
    let parsed = wire::parse(catalog, codes, policy)?;
    let grouped = codec::to_grouped(catalog, &parsed.permissions);
    Ok(serde_json::to_string_pretty(&grouped.view)?)
}

/// Ranked catalog resources matching `query`.
pub fn search_catalog(catalog: &Catalog, query: &str, threshold: f64) -> Vec<String> {
    let index = SearchIndex::new(CatalogEntry::from_catalog(catalog), CatalogEntry::default_fields());
    render_catalog_hits(&index, query, threshold)
}

pub fn render_catalog_hits(index: &SearchIndex<CatalogEntry>, query: &str, threshold: f64) -> Vec<String> {
    let hits = index.search(query, threshold);
    track_search("catalog", hits.len());

    hits.iter()
        .map(|hit| {
            format!(
                "{:.3}  {} ({})",
                hit.score, hit.item.resource.label, hit.item.resource.resource
            )
        })
        .collect()
}

/// Ranked templates matching `query`.
pub fn search_templates(templates: &[PermissionTemplate], query: &str, threshold: f64) -> Vec<String> {
    let hits = search(templates, query, &default_template_fields(), threshold);
    track_search("templates", hits.len());

    hits.iter()
        .map(|hit| format!("{:.3}  {} ({})", hit.score, hit.item.name, hit.item.id))
        .collect()
}

/// Apply the template named by `key` (id or name) to `current`, as JSON.
pub fn apply_template(
    catalog: &Catalog,
    templates: &[PermissionTemplate],
    key: &str,
    mode: ApplyMode,
    current: &[String],
    policy: BoundaryPolicy,
) -> Result<String> {
    let template =
        find_template(templates, key).ok_or_else(|| anyhow!("Template not found: {}", key))?;
    let current = wire::parse(catalog, current, policy)?;
    let draft = PermissionDraft::default().with_permissions(current.permissions);

    let resolution = TemplateResolver::new(catalog).apply(template, mode, &draft);
    let output = serde_json::json!({
        "template": template.name,
        "mode": mode.as_str(),
        "name": resolution.draft.name,
        "description": resolution.draft.description,
        "permissions": wire::to_wire(catalog, &resolution.draft.permissions),
        "drift": resolution.drift,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// One line per drifted template; empty when every template is clean.
pub fn audit_templates(catalog: &Catalog, templates: &[PermissionTemplate]) -> Vec<String> {
    TemplateResolver::new(catalog)
        .drift_report(templates)
        .iter()
        .map(|report| {
            format!(
                "{} ({}): {}",
                report.name,
                report.template_id,
                report.drift.join(", ")
            )
        })
        .collect()
}

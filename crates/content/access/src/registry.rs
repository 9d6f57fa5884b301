//! Resource-type registry
//!
//! Maps a content resource type (`building-type`) to the permission
//! resource name capabilities are granted on (`building-types`).

/// Known resource types and their permission resource names
const RESOURCE_NAMES: &[(&str, &str)] = &[
    ("page", "pages"),
    ("section", "sections"),
    ("project", "projects"),
    ("building-type", "building-types"),
    ("industry", "industries"),
    ("country", "countries"),
    ("region", "regions"),
    ("area", "areas"),
    ("branch", "branches"),
    ("customer", "customers"),
    ("certification", "certifications"),
    ("company-update", "company-updates"),
    ("company-update-category", "company-update-categories"),
    ("brochure", "brochures"),
    ("header-configuration", "header-configurations"),
    ("footer-configuration", "footer-configurations"),
    ("website-appearance", "website-appearances"),
    ("smtp-settings", "smtp-settings"),
    ("google-recaptcha", "google-recaptcha"),
    ("google-maps", "google-maps"),
    ("vacancy", "vacancies"),
];

/// Permission resource name for `resource_type`.
///
/// Unknown types fall back to `resource_type + "s"`.
pub fn resource_name(resource_type: &str) -> String {
    let resource_type = resource_type.trim();
    RESOURCE_NAMES
        .iter()
        .find(|(known, _)| *known == resource_type)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("{}s", resource_type))
}

pub fn is_known_resource_type(resource_type: &str) -> bool {
    RESOURCE_NAMES
        .iter()
        .any(|(known, _)| *known == resource_type.trim())
}

/// Registered `(resource type, resource name)` pairs
pub fn known_resource_types() -> impl Iterator<Item = (&'static str, &'static str)> {
    RESOURCE_NAMES.iter().copied()
}

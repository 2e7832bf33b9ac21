use atlas_shared::{RegionRegistry, RegistryError};

use crate::config::REGION_DATA_ID;
use crate::dom::log_warn;

const BUILTIN_REGIONS: &str = include_str!("../assets/regions.json");

pub fn builtin() -> Result<RegionRegistry, RegistryError> {
    RegionRegistry::from_json(BUILTIN_REGIONS)
}

/// Region data for this page: the inline `#map-regions` JSON block when present and
/// valid, otherwise the compiled-in set.
pub fn load(document: &web_sys::Document) -> Result<RegionRegistry, RegistryError> {
    let inline = document
        .get_element_by_id(REGION_DATA_ID)
        .and_then(|el| el.text_content())
        .filter(|raw| !raw.trim().is_empty());

    if let Some(raw) = inline {
        match RegionRegistry::from_json(&raw) {
            Ok(registry) => return Ok(registry),
            Err(e) => log_warn(&format!("Ignoring #{REGION_DATA_ID}: {e}")),
        }
    }
    builtin()
}

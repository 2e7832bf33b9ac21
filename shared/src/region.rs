use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag attached to every region.
///
/// Tags outside the known set are kept verbatim in `Other` so the legend can
/// still show them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionCategory {
    Capital,
    City,
    Forest,
    Mountains,
    River,
    Lake,
    Other(String),
}

impl RegionCategory {
    pub fn tag(&self) -> &str {
        match self {
            Self::Capital => "capital",
            Self::City => "city",
            Self::Forest => "forest",
            Self::Mountains => "mountains",
            Self::River => "river",
            Self::Lake => "lake",
            Self::Other(raw) => raw,
        }
    }

    /// Display label for the description panel. Unknown tags fall back to the raw value.
    pub fn label(&self) -> &str {
        match self {
            Self::Capital => "Столица",
            Self::City => "Город",
            Self::Forest => "Лес",
            Self::Mountains => "Горы",
            Self::River => "Река",
            Self::Lake => "Озеро",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for RegionCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "capital" => Self::Capital,
            "city" => Self::City,
            "forest" => Self::Forest,
            "mountains" => Self::Mountains,
            "river" => Self::River,
            "lake" => Self::Lake,
            _ => Self::Other(tag),
        }
    }
}

impl From<RegionCategory> for String {
    fn from(category: RegionCategory) -> Self {
        match category {
            RegionCategory::Other(raw) => raw,
            known => known.tag().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: RegionCategory,
}

#[derive(Debug)]
pub enum RegistryError {
    Parse(serde_json::Error),
    DuplicateId(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid region data: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate region id: {id}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Read-only lookup table from region id to region, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: HashMap<String, Region>,
    order: Vec<String>,
}

impl RegionRegistry {
    pub fn new(regions: Vec<Region>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for region in regions {
            if registry.regions.contains_key(&region.id) {
                return Err(RegistryError::DuplicateId(region.id));
            }
            registry.order.push(region.id.clone());
            registry.regions.insert(region.id.clone(), region);
        }
        Ok(registry)
    }

    /// Parse a JSON array of `{ id, name, description, category }` objects.
    pub fn from_json(raw: &str) -> Result<Self, RegistryError> {
        let regions: Vec<Region> = serde_json::from_str(raw)?;
        Self::new(regions)
    }

    pub fn lookup(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Region ids in load order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{RegionCategory, RegionRegistry, RegistryError};

    const SAMPLE: &str = r#"[
        { "id": "capital", "name": "Aldmer", "description": "Seat of the crown.", "category": "capital" },
        { "id": "mirkwood", "name": "Mirkwood", "description": "Old trees.", "category": "forest" },
        { "id": "ruins", "name": "Ruins", "description": "Nobody lives here.", "category": "ruins" }
    ]"#;

    #[test]
    fn lookup_finds_loaded_regions() {
        let registry = RegionRegistry::from_json(SAMPLE).unwrap();
        assert_eq!(registry.len(), 3);
        let region = registry.lookup("mirkwood").unwrap();
        assert_eq!(region.name, "Mirkwood");
        assert_eq!(region.category, RegionCategory::Forest);
        assert!(registry.lookup("atlantis").is_none());
    }

    #[test]
    fn ids_keep_load_order() {
        let registry = RegionRegistry::from_json(SAMPLE).unwrap();
        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(ids, vec!["capital", "mirkwood", "ruins"]);
    }

    #[test]
    fn known_categories_use_translated_labels() {
        assert_eq!(RegionCategory::Capital.label(), "Столица");
        assert_eq!(RegionCategory::City.label(), "Город");
        assert_eq!(RegionCategory::Forest.label(), "Лес");
        assert_eq!(RegionCategory::Mountains.label(), "Горы");
        assert_eq!(RegionCategory::River.label(), "Река");
        assert_eq!(RegionCategory::Lake.label(), "Озеро");
    }

    #[test]
    fn unknown_category_falls_back_to_raw_tag() {
        let registry = RegionRegistry::from_json(SAMPLE).unwrap();
        let region = registry.lookup("ruins").unwrap();
        assert_eq!(region.category, RegionCategory::Other("ruins".to_string()));
        assert_eq!(region.category.label(), "ruins");
    }

    #[test]
    fn category_serializes_back_to_tag() {
        let json = serde_json::to_string(&RegionCategory::Mountains).unwrap();
        assert_eq!(json, "\"mountains\"");
        let json = serde_json::to_string(&RegionCategory::Other("swamp".into())).unwrap();
        assert_eq!(json, "\"swamp\"");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"[
            { "id": "a", "name": "A", "description": "", "category": "city" },
            { "id": "a", "name": "A again", "description": "", "category": "city" }
        ]"#;
        match RegionRegistry::from_json(raw) {
            Err(RegistryError::DuplicateId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = RegionRegistry::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
        assert!(err.to_string().starts_with("invalid region data"));
    }
}

//! Offset map loading
//!
//! An offset map is a JSON object whose keys are field categories (`Body`,
//! `Vitals`, `Attributes`, ...) holding arrays of
//! `{name, offset, startBit, length, values?}`, plus an optional `Base`
//! object of hex overrides for the table locations and record layout.
//! Some published maps omit the outer braces; those are accepted too.

use super::contract::CONTRACT_FIELDS;
use super::loader::{Config, ConfigError};
use super::ConfigResult;
use crate::core::types::{category, parse_hex_u64, BitSpan, FieldDescriptor};
use crate::import::normalize::{
    names_match, normalize_field_name, normalize_header, ATTR_IMPORT_ORDER, DUR_IMPORT_ORDER,
    TEND_IMPORT_ORDER,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Categories shown first, in this order
const PREFERRED_ORDER: [&str; 6] = [
    category::BODY,
    category::VITALS,
    category::ATTRIBUTES,
    category::DURABILITY,
    category::TENDENCIES,
    category::BADGES,
];

/// A named group of player fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCategory {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Hex overrides from the map's `Base` object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseOverrides {
    pub player_base_rva: Option<u64>,
    pub player_stride: Option<u64>,
    pub first_name_offset: Option<u64>,
    pub last_name_offset: Option<u64>,
    pub face_id_offset: Option<u64>,
    pub team_ptr_offset: Option<u64>,
    pub team_name_offset: Option<u64>,
    /// Name field size in bytes
    pub name_field_bytes: Option<u64>,
}

impl BaseOverrides {
    fn from_map(map: &Map<String, Value>) -> ConfigResult<Self> {
        Ok(BaseOverrides {
            player_base_rva: hex_entry(map, "Player Base Address")?,
            player_stride: hex_entry(map, "Player Offset Length")?,
            first_name_offset: hex_entry(map, "Offset First Name")?,
            last_name_offset: hex_entry(map, "Offset Last Name")?,
            face_id_offset: hex_entry(map, "Offset Face ID")?,
            team_ptr_offset: hex_entry(map, "Offset Player Team")?,
            team_name_offset: hex_entry(map, "Offset Player Team Name")?,
            name_field_bytes: hex_entry(map, "Name Field Length")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == BaseOverrides::default()
    }

    /// Writes every present override into `config`
    pub fn apply(&self, config: &mut Config) {
        let players = &mut config.players;
        if let Some(rva) = self.player_base_rva {
            players.static_rva = Some(rva);
        }
        if let Some(stride) = self.player_stride {
            players.layout.stride = stride;
        }
        if let Some(offset) = self.first_name_offset {
            players.layout.first_name_offset = offset;
        }
        if let Some(offset) = self.last_name_offset {
            players.layout.last_name_offset = offset;
        }
        if let Some(offset) = self.face_id_offset {
            players.layout.face_id_offset = offset;
        }
        if let Some(offset) = self.team_ptr_offset {
            players.layout.team_ptr_offset = offset;
        }
        if let Some(bytes) = self.name_field_bytes {
            players.layout.name_max_chars = (bytes / 2).max(1) as usize;
        }
        if let Some(offset) = self.team_name_offset {
            config.teams.layout.name_offset = offset;
        }
    }
}

/// Parsed and ordered field categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMap {
    pub categories: Vec<FieldCategory>,
    pub base: BaseOverrides,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOffset {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    offset: RawOffset,
    #[serde(rename = "startBit", default)]
    start_bit: u8,
    length: u8,
    #[serde(default)]
    values: Option<Vec<String>>,
}

impl OffsetMap {
    /// Only the built-in categories
    pub fn builtin() -> Self {
        OffsetMap {
            categories: vec![FieldCategory {
                name: category::CONTRACT.to_string(),
                fields: CONTRACT_FIELDS.clone(),
            }],
            base: BaseOverrides::default(),
        }
    }

    /// Reads and parses an offset map file
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        let map = Self::parse(&contents)?;
        info!(
            "Loaded offset map {} ({} categories, {} fields)",
            path.display(),
            map.categories.len(),
            map.field_count()
        );
        Ok(map)
    }

    pub fn parse(contents: &str) -> ConfigResult<Self> {
        let trimmed = contents.trim();
        let wrapped;
        let json = if trimmed.is_empty() || trimmed.starts_with('{') {
            trimmed
        } else {
            wrapped = format!("{{{}}}", trimmed);
            wrapped.as_str()
        };
        let root: Map<String, Value> = serde_json::from_str(json)?;

        let mut base = BaseOverrides::default();
        let mut categories = Vec::new();
        for (key, value) in &root {
            if key.eq_ignore_ascii_case("base") {
                match value {
                    Value::Object(map) => base = BaseOverrides::from_map(map)?,
                    _ => return Err(ConfigError::Invalid("Base must be an object".to_string())),
                }
                continue;
            }
            let Value::Array(entries) = value else {
                debug!("Ignoring non-array offset map entry {}", key);
                continue;
            };
            categories.push(FieldCategory {
                name: key.clone(),
                fields: parse_fields(key, entries)?,
            });
        }

        let mut map = OffsetMap { categories, base };
        map.split_durability();
        map.reorder(category::ATTRIBUTES, ATTR_IMPORT_ORDER);
        map.reorder(category::TENDENCIES, TEND_IMPORT_ORDER);
        map.reorder(category::DURABILITY, DUR_IMPORT_ORDER);
        map.merge(category::CONTRACT, &CONTRACT_FIELDS);
        map.sort_categories();
        Ok(map)
    }

    pub fn category(&self, name: &str) -> Option<&FieldCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Field by category and normalized name
    pub fn field(&self, category: &str, name: &str) -> Option<&FieldDescriptor> {
        let wanted = normalize_field_name(name);
        self.category(category)?
            .fields
            .iter()
            .find(|f| normalize_field_name(&f.name) == wanted)
    }

    pub fn field_count(&self) -> usize {
        self.categories.iter().map(|c| c.fields.len()).sum()
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut FieldCategory> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Moves `...Durability` attributes into their own category
    fn split_durability(&mut self) {
        let Some(attributes) = self.category_mut(category::ATTRIBUTES) else {
            return;
        };
        let (durability, kept): (Vec<_>, Vec<_>) = attributes
            .fields
            .drain(..)
            .partition(|f| normalize_field_name(&f.name).contains("DURABILITY"));
        attributes.fields = kept;
        if durability.is_empty() {
            return;
        }

        let moved = durability
            .into_iter()
            .map(|f| FieldDescriptor::new(category::DURABILITY, f.name, f.span, f.values));
        match self.category_mut(category::DURABILITY) {
            Some(existing) => existing.fields.extend(moved),
            None => self.categories.push(FieldCategory {
                name: category::DURABILITY.to_string(),
                fields: moved.collect(),
            }),
        }
    }

    /// Orders a category by import column order; unmatched fields go last
    fn reorder(&mut self, name: &str, order: &[&str]) {
        let Some(category) = self.category_mut(name) else {
            return;
        };
        let mut remaining = std::mem::take(&mut category.fields);
        let mut ordered = Vec::with_capacity(remaining.len());
        for header in order {
            let norm = normalize_header(header);
            if let Some(i) = remaining
                .iter()
                .position(|f| names_match(&norm, &normalize_field_name(&f.name)))
            {
                ordered.push(remaining.remove(i));
            }
        }
        ordered.extend(remaining);
        category.fields = ordered;
    }

    /// Adds `extra` fields to a category, skipping names already present
    fn merge(&mut self, name: &str, extra: &[FieldDescriptor]) {
        match self.category_mut(name) {
            Some(existing) => {
                for field in extra {
                    if !existing.fields.iter().any(|f| f.name == field.name) {
                        existing.fields.push(field.clone());
                    }
                }
            }
            None => self.categories.push(FieldCategory {
                name: name.to_string(),
                fields: extra.to_vec(),
            }),
        }
    }

    fn sort_categories(&mut self) {
        self.categories.sort_by_key(|c| {
            PREFERRED_ORDER
                .iter()
                .position(|p| *p == c.name)
                .unwrap_or(PREFERRED_ORDER.len())
        });
    }
}

fn parse_fields(category: &str, entries: &[Value]) -> ConfigResult<Vec<FieldDescriptor>> {
    let mut fields = Vec::with_capacity(entries.len());
    for entry in entries {
        let raw: RawField = match serde_json::from_value(entry.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping malformed {} field: {}", category, e);
                continue;
            }
        };
        if raw.length == 0 || raw.length > 64 || raw.start_bit > 7 {
            warn!(
                "Skipping {} field {}: bit {} width {}",
                category, raw.name, raw.start_bit, raw.length
            );
            continue;
        }
        let offset = match raw.offset {
            RawOffset::Number(n) => n,
            RawOffset::Text(text) => parse_hex_u64(&text)
                .map_err(|e| ConfigError::Invalid(format!("{} field {}: {}", category, raw.name, e)))?,
        };
        fields.push(FieldDescriptor::new(
            category,
            raw.name,
            BitSpan::new(offset, raw.start_bit, raw.length),
            raw.values,
        ));
    }
    // Stable: fields sharing a byte keep their listed order
    fields.sort_by_key(|f| f.span.offset);
    Ok(fields)
}

fn hex_entry(map: &Map<String, Value>, key: &str) -> ConfigResult<Option<u64>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => parse_hex_u64(text)
            .map(Some)
            .map_err(|e| ConfigError::Invalid(format!("Base {}: {}", key, e))),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| ConfigError::Invalid(format!("Base {}: {} is not an address", key, n))),
        Some(other) => Err(ConfigError::Invalid(format!(
            "Base {}: unexpected value {}",
            key, other
        ))),
    }
}

/// Loads the configured offset map, applying its `Base` overrides to `config`
pub fn load_offset_map(config: &mut Config) -> ConfigResult<OffsetMap> {
    let Some(path) = config.offsets.map_path.clone() else {
        return Ok(OffsetMap::builtin());
    };
    let map = OffsetMap::load(&path)?;
    if !map.base.is_empty() {
        debug!("Applying offset map base overrides: {:?}", map.base);
        map.base.apply(config);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldKind;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
        "Base": {
            "Player Base Address": "0x7E60000",
            "Player Offset Length": "0x450",
            "Offset Player Team": "68",
            "Name Field Length": "0x30"
        },
        "Attributes": [
            {"name": "Speed", "offset": "0x3A0", "startBit": 2, "length": 7},
            {"name": "Back Durability", "offset": "0x3D0", "length": 7},
            {"name": "Driving Layup", "offset": "0x39B", "length": 7},
            {"name": "Mystery Rating", "offset": "0x380", "length": 7},
            {"name": "Head Durability", "offset": "0x3C0", "length": 7}
        ],
        "Badges": [
            {"name": "Deadeye", "offset": "0x42A", "startBit": 3, "length": 3,
             "values": ["None", "Bronze", "Silver", "Gold", "HOF", "Legend"]}
        ],
        "Vitals": [
            {"name": "Height", "offset": 468, "length": 16}
        ],
        "Contract": [
            {"name": "Years Left", "offset": "0x390", "length": 5}
        ]
    "#;

    fn names(category: &FieldCategory) -> Vec<&str> {
        category.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_parse_without_outer_braces() {
        let map = OffsetMap::parse(SAMPLE).unwrap();
        let order: Vec<&str> = map.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["Vitals", "Attributes", "Durability", "Badges", "Contract"]);
    }

    #[test]
    fn test_durability_split_and_reorder() {
        let map = OffsetMap::parse(SAMPLE).unwrap();
        let attributes = map.category("Attributes").unwrap();
        assert_eq!(names(attributes), vec!["Driving Layup", "Speed", "Mystery Rating"]);

        let durability = map.category("Durability").unwrap();
        assert_eq!(names(durability), vec!["Back Durability", "Head Durability"]);
        assert!(durability
            .fields
            .iter()
            .all(|f| f.category == "Durability" && f.kind == FieldKind::Rating));
    }

    #[test]
    fn test_field_kinds() {
        let map = OffsetMap::parse(SAMPLE).unwrap();
        let deadeye = map.field("Badges", "deadeye").unwrap();
        assert_eq!(deadeye.kind, FieldKind::Enumerated);
        assert_eq!(deadeye.span, BitSpan::new(0x42A, 3, 3));

        let height = map.field("Vitals", "Height").unwrap();
        assert_eq!(height.kind, FieldKind::Raw);
        assert_eq!(height.span.offset, 0x1D4);
    }

    #[test]
    fn test_contract_merge_skips_existing_names() {
        let map = OffsetMap::parse(SAMPLE).unwrap();
        let contract = map.category("Contract").unwrap();
        assert_eq!(contract.fields.len(), CONTRACT_FIELDS.len());
        assert_eq!(contract.fields[0].name, "Years Left");
        assert_eq!(
            contract.fields.iter().filter(|f| f.name == "Years Left").count(),
            1
        );
    }

    #[test]
    fn test_base_overrides() {
        let map = OffsetMap::parse(SAMPLE).unwrap();
        let mut config = Config::default();
        map.base.apply(&mut config);

        assert_eq!(config.players.static_rva, Some(0x07E6_0000));
        assert_eq!(config.players.layout.stride, 0x450);
        assert_eq!(config.players.layout.team_ptr_offset, 0x68);
        assert_eq!(config.players.layout.name_max_chars, 24);
        // untouched
        assert_eq!(config.players.layout.face_id_offset, 0x114);
        assert_eq!(config.teams.layout.name_offset, 0x2D4);
    }

    #[test]
    fn test_bad_base_value() {
        let result = OffsetMap::parse(r#"{"Base": {"Player Base Address": "0xZZ"}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_fields_are_skipped() {
        let map = OffsetMap::parse(
            r#"{"Body": [{"name": "Weight"}, {"name": "Wingspan", "offset": "0x1E0", "length": 0},
                         {"name": "Shoe", "offset": "0x1E8", "length": 4}]}"#,
        )
        .unwrap();
        assert_eq!(names(map.category("Body").unwrap()), vec!["Shoe"]);
    }

    #[test]
    fn test_builtin() {
        let map = OffsetMap::builtin();
        assert_eq!(map.categories.len(), 1);
        assert!(map.field("Contract", "No Trade").is_some());
        assert!(map.base.is_empty());
    }

    #[test]
    fn test_load_offset_map() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Offsets.txt");
        fs::write(&path, SAMPLE).unwrap();

        let mut config = Config::default();
        config.offsets.map_path = Some(path);
        let map = load_offset_map(&mut config).unwrap();
        assert!(map.category("Badges").is_some());
        assert_eq!(config.players.layout.stride, 0x450);

        let mut config = Config::default();
        let map = load_offset_map(&mut config).unwrap();
        assert_eq!(map, OffsetMap::builtin());
        assert_eq!(config, Config::default());
    }
}

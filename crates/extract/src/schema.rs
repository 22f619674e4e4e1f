//! The JSON shape every extraction capability must emit.
//!
//! Field names match the wire format exactly. Decoding is lenient (ids may be
//! strings, text may be numbers) and unknown keys are kept in `extra`, so a
//! checkpoint written by an older generation survives a load/save cycle.

use ingest::lenient;
use ingest::InscriptionRecord;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const PARSE_ERROR_NAME: &str = "Parse Error";
pub const ERROR_NAME: &str = "Error";
pub const NO_TEXT_NAME: &str = "No Text";

/// Names written by failed or skipped extractions. Persons carrying them are
/// never turned into graph nodes.
pub fn is_sentinel_name(name: &str) -> bool {
    matches!(name, PARSE_ERROR_NAME | ERROR_NAME | NO_TEXT_NAME)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerStep {
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position_normalized: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position_abstract: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position_description: String,
    /// Sequencing key. Not the list position.
    #[serde(default, deserialize_with = "lenient::int")]
    pub order: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benefaction {
    #[serde(default, deserialize_with = "lenient::string")]
    pub benefaction_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub object: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub object_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub object_description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub benefaction_text: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cost: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Age at death: a whole number of years when the text gives one, free text
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum AgeAtDeath {
    Years(i64),
    Text(String),
}

impl AgeAtDeath {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => match n.as_i64() {
                Some(years) => Some(AgeAtDeath::Years(years)),
                None => Some(AgeAtDeath::Text(n.to_string())),
            },
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else if let Ok(years) = s.parse::<i64>() {
                    Some(AgeAtDeath::Years(years))
                } else {
                    Some(AgeAtDeath::Text(s.to_string()))
                }
            }
            other => Some(AgeAtDeath::Text(other.to_string())),
        }
    }
}

impl Serialize for AgeAtDeath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AgeAtDeath::Years(years) => serializer.serialize_i64(*years),
            AgeAtDeath::Text(text) => serializer.serialize_str(text),
        }
    }
}

fn age_at_death<'de, D>(deserializer: D) -> Result<Option<AgeAtDeath>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(AgeAtDeath::from_value))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(
        default,
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub person_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub person_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub person_name_readable: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub praenomen: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nomen: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cognomen: String,
    /// Canonical emperor name, empty for everyone else.
    #[serde(default, deserialize_with = "lenient::string")]
    pub person_name_normalized: String,
    /// Wikidata QID matching `person_name_normalized`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub person_name_link: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub social_status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub social_status_evidence: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gender_evidence: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ethnicity: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ethnicity_evidence: String,
    #[serde(
        default,
        deserialize_with = "age_at_death",
        skip_serializing_if = "Option::is_none"
    )]
    pub age_at_death: Option<AgeAtDeath>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub age_at_death_evidence: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_career: bool,
    #[serde(default)]
    pub career_path: Vec<CareerStep>,
    #[serde(default)]
    pub benefactions: Vec<Benefaction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Person {
    /// `person_name`, or `Unknown` when the extractor left it blank.
    pub fn display_name(&self) -> &str {
        if self.person_name.is_empty() {
            UNKNOWN_NAME
        } else {
            &self.person_name
        }
    }

    pub fn is_sentinel(&self) -> bool {
        is_sentinel_name(&self.person_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Community {
    #[serde(
        default,
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub community_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub community_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub community_name_normalized: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub community_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub community_description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub evidence: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where a relationship points. Exactly one variant, never both ids.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationshipTarget {
    Person(u32),
    Community(u32),
    /// Legacy form: a bare name with no entry in `persons`.
    AdHoc(LegacyPerson),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyPerson {
    pub name: String,
    pub readable: String,
    pub normalized: String,
    pub link: String,
    pub social_status: String,
    pub social_status_evidence: String,
}

/// Both `target_person_id` and `target_community_id` were set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbiguousTarget {
    pub person_id: u32,
    pub community_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub source_person_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub target_person_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub target_community_id: Option<u32>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub relationship_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub property: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub property_text: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_person_index: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_person_index: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Relationship {
    /// Source person id, falling back to the older index field, then 0.
    pub fn source(&self) -> u32 {
        self.source_person_id
            .or(self.source_person_index)
            .unwrap_or(0)
    }

    /// Resolve the target. `Ok(None)` means nothing usable was given.
    pub fn target(&self) -> Result<Option<RelationshipTarget>, AmbiguousTarget> {
        let person = self.target_person_id.or(self.target_person_index);
        match (person, self.target_community_id) {
            (Some(person_id), Some(community_id)) => Err(AmbiguousTarget {
                person_id,
                community_id,
            }),
            (None, Some(community_id)) => Ok(Some(RelationshipTarget::Community(community_id))),
            (Some(person_id), None) => Ok(Some(RelationshipTarget::Person(person_id))),
            (None, None) => Ok(self.legacy_target().map(RelationshipTarget::AdHoc)),
        }
    }

    fn legacy_target(&self) -> Option<LegacyPerson> {
        let name = self.legacy_field("target_person_name", "person_name");
        if name.is_empty() {
            return None;
        }
        Some(LegacyPerson {
            name,
            readable: self.legacy_field("target_person_name_readable", "person_name_readable"),
            normalized: self
                .legacy_field("target_person_name_normalized", "person_name_normalized"),
            link: self.legacy_field("target_person_name_link", "person_name_link"),
            social_status: self.extra_str("social_status"),
            social_status_evidence: self.extra_str("social_status_evidence"),
        })
    }

    fn legacy_field(&self, key: &str, fallback: &str) -> String {
        match self.extra.get(key) {
            Some(value) if !value.is_null() => lenient::value_to_string(value),
            _ => self.extra_str(fallback),
        }
    }

    fn extra_str(&self, key: &str) -> String {
        self.extra
            .get(key)
            .map(lenient::value_to_string)
            .unwrap_or_default()
    }
}

/// One extraction per inscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "lenient::string")]
    pub edcs_id: String,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub communities: Vec<Community>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_relationships: Option<Vec<Relationship>>,

    // Older generations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_persons: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,

    // Scalar mirror of the first person.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub person_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub person_name_readable: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub person_name_normalized: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub person_name_link: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub social_status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub social_status_evidence: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_career: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_path: Option<Vec<CareerStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefactions: Option<Vec<Benefaction>>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_data: Option<InscriptionRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExtractionResult {
    /// Placeholder for an inscription with no usable text.
    pub fn no_text(record: &InscriptionRecord) -> Self {
        Self {
            edcs_id: record.id.clone(),
            person_name: Some(NO_TEXT_NAME.to_string()),
            person_name_readable: Some(NO_TEXT_NAME.to_string()),
            has_career: false,
            career_path: Some(Vec::new()),
            notes: "Inscription text is missing".to_string(),
            original_data: Some(record.clone()),
            ..Default::default()
        }
    }

    /// Copy the first person into the top-level scalar fields.
    pub fn mirror_first_person(&mut self) {
        let Some(first) = self.persons.first() else {
            return;
        };
        self.person_name = Some(first.display_name().to_string());
        self.person_name_readable = Some(first.person_name_readable.clone());
        self.person_name_normalized = Some(first.person_name_normalized.clone());
        self.person_name_link = Some(first.person_name_link.clone());
        self.social_status = Some(first.social_status.clone());
        self.social_status_evidence = Some(first.social_status_evidence.clone());
        self.has_career = first.has_career;
        self.career_path = Some(first.career_path.clone());
        self.benefactions = Some(first.benefactions.clone());
    }

    /// Relationships in the newest generation present.
    pub fn relationship_list(&self) -> &[Relationship] {
        self.person_relationships
            .as_deref()
            .or(self.relationships.as_deref())
            .unwrap_or(&[])
    }

    /// The single person described by the legacy scalar fields, if any.
    pub fn legacy_scalar_person(&self) -> Option<Person> {
        let name = self.person_name.as_deref().filter(|n| !n.is_empty())?;
        Some(Person {
            person_id: Some(0),
            person_name: name.to_string(),
            person_name_readable: self.person_name_readable.clone().unwrap_or_default(),
            person_name_normalized: self.person_name_normalized.clone().unwrap_or_default(),
            person_name_link: self.person_name_link.clone().unwrap_or_default(),
            social_status: self.social_status.clone().unwrap_or_default(),
            social_status_evidence: self.social_status_evidence.clone().unwrap_or_default(),
            has_career: self.has_career,
            career_path: self.career_path.clone().unwrap_or_default(),
            benefactions: self.benefactions.clone().unwrap_or_default(),
            ..Default::default()
        })
    }

    pub fn has_any_career(&self) -> bool {
        self.has_career || self.persons.iter().any(|p| p.has_career)
    }
}

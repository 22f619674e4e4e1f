//! Turns accumulated extraction results into one consolidated graph.
//!
//! Entity ids are only unique inside one inscription, so every minted IRI
//! carries the inscription id. Vocabulary nodes (status, place, ...) are keyed
//! by label alone and shared across inscriptions.

use extract::schema::{AmbiguousTarget, LegacyPerson, UNKNOWN_NAME};
use extract::vocab::{
    BenefactionType, CommunityType, Gender, KINSHIP_EDGE_PROPERTIES, PositionType,
    RelationshipType, SocialStatus,
};
use extract::{
    AgeAtDeath, Benefaction, CareerStep, Community, EmperorTable, ExtractionResult, Person,
    Relationship, RelationshipTarget,
};
use ingest::{InscriptionRecord, lenient};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::namespace::{
    self, BASE, BENEF, CAREER, COGNOMEN, COMMTYPE, COMMUNITY, DCTERMS, FOAF, NOMEN,
    PERSON, PLACE, PRAENOMEN, PROVINCE, RDFS, REL, RELTYPE, SKOS, STATUS, encode_id, epig,
};
use crate::places::PlaceMapping;
use crate::resolve::ResolvedPersons;
use crate::term::{Graph, Object};

/// Whether out-of-vocabulary labels are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VocabularyMode {
    #[default]
    Warn,
    Permissive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Both target ids were set; the relationship was dropped.
    AmbiguousTarget {
        relationship: usize,
        person_id: u32,
        community_id: u32,
    },
    UnknownLabel {
        vocabulary: &'static str,
        label: String,
    },
    UnknownProperty {
        relationship_type: String,
        property: String,
    },
    UnknownEmperor {
        name: String,
    },
    EmperorLinkMismatch {
        name: String,
        link: String,
        expected: String,
    },
    UnparsableDating {
        field: &'static str,
        value: String,
    },
    /// A statement about `subject` had an IRI that does not parse; it was dropped.
    InvalidIri {
        subject: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub edcs_id: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.edcs_id)?;
        match &self.kind {
            DiagnosticKind::AmbiguousTarget {
                relationship,
                person_id,
                community_id,
            } => write!(
                f,
                "relationship {} names both person {} and community {}; skipped",
                relationship, person_id, community_id
            ),
            DiagnosticKind::UnknownLabel { vocabulary, label } => {
                write!(f, "`{}` is not a known {}", label, vocabulary)
            }
            DiagnosticKind::UnknownProperty {
                relationship_type,
                property,
            } => write!(
                f,
                "`{}` is not a standard property of {} relationships",
                property, relationship_type
            ),
            DiagnosticKind::UnknownEmperor { name } => {
                write!(f, "`{}` is not in the emperor table", name)
            }
            DiagnosticKind::EmperorLinkMismatch {
                name,
                link,
                expected,
            } => write!(f, "`{}` linked to {} but the table says {}", name, link, expected),
            DiagnosticKind::UnparsableDating { field, value } => {
                write!(f, "{} `{}` is not a year", field, value)
            }
            DiagnosticKind::InvalidIri { subject, message } => {
                write!(f, "statement about {} dropped: {}", subject, message)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub graph: Graph,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct GraphCompiler {
    mode: VocabularyMode,
    places: PlaceMapping,
    emperors: Arc<EmperorTable>,
}

impl GraphCompiler {
    pub fn new(emperors: Arc<EmperorTable>) -> Self {
        Self {
            mode: VocabularyMode::default(),
            places: PlaceMapping::default(),
            emperors,
        }
    }

    pub fn with_mode(mut self, mode: VocabularyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_places(mut self, places: PlaceMapping) -> Self {
        self.places = places;
        self
    }

    /// Build the graph. Pure apart from logging diagnostics.
    pub fn compile(&self, results: &[ExtractionResult]) -> Compilation {
        let mut out = Compilation::default();
        for result in results {
            InscriptionBuilder::new(self, result, &mut out).build();
        }
        tracing::info!(
            inscriptions = results.len(),
            triples = out.graph.len(),
            diagnostics = out.diagnostics.len(),
            "Graph compiled"
        );
        out
    }
}

/// Emits the triples of one extraction result.
struct InscriptionBuilder<'a> {
    compiler: &'a GraphCompiler,
    result: &'a ExtractionResult,
    out: &'a mut Compilation,
    edcs_id: &'a str,
    id: String,
    inscription: String,
}

impl<'a> InscriptionBuilder<'a> {
    fn new(
        compiler: &'a GraphCompiler,
        result: &'a ExtractionResult,
        out: &'a mut Compilation,
    ) -> Self {
        let edcs_id = if result.edcs_id.is_empty() {
            UNKNOWN_NAME
        } else {
            result.edcs_id.as_str()
        };
        let id = encode_id(edcs_id);
        Self {
            compiler,
            result,
            out,
            edcs_id,
            inscription: BASE.term(&id),
            id,
        }
    }

    fn build(mut self) {
        let result = self.result;
        let inscription = self.inscription.clone();
        self.add(&inscription, &namespace::rdf_type(), Object::iri(epig("Inscription")));
        self.add(&inscription, &DCTERMS.term("identifier"), Object::plain(self.edcs_id));

        if let Some(record) = &result.original_data {
            self.metadata(record);
        }

        let resolved = ResolvedPersons::resolve(result);
        for (person_id, person) in resolved.iter() {
            if person.is_sentinel() {
                continue;
            }
            self.person(person_id, person);
        }

        for (idx, community) in result.communities.iter().enumerate() {
            self.community(idx, community);
        }

        for (idx, relationship) in result.relationship_list().iter().enumerate() {
            self.relationship(idx + 1, relationship);
        }

        if !result.notes.is_empty() {
            self.add(&inscription, &RDFS.term("comment"), Object::plain(&result.notes));
        }
    }

    fn metadata(&mut self, record: &InscriptionRecord) {
        let inscription = self.inscription.clone();

        if !record.province.is_empty() {
            let node = PROVINCE.label(&record.province);
            self.add(&inscription, &epig("province"), Object::iri(&node));
            self.labelled_node(&node, "Province", &record.province);
        }

        if !record.place.is_empty() {
            let node = PLACE.label(&record.place);
            self.add(&inscription, &epig("place"), Object::iri(&node));
            self.labelled_node(&node, "Place", &record.place);

            let compiler = self.compiler;
            if let Some(pleiades_id) = compiler.places.get(&record.place) {
                tracing::debug!(
                    edcs_id = self.edcs_id,
                    place = %record.place,
                    pleiades_id,
                    "Place identifier added"
                );
                self.add(&inscription, &epig("pleiadesId"), Object::plain(pleiades_id));
            }
        }

        self.dating("dating_from", "datingFrom", &record.dating_from);
        self.dating("dating_to", "datingTo", &record.dating_to);

        if !record.inscription.is_empty() {
            self.add(&inscription, &epig("text"), Object::plain(&record.inscription));
        }
        if !record.publication.is_empty() {
            self.add(
                &inscription,
                &DCTERMS.term("bibliographicCitation"),
                Object::plain(&record.publication),
            );
        }
    }

    fn dating(&mut self, field: &'static str, property: &str, value: &str) {
        if value.trim().is_empty() {
            return;
        }
        match lenient::parse_int(value) {
            Some(year) => {
                let inscription = self.inscription.clone();
                self.add(&inscription, &epig(property), Object::integer(year));
            }
            None => self.diagnose(DiagnosticKind::UnparsableDating {
                field,
                value: value.to_string(),
            }),
        }
    }

    fn person(&mut self, person_id: u32, person: &Person) {
        let node = PERSON.term(&format!("{}_person_{}", self.id, person_id));
        let inscription = self.inscription.clone();

        self.add(&node, &namespace::rdf_type(), Object::iri(FOAF.term("Person")));
        self.add(&node, &FOAF.term("name"), Object::plain(person.display_name()));
        if !person.person_name_readable.is_empty() {
            self.add(&node, &RDFS.term("label"), Object::plain(&person.person_name_readable));
        }

        self.name_part(&node, "praenomen", "Praenomen", &PRAENOMEN, &person.praenomen);
        self.name_part(&node, "nomen", "Nomen", &NOMEN, &person.nomen);
        self.name_part(&node, "cognomen", "Cognomen", &COGNOMEN, &person.cognomen);

        self.emperor_identity(
            &node,
            &person.person_name_normalized,
            &person.person_name_link,
        );

        self.add(&inscription, &epig("mentions"), Object::iri(&node));
        self.add(&inscription, &epig("mainSubject"), Object::iri(&node));

        self.social_status(&node, &person.social_status, &person.social_status_evidence);

        if !person.gender.is_empty() {
            self.check::<Gender>(&person.gender);
            if person.gender != Gender::Unknown.as_str() {
                self.add(&node, &FOAF.term("gender"), Object::plain(&person.gender));
                if !person.gender_evidence.is_empty() {
                    self.add(&node, &epig("genderEvidence"), Object::plain(&person.gender_evidence));
                }
            }
        }

        if !person.ethnicity.is_empty() {
            self.add(&node, &epig("ethnicity"), Object::plain(&person.ethnicity));
            if !person.ethnicity_evidence.is_empty() {
                self.add(
                    &node,
                    &epig("ethnicityEvidence"),
                    Object::plain(&person.ethnicity_evidence),
                );
            }
        }

        if let Some(age) = &person.age_at_death {
            let value = match age {
                AgeAtDeath::Years(years) => Object::integer(*years),
                AgeAtDeath::Text(text) => Object::plain(text),
            };
            self.add(&node, &epig("ageAtDeath"), value);
            if !person.age_at_death_evidence.is_empty() {
                self.add(
                    &node,
                    &epig("ageAtDeathEvidence"),
                    Object::plain(&person.age_at_death_evidence),
                );
            }
        }

        if person.has_career {
            self.career(&node, person_id, &person.career_path);
        }

        for (idx, benefaction) in person.benefactions.iter().enumerate() {
            self.benefaction(&node, person_id, idx + 1, benefaction);
        }
    }

    fn name_part(
        &mut self,
        person: &str,
        property: &str,
        class: &str,
        ns: &namespace::Namespace,
        value: &str,
    ) {
        if value.is_empty() {
            return;
        }
        let node = ns.label(value);
        self.add(person, &epig(property), Object::iri(&node));
        self.labelled_node(&node, class, value);
    }

    fn emperor_identity(&mut self, node: &str, normalized: &str, link: &str) {
        if !normalized.is_empty() {
            self.add(node, &epig("normalizedName"), Object::plain(normalized));
            let compiler = self.compiler;
            if compiler.mode == VocabularyMode::Warn {
                match compiler.emperors.qid(normalized) {
                    None => self.diagnose(DiagnosticKind::UnknownEmperor {
                        name: normalized.to_string(),
                    }),
                    Some(expected) if !link.is_empty() && expected != link => {
                        let expected = expected.to_string();
                        self.diagnose(DiagnosticKind::EmperorLinkMismatch {
                            name: normalized.to_string(),
                            link: link.to_string(),
                            expected,
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        if !link.is_empty() {
            let entity = Object::iri(format!(
                "{}{}",
                extract::emperors::WIKIDATA_ENTITY_BASE,
                encode_id(link)
            ));
            self.add(node, &epig("wikidataEntity"), entity.clone());
            self.add(node, &SKOS.term("exactMatch"), entity);
        }
    }

    fn social_status(&mut self, node: &str, status: &str, evidence: &str) {
        if status.is_empty() {
            return;
        }
        self.check::<SocialStatus>(status);
        let status_node = STATUS.label(status);
        self.add(node, &epig("socialStatus"), Object::iri(&status_node));
        self.labelled_node(&status_node, "SocialStatus", status);
        if !evidence.is_empty() {
            self.add(&status_node, &epig("evidence"), Object::plain(evidence));
        }
    }

    fn career(&mut self, person: &str, person_id: u32, steps: &[CareerStep]) {
        let mut sorted: Vec<&CareerStep> = steps.iter().collect();
        sorted.sort_by_key(|step| step.order);

        // Steps sharing an order keep their stable-sort position and get a
        // suffixed node: `_career_1`, `_career_1_1`, ...
        let mut ties: HashMap<i64, usize> = HashMap::new();
        let mut previous: Option<String> = None;
        for step in sorted {
            let seen = ties.entry(step.order).or_default();
            let local = match *seen {
                0 => format!("{}_person_{}_career_{}", self.id, person_id, step.order),
                n => format!("{}_person_{}_career_{}_{}", self.id, person_id, step.order, n),
            };
            *seen += 1;
            let node = CAREER.term(&local);
            self.add(&node, &namespace::rdf_type(), Object::iri(epig("CareerPosition")));
            self.add(person, &epig("hasCareerPosition"), Object::iri(&node));

            self.optional(&node, &epig("position"), &step.position);
            self.optional(&node, &epig("positionNormalized"), &step.position_normalized);
            self.optional(&node, &epig("positionAbstract"), &step.position_abstract);
            if !step.position_type.is_empty() {
                self.check::<PositionType>(&step.position_type);
                self.add(&node, &epig("positionType"), Object::plain(&step.position_type));
            }
            if !step.position_description.is_empty() {
                self.add(
                    &node,
                    &DCTERMS.term("description"),
                    Object::english(&step.position_description),
                );
            }
            self.add(&node, &epig("order"), Object::integer(step.order));

            if let Some(prev) = previous.as_ref().filter(|prev| **prev != node) {
                self.add(prev, &epig("nextPosition"), Object::iri(&node));
                self.add(&node, &epig("previousPosition"), Object::iri(prev));
            }
            previous = Some(node);
        }
    }

    fn benefaction(&mut self, person: &str, person_id: u32, n: usize, benefaction: &Benefaction) {
        let node = BENEF.term(&format!("{}_person_{}_benef_{}", self.id, person_id, n));
        let inscription = self.inscription.clone();

        self.add(&node, &namespace::rdf_type(), Object::iri(epig("Benefaction")));
        self.add(person, &epig("hasBenefaction"), Object::iri(&node));
        self.add(&inscription, &epig("mentions"), Object::iri(&node));

        if !benefaction.benefaction_type.is_empty() {
            self.check::<BenefactionType>(&benefaction.benefaction_type);
            self.add(
                &node,
                &epig("benefactionType"),
                Object::plain(&benefaction.benefaction_type),
            );
        }
        self.optional(&node, &epig("object"), &benefaction.object);
        self.optional(&node, &epig("objectType"), &benefaction.object_type);
        if !benefaction.object_description.is_empty() {
            self.add(
                &node,
                &DCTERMS.term("description"),
                Object::english(&benefaction.object_description),
            );
        }
        self.optional(&node, &epig("evidence"), &benefaction.benefaction_text);
        self.optional(&node, &epig("cost"), &benefaction.cost);
        self.optional(&node, &RDFS.term("comment"), &benefaction.notes);
    }

    fn community(&mut self, idx: usize, community: &Community) {
        if community.community_name.is_empty() {
            return;
        }
        let community_id = community.community_id.unwrap_or(idx as u32);
        let node = self.community_node(community_id);
        let inscription = self.inscription.clone();

        self.add(&node, &namespace::rdf_type(), Object::iri(epig("Community")));
        self.add(&node, &RDFS.term("label"), Object::plain(&community.community_name));
        self.add(&inscription, &epig("mentions"), Object::iri(&node));

        self.optional(
            &node,
            &epig("normalizedName"),
            &community.community_name_normalized,
        );

        if !community.community_type.is_empty() {
            self.check::<CommunityType>(&community.community_type);
            let type_node = COMMTYPE.label(&community.community_type);
            self.add(&node, &epig("communityType"), Object::iri(&type_node));
            self.labelled_node(&type_node, "CommunityType", &community.community_type);
        }
        if !community.community_description.is_empty() {
            self.add(
                &node,
                &DCTERMS.term("description"),
                Object::english(&community.community_description),
            );
        }
        self.optional(&node, &epig("evidence"), &community.evidence);
    }

    fn relationship(&mut self, idx: usize, relationship: &Relationship) {
        let target = match relationship.target() {
            Ok(Some(target)) => target,
            Ok(None) => return,
            Err(AmbiguousTarget {
                person_id,
                community_id,
            }) => {
                self.diagnose(DiagnosticKind::AmbiguousTarget {
                    relationship: idx,
                    person_id,
                    community_id,
                });
                return;
            }
        };

        let source = self.person_node(relationship.source());
        let target_node = match &target {
            RelationshipTarget::Community(community_id) => self.community_node(*community_id),
            RelationshipTarget::Person(person_id) => self.person_node(*person_id),
            RelationshipTarget::AdHoc(legacy) => self.ad_hoc_person(idx, legacy),
        };

        let node = REL.term(&format!("{}_rel_{}", self.id, idx));
        let inscription = self.inscription.clone();
        let rel_type = relationship.relationship_type.as_str();
        let property = relationship.property.as_str();

        self.add(&node, &namespace::rdf_type(), Object::iri(epig("Relationship")));

        if !rel_type.is_empty() {
            self.check_relationship(rel_type, property);
            let type_node = RELTYPE.label(rel_type);
            self.add(&node, &epig("relationshipType"), Object::iri(&type_node));
            self.labelled_node(&type_node, "RelationshipType", rel_type);
        }
        self.add(&node, &epig("relationshipProperty"), Object::plain(property));
        self.add(&inscription, &epig("mentions"), Object::iri(&node));
        self.add(&node, &epig("source"), Object::iri(&source));
        self.add(&node, &epig("target"), Object::iri(&target_node));

        match (rel_type, &target) {
            ("family", RelationshipTarget::Person(_))
                if KINSHIP_EDGE_PROPERTIES.contains(&property) =>
            {
                let edge = epig(&format!("has{}", capitalize(property)));
                self.add(&source, &edge, Object::iri(&target_node));
            }
            ("affiliation", RelationshipTarget::Community(_)) => {
                self.add(&source, &epig("affiliatedWith"), Object::iri(&target_node));
            }
            _ => {}
        }

        self.optional(&node, &epig("evidence"), &relationship.property_text);
        self.optional(&node, &RDFS.term("comment"), &relationship.notes);
    }

    /// A person named only inside a legacy relationship.
    fn ad_hoc_person(&mut self, idx: usize, legacy: &LegacyPerson) -> String {
        let node = PERSON.term(&format!("{}_rel_{}", self.id, idx));
        let inscription = self.inscription.clone();

        self.add(&node, &namespace::rdf_type(), Object::iri(FOAF.term("Person")));
        self.add(&node, &FOAF.term("name"), Object::plain(&legacy.name));
        self.optional(&node, &RDFS.term("label"), &legacy.readable);
        self.emperor_identity(&node, &legacy.normalized, &legacy.link);
        self.social_status(&node, &legacy.social_status, &legacy.social_status_evidence);
        self.add(&inscription, &epig("mentions"), Object::iri(&node));
        node
    }

    fn person_node(&self, person_id: u32) -> String {
        PERSON.term(&format!("{}_person_{}", self.id, person_id))
    }

    fn community_node(&self, community_id: u32) -> String {
        COMMUNITY.term(&format!("{}_community_{}", self.id, community_id))
    }

    fn labelled_node(&mut self, node: &str, class: &str, label: &str) {
        self.add(node, &namespace::rdf_type(), Object::iri(epig(class)));
        self.add(node, &RDFS.term("label"), Object::plain(label));
    }

    fn optional(&mut self, subject: &str, predicate: &str, value: &str) {
        if !value.is_empty() {
            self.add(subject, predicate, Object::plain(value));
        }
    }

    fn add(&mut self, subject: &str, predicate: &str, object: Object) {
        if let Err(e) = self.out.graph.insert(subject, predicate, object) {
            self.diagnose(DiagnosticKind::InvalidIri {
                subject: subject.to_string(),
                message: e.to_string(),
            });
        }
    }

    fn check<V: FromStr>(&mut self, label: &str)
    where
        V::Err: Into<extract::vocab::UnknownLabel>,
    {
        if self.compiler.mode == VocabularyMode::Permissive {
            return;
        }
        if let Err(e) = label.parse::<V>() {
            let e = e.into();
            self.diagnose(DiagnosticKind::UnknownLabel {
                vocabulary: e.vocabulary,
                label: e.label,
            });
        }
    }

    fn check_relationship(&mut self, rel_type: &str, property: &str) {
        if self.compiler.mode == VocabularyMode::Permissive {
            return;
        }
        match rel_type.parse::<RelationshipType>() {
            Ok(kind) if !property.is_empty() && !kind.accepts_property(property) => {
                self.diagnose(DiagnosticKind::UnknownProperty {
                    relationship_type: rel_type.to_string(),
                    property: property.to_string(),
                })
            }
            Ok(_) => {}
            Err(e) => self.diagnose(DiagnosticKind::UnknownLabel {
                vocabulary: e.vocabulary,
                label: e.label,
            }),
        }
    }

    fn diagnose(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            edcs_id: self.edcs_id.to_string(),
            kind,
        };
        tracing::warn!(edcs_id = self.edcs_id, "{}", diagnostic);
        self.out.diagnostics.push(diagnostic);
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::{RdfFormat, serialize};

    fn compiler() -> GraphCompiler {
        GraphCompiler::new(Arc::new(EmperorTable::builtin()))
    }

    fn parse(json: &str) -> ExtractionResult {
        serde_json::from_str(json).unwrap()
    }

    fn iri(s: String) -> Object {
        Object::iri(s)
    }

    fn sample() -> Vec<ExtractionResult> {
        vec![
            parse(
                r#"{"edcs_id": "EDCS-1",
                    "persons": [
                        {"person_id": 0, "person_name": "Q(uintus) Iulius Felix",
                         "person_name_readable": "Quintus Iulius Felix",
                         "praenomen": "Quintus", "nomen": "Iulius", "cognomen": "Felix",
                         "social_status": "decurio", "gender": "male",
                         "age_at_death": 45, "has_career": true,
                         "career_path": [
                            {"position": "flamen", "order": 3},
                            {"position": "aedilis", "order": 1},
                            {"position": "duovir", "order": 2}],
                         "benefactions": [{"benefaction_type": "construction",
                                           "object": "porticum", "cost": "HS X milia"}]},
                        {"person_id": 1, "person_name": "Iulia Prima", "gender": "female"}],
                    "communities": [{"community_id": 0, "community_name": "ordo decurionum",
                                     "community_type": "ordo"}],
                    "person_relationships": [
                        {"source_person_id": 1, "target_person_id": 0,
                         "type": "family", "property": "father"},
                        {"source_person_id": 0, "target_community_id": 0,
                         "type": "affiliation", "property": "decurion"}],
                    "original_data": {"EDCS-ID": "EDCS-1", "province": "Africa proconsularis",
                                      "place": "Thugga", "dating_from": "101",
                                      "dating_to": "200.0", "inscription": "Q IVLIO"}}"#,
            ),
            parse(
                r#"{"edcs_id": "EDCS-2",
                    "persons": [{"person_id": 0, "person_name": "Titus",
                                 "social_status": "decurio"}]}"#,
            ),
        ]
    }

    #[test]
    fn output_is_byte_identical_across_runs() {
        let results = sample();
        let a = compiler().compile(&results);
        let b = compiler().compile(&results);
        for format in [
            RdfFormat::Turtle,
            RdfFormat::NTriples,
            RdfFormat::N3,
            RdfFormat::RdfXml,
            RdfFormat::JsonLd,
        ] {
            assert_eq!(
                serialize(&a.graph, format).unwrap(),
                serialize(&b.graph, format).unwrap()
            );
        }
    }

    #[test]
    fn entity_iris_are_scoped_by_inscription() {
        let graph = compiler().compile(&sample()).graph;
        let first = PERSON.term("EDCS-1_person_0");
        let second = PERSON.term("EDCS-2_person_0");
        let name = FOAF.term("name");

        assert!(graph.contains(&first, &name, &Object::plain("Q(uintus) Iulius Felix")));
        assert!(graph.contains(&second, &name, &Object::plain("Titus")));

        // Shared vocabulary node.
        let status = STATUS.label("decurio");
        assert!(graph.contains(&first, &epig("socialStatus"), &iri(status.clone())));
        assert!(graph.contains(&second, &epig("socialStatus"), &iri(status)));
    }

    #[test]
    fn career_chain_follows_order() {
        let graph = compiler().compile(&sample()).graph;
        let step = |n: u32| CAREER.term(&format!("EDCS-1_person_0_career_{}", n));

        assert!(graph.contains(&step(1), &epig("nextPosition"), &iri(step(2))));
        assert!(graph.contains(&step(2), &epig("nextPosition"), &iri(step(3))));
        assert!(graph.contains(&step(3), &epig("previousPosition"), &iri(step(2))));
        assert_eq!(graph.objects(&step(3), &epig("nextPosition")).count(), 0);
        assert!(graph.contains(&step(1), &epig("position"), &Object::plain("aedilis")));
        assert!(graph.contains(&step(3), &epig("order"), &Object::integer(3)));
    }

    #[test]
    fn tied_orders_stay_distinct_positions() {
        let results = vec![parse(
            r#"{"edcs_id": "EDCS-9",
                "persons": [{"person_id": 0, "person_name": "Sextius", "has_career": true,
                             "career_path": [{"position": "aedilis", "order": 1},
                                             {"position": "duovir", "order": 1}]}]}"#,
        )];
        let graph = compiler().compile(&results).graph;
        let first = CAREER.term("EDCS-9_person_0_career_1");
        let second = CAREER.term("EDCS-9_person_0_career_1_1");

        assert_eq!(graph.objects(&first, &epig("position")).count(), 1);
        assert!(graph.contains(&first, &epig("position"), &Object::plain("aedilis")));
        assert!(graph.contains(&second, &epig("position"), &Object::plain("duovir")));
        assert!(graph.contains(&first, &epig("nextPosition"), &iri(second.clone())));
        assert!(graph.contains(&second, &epig("previousPosition"), &iri(first.clone())));
        for node in [&first, &second] {
            assert!(!graph.contains(node, &epig("nextPosition"), &iri(node.to_string())));
        }
        assert_eq!(graph.stats().career_positions, 2);
    }

    #[test]
    fn metadata_and_place_identifier() {
        let places = PlaceMapping::from_iter([("Thugga".to_string(), "315246".to_string())]);
        let graph = compiler().with_places(places).compile(&sample()).graph;
        let inscription = BASE.term("EDCS-1");

        assert!(graph.contains(&inscription, &epig("pleiadesId"), &Object::plain("315246")));
        assert!(graph.contains(&inscription, &epig("datingFrom"), &Object::integer(101)));
        assert!(graph.contains(&inscription, &epig("datingTo"), &Object::integer(200)));
        assert!(graph.contains(
            &PROVINCE.label("Africa proconsularis"),
            &RDFS.term("label"),
            &Object::plain("Africa proconsularis")
        ));
        assert_eq!(graph.objects(&BASE.term("EDCS-2"), &epig("pleiadesId")).count(), 0);
    }

    #[test]
    fn derived_edges() {
        let graph = compiler().compile(&sample()).graph;
        let father = PERSON.term("EDCS-1_person_0");
        let child = PERSON.term("EDCS-1_person_1");
        let ordo = COMMUNITY.term("EDCS-1_community_0");

        assert!(graph.contains(&child, &epig("hasFather"), &iri(father.clone())));
        assert!(graph.contains(&father, &epig("affiliatedWith"), &iri(ordo)));
    }

    #[test]
    fn person_details() {
        let graph = compiler().compile(&sample()).graph;
        let person = PERSON.term("EDCS-1_person_0");

        assert!(graph.contains(&person, &epig("ageAtDeath"), &Object::integer(45)));
        assert!(graph.contains(&person, &epig("nomen"), &iri(NOMEN.label("Iulius"))));
        assert!(graph.contains(
            &BENEF.term("EDCS-1_person_0_benef_1"),
            &epig("cost"),
            &Object::plain("HS X milia")
        ));
        let stats = graph.stats();
        assert_eq!(stats.inscriptions, 2);
        assert_eq!(stats.persons, 3);
        assert_eq!(stats.career_positions, 3);
        assert_eq!(stats.benefactions, 1);
        assert_eq!(stats.relationships, 2);
        assert_eq!(stats.communities, 1);
    }

    #[test]
    fn unknown_gender_is_not_emitted() {
        let result = parse(
            r#"{"edcs_id": "E", "persons": [{"person_name": "X", "gender": "unknown",
                "gender_evidence": "broken"}]}"#,
        );
        let graph = compiler().compile(&[result]).graph;
        assert_eq!(graph.objects(&PERSON.term("E_person_0"), &FOAF.term("gender")).count(), 0);
    }

    #[test]
    fn targetless_and_ambiguous_relationships() {
        let result = parse(
            r#"{"edcs_id": "E",
                "persons": [{"person_id": 0, "person_name": "A"},
                            {"person_id": 1, "person_name": "B"}],
                "communities": [{"community_id": 0, "community_name": "collegium fabrum"}],
                "person_relationships": [
                    {"source_person_id": 0, "type": "family", "property": "son"},
                    {"source_person_id": 0, "target_person_id": 1, "target_community_id": 0,
                     "type": "affiliation", "property": "member"}]}"#,
        );
        let compiled = compiler().compile(&[result]);

        assert_eq!(compiled.graph.stats().relationships, 0);
        assert_eq!(compiled.diagnostics.len(), 1);
        assert!(matches!(
            compiled.diagnostics[0].kind,
            DiagnosticKind::AmbiguousTarget {
                relationship: 2,
                person_id: 1,
                community_id: 0
            }
        ));
    }

    #[test]
    fn malformed_links_are_encoded_not_dropped() {
        let result = parse(
            r#"{"edcs_id": "E", "person_name": "Unknown",
                "relationships": [{"source_person_index": 0, "type": "patronage",
                                   "property": "former-owner",
                                   "target_person_name": "M(arcus) Aurelius",
                                   "target_person_name_link": "Q 1430"}]}"#,
        );
        let compiled = compiler().compile(&[result]);
        assert!(compiled.graph.contains(
            &PERSON.term("E_rel_1"),
            &SKOS.term("exactMatch"),
            &Object::iri("http://www.wikidata.org/entity/Q%201430")
        ));
        assert!(
            !compiled
                .diagnostics
                .iter()
                .any(|d| matches!(d.kind, DiagnosticKind::InvalidIri { .. }))
        );
    }

    #[test]
    fn sentinel_persons_emit_nothing() {
        let results = vec![
            parse(r#"{"edcs_id": "E1", "persons": [{"person_name": "Parse Error"}]}"#),
            parse(r#"{"edcs_id": "E2", "person_name": "No Text", "has_career": false}"#),
        ];
        let graph = compiler().compile(&results).graph;
        assert_eq!(graph.stats().persons, 0);
        assert_eq!(graph.stats().inscriptions, 2);
    }

    #[test]
    fn legacy_scalar_and_ad_hoc_target() {
        let result = parse(
            r#"{"edcs_id": "E", "person_name": "Unknown", "social_status": "slave",
                "relationships": [{"source_person_index": 0, "type": "patronage",
                                   "property": "former-owner",
                                   "target_person_name": "M(arcus) Aurelius",
                                   "target_person_name_normalized": "Marcus Aurelius",
                                   "target_person_name_link": "Q1430"}]}"#,
        );
        let compiled = compiler().compile(&[result]);
        let graph = &compiled.graph;
        let owner = PERSON.term("E_rel_1");

        assert!(graph.contains(&PERSON.term("E_person_0"), &FOAF.term("name"), &Object::plain("Unknown")));
        assert!(graph.contains(&owner, &FOAF.term("name"), &Object::plain("M(arcus) Aurelius")));
        assert!(graph.contains(
            &owner,
            &SKOS.term("exactMatch"),
            &Object::iri("http://www.wikidata.org/entity/Q1430")
        ));
        assert!(graph.contains(&REL.term("E_rel_1"), &epig("target"), &iri(owner)));
        assert!(compiled.diagnostics.is_empty(), "{:?}", compiled.diagnostics);
    }

    #[test]
    fn vocabulary_diagnostics_never_change_triples() {
        let result = parse(
            r#"{"edcs_id": "E", "persons": [{"person_name": "A", "social_status": "wizard",
                "person_name_normalized": "Napoleon",
                "has_career": true, "career_path": [{"position": "x", "position_type": "magic",
                                                      "order": 1}]}],
                "person_relationships": [{"source_person_id": 0, "target_person_id": 0,
                                          "type": "family", "property": "godfather"}]}"#,
        );
        let warn = compiler().compile(std::slice::from_ref(&result));
        let permissive = compiler()
            .with_mode(VocabularyMode::Permissive)
            .compile(std::slice::from_ref(&result));

        assert_eq!(warn.graph, permissive.graph);
        assert!(permissive.diagnostics.is_empty());

        let kinds: Vec<_> = warn.diagnostics.iter().map(|d| &d.kind).collect();
        assert_eq!(kinds.len(), 4);
        assert!(kinds.contains(&&DiagnosticKind::UnknownEmperor {
            name: "Napoleon".to_string()
        }));
        assert!(kinds.contains(&&DiagnosticKind::UnknownProperty {
            relationship_type: "family".to_string(),
            property: "godfather".to_string()
        }));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("father"), "Father");
        assert_eq!(capitalize(""), "");
    }
}

//! The fixed ontology: every IRI the compiler mints starts with one of these.

use urlencoding::encode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: &'static str,
    pub iri: &'static str,
}

impl Namespace {
    const fn new(prefix: &'static str, iri: &'static str) -> Self {
        Self { prefix, iri }
    }

    /// `local` appended as-is. Callers pass ontology terms or pre-encoded parts.
    pub fn term(&self, local: &str) -> String {
        format!("{}{}", self.iri, local)
    }

    /// Node for a vocabulary label. Identical labels give identical IRIs.
    pub fn label(&self, label: &str) -> String {
        format!("{}{}", self.iri, encode(label))
    }
}

pub const BASE: Namespace = Namespace::new("base", "http://example.org/inscription/");
pub const EPIG: Namespace = Namespace::new("epig", "http://example.org/epigraphy/");
pub const PERSON: Namespace = Namespace::new("person", "http://example.org/person/");
pub const CAREER: Namespace = Namespace::new("career", "http://example.org/career/");
pub const REL: Namespace = Namespace::new("rel", "http://example.org/relationship/");
pub const STATUS: Namespace = Namespace::new("status", "http://example.org/status/");
pub const BENEF: Namespace = Namespace::new("benef", "http://example.org/benefaction/");
pub const PLACE: Namespace = Namespace::new("place", "http://example.org/place/");
pub const PROVINCE: Namespace = Namespace::new("province", "http://example.org/province/");
pub const RELTYPE: Namespace =
    Namespace::new("reltype", "http://example.org/relationship-type/");
pub const COMMUNITY: Namespace = Namespace::new("community", "http://example.org/community/");
pub const COMMTYPE: Namespace =
    Namespace::new("commtype", "http://example.org/community-type/");
pub const PRAENOMEN: Namespace = Namespace::new("praenomen", "http://example.org/praenomen/");
pub const NOMEN: Namespace = Namespace::new("nomen", "http://example.org/nomen/");
pub const COGNOMEN: Namespace = Namespace::new("cognomen", "http://example.org/cognomen/");

pub const RDF: Namespace =
    Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const RDFS: Namespace = Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
pub const XSD: Namespace = Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#");
pub const DCTERMS: Namespace = Namespace::new("dcterms", "http://purl.org/dc/terms/");
pub const FOAF: Namespace = Namespace::new("foaf", "http://xmlns.com/foaf/0.1/");
pub const SKOS: Namespace = Namespace::new("skos", "http://www.w3.org/2004/02/skos/core#");

/// Prefix bindings, in the order they are written.
pub const PREFIXES: &[Namespace] = &[
    BASE, EPIG, PERSON, CAREER, REL, STATUS, BENEF, PLACE, PROVINCE, RELTYPE, COMMUNITY,
    COMMTYPE, PRAENOMEN, NOMEN, COGNOMEN, RDF, RDFS, XSD, DCTERMS, FOAF, SKOS,
];

pub fn rdf_type() -> String {
    RDF.term("type")
}

pub fn epig(local: &str) -> String {
    EPIG.term(local)
}

/// Inscription ids and other free-form parts of entity IRIs.
pub fn encode_id(id: &str) -> String {
    encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_percent_encoded() {
        assert_eq!(
            PROVINCE.label("Africa proconsularis"),
            "http://example.org/province/Africa%20proconsularis"
        );
        assert_eq!(STATUS.label("freedman"), STATUS.label("freedman"));
    }

    #[test]
    fn prefixes_are_unique() {
        for (i, a) in PREFIXES.iter().enumerate() {
            for b in &PREFIXES[i + 1..] {
                assert_ne!(a.prefix, b.prefix);
                assert_ne!(a.iri, b.iri);
            }
        }
    }
}

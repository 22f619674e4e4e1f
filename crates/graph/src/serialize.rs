//! Graph writers. Turtle, N-Triples, N3 and RDF/XML go through `oxrdfio`;
//! JSON-LD is written in expanded form with `serde_json`.

use oxrdf::{IriParseError, Term, vocab::{rdf, xsd}};
use oxrdfio::RdfSerializer;
use serde_json::{Map, Value, json};
use std::str::FromStr;
use thiserror::Error;

use crate::namespace::PREFIXES;
use crate::term::{Graph, Statement};

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("invalid prefix IRI: {0}")]
    Prefix(#[from] IriParseError),

    #[error("RDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON-LD encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serializer produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RdfFormat {
    #[default]
    Turtle,
    NTriples,
    N3,
    RdfXml,
    JsonLd,
}

#[derive(Debug, Error)]
#[error("unknown RDF format `{0}` (expected turtle, ntriples, n3, xml or jsonld)")]
pub struct UnknownFormat(String);

impl RdfFormat {
    pub fn extension(self) -> &'static str {
        match self {
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
            RdfFormat::N3 => "n3",
            RdfFormat::RdfXml => "rdf",
            RdfFormat::JsonLd => "jsonld",
        }
    }

    fn syntax(self) -> Option<oxrdfio::RdfFormat> {
        match self {
            RdfFormat::Turtle => Some(oxrdfio::RdfFormat::Turtle),
            RdfFormat::NTriples => Some(oxrdfio::RdfFormat::NTriples),
            RdfFormat::N3 => Some(oxrdfio::RdfFormat::N3),
            RdfFormat::RdfXml => Some(oxrdfio::RdfFormat::RdfXml),
            RdfFormat::JsonLd => None,
        }
    }
}

impl FromStr for RdfFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(RdfFormat::NTriples),
            "n3" => Ok(RdfFormat::N3),
            "xml" | "rdfxml" | "rdf/xml" | "rdf" => Ok(RdfFormat::RdfXml),
            "jsonld" | "json-ld" => Ok(RdfFormat::JsonLd),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

pub fn serialize(graph: &Graph, format: RdfFormat) -> Result<String, SerializeError> {
    match format.syntax() {
        Some(syntax) => write_with(graph, syntax),
        None => json_ld(graph),
    }
}

fn write_with(graph: &Graph, syntax: oxrdfio::RdfFormat) -> Result<String, SerializeError> {
    let mut serializer = RdfSerializer::from_format(syntax);
    for ns in PREFIXES {
        serializer = serializer.with_prefix(ns.prefix, ns.iri)?;
    }

    let mut writer = serializer.for_writer(Vec::new());
    for statement in graph.iter() {
        writer.serialize_quad(statement.as_quad())?;
    }
    Ok(String::from_utf8(writer.finish()?)?)
}

/// Expanded JSON-LD: one node object per subject, all values as arrays.
pub fn json_ld(graph: &Graph) -> Result<String, SerializeError> {
    let statements: Vec<&Statement> = graph.iter().collect();

    let mut nodes = Vec::new();
    for subject_group in statements.chunk_by(|a, b| a.subject == b.subject) {
        let mut node = Map::new();
        node.insert("@id".to_string(), json!(subject_group[0].subject.as_str()));

        for s in subject_group {
            if s.predicate.as_ref() == rdf::TYPE {
                if let Term::NamedNode(class) = &s.object {
                    push(&mut node, "@type", json!(class.as_str()));
                    continue;
                }
            }
            push(&mut node, s.predicate.as_str(), json_ld_object(&s.object));
        }
        nodes.push(Value::Object(node));
    }

    Ok(serde_json::to_string_pretty(&Value::Array(nodes))?)
}

fn push(node: &mut Map<String, Value>, key: &str, value: Value) {
    match node
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(values) => values.push(value),
        other => *other = Value::Array(vec![value]),
    }
}

fn json_ld_object(term: &Term) -> Value {
    match term {
        Term::NamedNode(node) => json!({ "@id": node.as_str() }),
        Term::Literal(literal) => match literal.language() {
            Some(lang) => json!({ "@value": literal.value(), "@language": lang }),
            None if literal.datatype() == xsd::STRING => json!({ "@value": literal.value() }),
            None => json!({ "@value": literal.value(), "@type": literal.datatype().as_str() }),
        },
        other => json!({ "@id": other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{self, BASE, EPIG, FOAF, PERSON, RDFS};
    use crate::term::Object;
    use oxrdfio::RdfParser;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        let person = PERSON.term("EDCS-1_person_0");
        let inscription = BASE.term("EDCS-1");
        let rdf_type = namespace::rdf_type();
        let triples = [
            (&person, rdf_type, Object::iri(FOAF.term("Person"))),
            (&person, FOAF.term("name"), Object::plain("C(aius) \"Felix\"")),
            (&person, EPIG.term("ageAtDeath"), Object::integer(30)),
            (&person, RDFS.term("label"), Object::english("Gaius\nFelix")),
            (&inscription, EPIG.term("mentions"), Object::iri(&person)),
            (
                &inscription,
                EPIG.term("mentions"),
                Object::iri(PERSON.term("EDCS-1_person_1")),
            ),
        ];
        for (s, p, o) in triples {
            graph.insert(s, &p, o).unwrap();
        }
        graph
    }

    /// Parse serialized output back and check every statement survived.
    fn reparses(format: RdfFormat) {
        let graph = sample();
        let text = serialize(&graph, format).unwrap();
        let syntax = format.syntax().unwrap();
        let quads: Vec<_> = RdfParser::from_format(syntax)
            .for_reader(text.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(quads.len(), graph.len());
        for statement in graph.iter() {
            assert!(
                quads.iter().any(|q| q.subject.to_string() == statement.subject.to_string()
                    && q.predicate == statement.predicate
                    && q.object == statement.object),
                "{:?} lost in {:?}",
                statement,
                format
            );
        }
    }

    #[test]
    fn format_names() {
        assert_eq!("ttl".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("json-ld".parse::<RdfFormat>().unwrap(), RdfFormat::JsonLd);
        assert_eq!("xml".parse::<RdfFormat>().unwrap(), RdfFormat::RdfXml);
        assert_eq!("N3".parse::<RdfFormat>().unwrap(), RdfFormat::N3);
        assert_eq!(RdfFormat::NTriples.extension(), "nt");
        assert_eq!(RdfFormat::RdfXml.extension(), "rdf");
        assert!("trix".parse::<RdfFormat>().is_err());
    }

    #[test]
    fn ntriples_lines() {
        let nt = serialize(&sample(), RdfFormat::NTriples).unwrap();
        assert_eq!(nt.lines().count(), 6);
        assert!(nt.contains("\"30\"^^<http://www.w3.org/2001/XMLSchema#integer>"));
        assert!(nt.contains("\"Gaius\\nFelix\"@en"));
    }

    #[test]
    fn turtle_uses_prefixes() {
        let ttl = serialize(&sample(), RdfFormat::Turtle).unwrap();
        assert!(ttl.contains("@prefix person: <http://example.org/person/>"));
        assert!(ttl.contains("foaf:Person"));
        assert!(!ttl.contains("<http://example.org/person/EDCS-1_person_0>"));
    }

    #[test]
    fn every_syntax_reparses() {
        for format in [
            RdfFormat::Turtle,
            RdfFormat::NTriples,
            RdfFormat::N3,
            RdfFormat::RdfXml,
        ] {
            reparses(format);
        }
    }

    #[test]
    fn json_ld_nodes() {
        let doc: Value = serde_json::from_str(&json_ld(&sample()).unwrap()).unwrap();
        let nodes = doc.as_array().unwrap();
        assert_eq!(nodes.len(), 2);

        let person = nodes
            .iter()
            .find(|n| n["@id"] == PERSON.term("EDCS-1_person_0").as_str())
            .unwrap();
        assert_eq!(person["@type"][0], FOAF.term("Person").as_str());
        assert_eq!(
            person[EPIG.term("ageAtDeath").as_str()][0]["@type"],
            xsd::INTEGER.as_str()
        );
        assert_eq!(person[RDFS.term("label").as_str()][0]["@language"], "en");
        assert!(person[FOAF.term("name").as_str()][0].get("@type").is_none());
    }
}

use oxrdf::{IriParseError, Literal, NamedNode, QuadRef, Term, vocab::rdf};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::namespace::{EPIG, FOAF};

/// Object of a statement before its IRI is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Iri(String),
    Literal(Literal),
}

impl Object {
    pub fn iri(iri: impl Into<String>) -> Self {
        Object::Iri(iri.into())
    }

    pub fn plain(lexical: impl Into<String>) -> Self {
        Object::Literal(Literal::new_simple_literal(lexical))
    }

    pub fn english(lexical: impl Into<String>) -> Self {
        Object::Literal(Literal::new_language_tagged_literal_unchecked(lexical, "en"))
    }

    /// `xsd:integer`
    pub fn integer(value: i64) -> Self {
        Object::Literal(Literal::from(value))
    }

    fn into_term(self) -> Result<Term, IriParseError> {
        Ok(match self {
            Object::Iri(iri) => NamedNode::new(iri)?.into(),
            Object::Literal(literal) => literal.into(),
        })
    }
}

/// Subjects are always IRIs; the compiler never mints blank nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: NamedNode,
    pub predicate: NamedNode,
    pub object: Term,
}

impl Statement {
    pub fn as_quad(&self) -> QuadRef<'_> {
        QuadRef::new(
            self.subject.as_ref(),
            self.predicate.as_ref(),
            self.object.as_ref(),
            oxrdf::GraphNameRef::DefaultGraph,
        )
    }
}

/// (subject IRI, predicate IRI, object in N-Triples form)
type Key = (String, String, String);

/// A set of statements. Iteration order is canonical (subject, predicate,
/// object), so serializing the same set always gives the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    statements: BTreeMap<Key, Statement>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub triples: usize,
    pub persons: usize,
    pub communities: usize,
    pub inscriptions: usize,
    pub career_positions: usize,
    pub benefactions: usize,
    pub relationships: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Ok(false)` when the statement was already present.
    pub fn insert(
        &mut self,
        subject: &str,
        predicate: &str,
        object: Object,
    ) -> Result<bool, IriParseError> {
        let statement = Statement {
            subject: NamedNode::new(subject)?,
            predicate: NamedNode::new(predicate)?,
            object: object.into_term()?,
        };
        let key = (
            subject.to_string(),
            predicate.to_string(),
            statement.object.to_string(),
        );
        match self.statements.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(statement);
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.values()
    }

    pub fn contains(&self, subject: &str, predicate: &str, object: &Object) -> bool {
        let Ok(term) = object.clone().into_term() else {
            return false;
        };
        self.statements.contains_key(&(
            subject.to_string(),
            predicate.to_string(),
            term.to_string(),
        ))
    }

    /// Every object of `subject predicate ?`.
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.statements
            .iter()
            .filter(move |((s, p, _), _)| s == subject && p == predicate)
            .map(|(_, statement)| &statement.object)
    }

    pub fn subjects_of_type(&self, class: &str) -> usize {
        let class = format!("<{}>", class);
        self.statements
            .keys()
            .filter(|(_, p, o)| p == rdf::TYPE.as_str() && *o == class)
            .count()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            triples: self.len(),
            persons: self.subjects_of_type(&FOAF.term("Person")),
            communities: self.subjects_of_type(&EPIG.term("Community")),
            inscriptions: self.subjects_of_type(&EPIG.term("Inscription")),
            career_positions: self.subjects_of_type(&EPIG.term("CareerPosition")),
            benefactions: self.subjects_of_type(&EPIG.term("Benefaction")),
            relationships: self.subjects_of_type(&EPIG.term("Relationship")),
        }
    }
}

use extract::schema::is_sentinel_name;
use extract::{ExtractionResult, Person};

/// Which schema generation a result's persons came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPersons<'a> {
    /// `persons`, ids as given (list position when missing).
    Current(&'a [Person]),
    /// `main_persons`, ids reassigned to list position.
    Legacy(&'a [Person]),
    /// One person rebuilt from the top-level scalar fields.
    SyntheticSingle(Person),
    Empty,
}

impl<'a> ResolvedPersons<'a> {
    pub fn resolve(result: &'a ExtractionResult) -> Self {
        if !result.persons.is_empty() {
            return ResolvedPersons::Current(&result.persons);
        }
        if let Some(main) = result.main_persons.as_deref().filter(|m| !m.is_empty()) {
            return ResolvedPersons::Legacy(main);
        }
        match result.legacy_scalar_person() {
            Some(person) if !is_sentinel_name(&person.person_name) => {
                ResolvedPersons::SyntheticSingle(person)
            }
            _ => ResolvedPersons::Empty,
        }
    }

    /// `(person_id, person)` pairs in list order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (u32, &Person)> + '_> {
        match self {
            ResolvedPersons::Current(persons) => Box::new(
                persons
                    .iter()
                    .enumerate()
                    .map(|(idx, p)| (p.person_id.unwrap_or(idx as u32), p)),
            ),
            ResolvedPersons::Legacy(persons) => Box::new(
                persons
                    .iter()
                    .enumerate()
                    .map(|(idx, p)| (idx as u32, p)),
            ),
            ResolvedPersons::SyntheticSingle(person) => Box::new(std::iter::once((0, person))),
            ResolvedPersons::Empty => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: Option<u32>, name: &str) -> Person {
        Person {
            person_id: id,
            person_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn current_persons_win() {
        let result = ExtractionResult {
            persons: vec![person(Some(3), "A"), person(None, "B")],
            main_persons: Some(vec![person(None, "ignored")]),
            ..Default::default()
        };
        let resolved = ResolvedPersons::resolve(&result);
        let ids: Vec<_> = resolved.iter().map(|(id, p)| (id, p.person_name.as_str())).collect();
        assert_eq!(ids, [(3, "A"), (1, "B")]);
    }

    #[test]
    fn legacy_ids_follow_list_position() {
        let result = ExtractionResult {
            main_persons: Some(vec![person(Some(7), "A"), person(Some(7), "B")]),
            ..Default::default()
        };
        let resolved = ResolvedPersons::resolve(&result);
        assert!(matches!(resolved, ResolvedPersons::Legacy(_)));
        let ids: Vec<_> = resolved.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, [0, 1]);
    }

    #[test]
    fn scalar_fallback_accepts_unknown_but_not_sentinels() {
        let unknown = ExtractionResult {
            person_name: Some("Unknown".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ResolvedPersons::resolve(&unknown),
            ResolvedPersons::SyntheticSingle(_)
        ));

        for sentinel in ["Parse Error", "Error", "No Text", ""] {
            let result = ExtractionResult {
                person_name: Some(sentinel.to_string()),
                ..Default::default()
            };
            assert_eq!(ResolvedPersons::resolve(&result), ResolvedPersons::Empty);
        }
        assert_eq!(
            ResolvedPersons::resolve(&ExtractionResult::default()),
            ResolvedPersons::Empty
        );
    }
}

use crate::models::patient::{Patient, PatientAttributes};

/// Every stored record keyed by id, in insertion order.
///
/// Ids are unique. Re-inserting an existing id replaces its attributes in
/// place without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientCollection {
    entries: Vec<(String, PatientAttributes)>,
}

impl PatientCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&PatientAttributes> {
        self.position(id).map(|i| &self.entries[i].1)
    }

    /// Look up a record and pair it with its id.
    pub fn patient(&self, id: &str) -> Option<Patient> {
        self.get(id).map(|attributes| Patient {
            id: id.to_string(),
            attributes: attributes.clone(),
        })
    }

    /// Insert or replace. Returns the previous attributes if `id` was present.
    pub fn insert(&mut self, id: String, attributes: PatientAttributes) -> Option<PatientAttributes> {
        match self.position(&id) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, attributes)),
            None => {
                self.entries.push((id, attributes));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatientAttributes)> {
        self.entries.iter().map(|(id, attrs)| (id.as_str(), attrs))
    }

    /// All records with their ids, in collection order.
    pub fn patients(&self) -> Vec<Patient> {
        self.entries
            .iter()
            .map(|(id, attributes)| Patient {
                id: id.clone(),
                attributes: attributes.clone(),
            })
            .collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == id)
    }
}

impl FromIterator<(String, PatientAttributes)> for PatientCollection {
    fn from_iter<I: IntoIterator<Item = (String, PatientAttributes)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (id, attributes) in iter {
            collection.insert(id, attributes);
        }
        collection
    }
}

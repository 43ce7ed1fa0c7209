use serde::{Deserialize, Serialize};

use super::traits::{self, Trait};

/// A discovered trait value and the item it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitValue {
    pub value: String,
    pub source_reference: String,
}

/// Per-run trait slots with first-found-wins semantics.
///
/// Once a slot is filled it is never replaced. Items are expected in
/// processing order (posts before comments, each in API order), so the
/// first mention seen is the one that sticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitState {
    pub age: Option<TraitValue>,
    pub location: Option<TraitValue>,
    pub occupation: Option<TraitValue>,
}

impl TraitState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: Trait) -> Option<&TraitValue> {
        self.slot(kind).as_ref()
    }

    pub fn is_resolved(&self, kind: Trait) -> bool {
        self.get(kind).is_some()
    }

    pub fn is_complete(&self) -> bool {
        Trait::ALL.iter().all(|kind| self.is_resolved(*kind))
    }

    /// Scan one fragment for every unresolved trait.
    ///
    /// Returns the traits that were resolved by this call.
    pub fn consider(&mut self, text: &str, reference: &str) -> Vec<Trait> {
        let mut resolved = Vec::new();

        for rule in traits::rules() {
            let slot = self.slot_mut(rule.kind);
            if slot.is_some() {
                continue;
            }
            if let Some(value) = rule.apply(text) {
                *slot = Some(TraitValue {
                    value,
                    source_reference: reference.to_string(),
                });
                resolved.push(rule.kind);
            }
        }

        resolved
    }

    fn slot(&self, kind: Trait) -> &Option<TraitValue> {
        match kind {
            Trait::Age => &self.age,
            Trait::Location => &self.location,
            Trait::Occupation => &self.occupation,
        }
    }

    fn slot_mut(&mut self, kind: Trait) -> &mut Option<TraitValue> {
        match kind {
            Trait::Age => &mut self.age,
            Trait::Location => &mut self.location,
            Trait::Occupation => &mut self.occupation,
        }
    }
}

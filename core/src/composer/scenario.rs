use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::LabError;

pub const DEFAULT_SCENARIO_FLAGS: [(&str, bool); 4] = [
    ("new_recipient", true),
    ("high_velocity", true),
    ("replay_attempt", false),
    ("contract_param_tamper", false),
];

/// Named boolean toggles in stable display order.
///
/// The key set is fixed at construction; toggling or setting never adds or
/// removes keys, so the rendered toggle list is always exactly `iter()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFlags {
    entries: Vec<(String, bool)>,
}

impl Default for ScenarioFlags {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ScenarioFlags {
    pub fn with_defaults() -> Self {
        Self::from_pairs(DEFAULT_SCENARIO_FLAGS.iter().map(|(k, v)| (k.to_string(), *v)))
    }

    /// Duplicate names keep their first position and take the last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, bool)>) -> Self {
        let mut entries: Vec<(String, bool)> = Vec::new();
        for (name, value) in pairs {
            match entries.iter_mut().find(|(k, _)| *k == name) {
                Some(slot) => slot.1 = value,
                None => entries.push((name, value)),
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    /// Flips one flag and returns its new value.
    pub fn toggle(&mut self, name: &str) -> Result<bool, LabError> {
        let slot = self.slot_mut(name)?;
        *slot = !*slot;
        Ok(*slot)
    }

    pub fn set(&mut self, name: &str, value: bool) -> Result<(), LabError> {
        *self.slot_mut(name)? = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut bool, LabError> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
            .ok_or_else(|| LabError::UnknownScenarioFlag(name.to_string()))
    }
}

impl Serialize for ScenarioFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_changes_only_the_named_flag() {
        let mut flags = ScenarioFlags::with_defaults();
        let before: Vec<(String, bool)> = flags.iter().map(|(k, v)| (k.to_string(), v)).collect();

        for (idx, (name, value)) in before.iter().enumerate() {
            assert_eq!(flags.toggle(name).unwrap(), !value);
            for (j, (other, other_value)) in before.iter().enumerate() {
                let expected = if j == idx { !other_value } else { *other_value };
                assert_eq!(flags.get(other), Some(expected));
            }
            flags.toggle(name).unwrap();
        }
    }

    #[test]
    fn order_is_stable_across_toggles() {
        let mut flags = ScenarioFlags::with_defaults();
        flags.toggle("replay_attempt").unwrap();
        flags.set("new_recipient", false).unwrap();
        let names: Vec<&str> = flags.names().collect();
        assert_eq!(
            names,
            ["new_recipient", "high_velocity", "replay_attempt", "contract_param_tamper"]
        );
    }

    #[test]
    fn unknown_flag_is_rejected_without_inserting() {
        let mut flags = ScenarioFlags::with_defaults();
        assert!(matches!(
            flags.toggle("sanctioned_peer"),
            Err(LabError::UnknownScenarioFlag(ref n)) if n == "sanctioned_peer"
        ));
        assert_eq!(flags.len(), 4);
        assert_eq!(flags.get("sanctioned_peer"), None);
    }

    #[test]
    fn from_pairs_dedupes_in_first_position() {
        let flags = ScenarioFlags::from_pairs([
            ("b".to_string(), false),
            ("a".to_string(), true),
            ("b".to_string(), true),
        ]);
        let entries: Vec<(&str, bool)> = flags.iter().collect();
        assert_eq!(entries, [("b", true), ("a", true)]);
    }

    #[test]
    fn serializes_as_object_in_display_order() {
        let flags = ScenarioFlags::with_defaults();
        let s = serde_json::to_string(&flags).unwrap();
        assert_eq!(
            s,
            r#"{"new_recipient":true,"high_velocity":true,"replay_attempt":false,"contract_param_tamper":false}"#
        );
    }
}

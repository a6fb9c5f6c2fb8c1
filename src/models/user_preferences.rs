use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::FilterCriteria;
use crate::error::{AppError, AppResult};

/// Stored listing preferences for a single user
///
/// `None` means the user has no preference for that attribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreference {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub max_cost: Option<f64>,
    #[serde(default)]
    pub min_roi: Option<f64>,
}

impl UserPreference {
    pub fn new(area: Option<&str>, max_cost: Option<f64>, min_roi: Option<f64>) -> Self {
        Self {
            area: area.map(str::to_string),
            max_cost,
            min_roi,
        }
    }

    /// Builds the filter criteria equivalent to this preference
    ///
    /// A blank area counts as no area preference.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            min_roi: self.min_roi,
            area: self
                .area
                .as_ref()
                .filter(|area| !area.trim().is_empty())
                .cloned(),
            max_cost: self.max_cost,
        }
    }
}

/// Preferences keyed by user id, fixed for the lifetime of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PreferenceBook {
    users: HashMap<u64, UserPreference>,
}

impl PreferenceBook {
    pub fn new(users: HashMap<u64, UserPreference>) -> Self {
        Self { users }
    }

    /// The preference profiles shipped with the service
    pub fn builtin() -> Self {
        let users = [
            (101, UserPreference::new(Some("Business Bay"), Some(1_600_000.0), Some(0.07))),
            (102, UserPreference::new(Some("Downtown Dubai"), Some(6_000_000.0), Some(0.04))),
            (103, UserPreference::new(Some("Arabian Ranches"), Some(3_500_000.0), Some(0.05))),
            // Area-agnostic
            (104, UserPreference::new(None, Some(1_000_000.0), Some(0.07))),
            (105, UserPreference::new(Some("JLT"), Some(2_500_000.0), Some(0.07))),
            (106, UserPreference::new(Some("Business Bay"), None, Some(0.06))),
            (107, UserPreference::new(None, None, None)),
        ];

        Self {
            users: users.into_iter().collect(),
        }
    }

    /// Loads preferences from a JSON object keyed by user id
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> AppResult<Self> {
        let book: PreferenceBook = serde_json::from_reader(reader)?;
        tracing::debug!(users = book.len(), "Loaded preference book");
        Ok(book)
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    pub fn get(&self, user_id: u64) -> Option<&UserPreference> {
        self.users.get(&user_id)
    }

    /// Like `get`, but a miss is reported as `AppError::UnknownUser`
    pub fn lookup(&self, user_id: u64) -> AppResult<&UserPreference> {
        self.get(user_id).ok_or(AppError::UnknownUser(user_id))
    }

    /// User ids in ascending order
    pub fn user_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.users.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_book_has_seven_users() {
        let book = PreferenceBook::builtin();
        assert_eq!(book.user_ids(), vec![101, 102, 103, 104, 105, 106, 107]);
    }

    #[test]
    fn test_preference_to_criteria() {
        let book = PreferenceBook::builtin();
        let criteria = book.get(106).unwrap().criteria();

        assert_eq!(criteria.area.as_deref(), Some("Business Bay"));
        assert_eq!(criteria.max_cost, None);
        assert_eq!(criteria.min_roi, Some(0.06));
    }

    #[test]
    fn test_all_none_preference_is_unconstrained() {
        let book = PreferenceBook::builtin();
        assert!(book.get(107).unwrap().criteria().is_unconstrained());
    }

    #[test]
    fn test_blank_area_is_no_preference() {
        let json = r#"{"1": {"area": "", "max_cost": null, "min_roi": null}}"#;
        let book = PreferenceBook::from_json_reader(json.as_bytes()).unwrap();
        assert!(book.get(1).unwrap().criteria().is_unconstrained());

        let spaces = UserPreference::new(Some("  "), Some(900_000.0), None);
        assert_eq!(spaces.criteria(), FilterCriteria::any().with_max_cost(900_000.0));
    }

    #[test]
    fn test_lookup_unknown_user() {
        let book = PreferenceBook::builtin();
        assert!(matches!(book.lookup(999), Err(AppError::UnknownUser(999))));
    }

    #[test]
    fn test_from_json_reader() {
        let json = r#"{
            "201": {"area": "Dubai Marina", "max_cost": 2500000.0, "min_roi": null},
            "202": {"min_roi": 0.05}
        }"#;

        let book = PreferenceBook::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(book.user_ids(), vec![201, 202]);
        assert_eq!(book.get(201).unwrap().area.as_deref(), Some("Dubai Marina"));
        assert_eq!(book.get(202).unwrap().area, None);
        assert_eq!(book.get(202).unwrap().min_roi, Some(0.05));
    }

    #[test]
    fn test_from_json_reader_rejects_bad_key() {
        let json = r#"{"not-a-number": {}}"#;
        assert!(matches!(
            PreferenceBook::from_json_reader(json.as_bytes()),
            Err(AppError::Json(_))
        ));
    }
}

use std::collections::BTreeMap;

use crate::domain::entities::record::EmployeeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlaceholderToken {
    Name,
    Id,
    Occupation,
    Country,
    Age,
}

impl PlaceholderToken {
    pub const ALL: [PlaceholderToken; 5] = [
        PlaceholderToken::Name,
        PlaceholderToken::Id,
        PlaceholderToken::Occupation,
        PlaceholderToken::Country,
        PlaceholderToken::Age,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceholderToken::Name => "[Placeholder for Name]",
            PlaceholderToken::Id => "[Placeholder for ID]",
            PlaceholderToken::Occupation => "[Placeholder for Occupation]",
            PlaceholderToken::Country => "[Placeholder for Country]",
            PlaceholderToken::Age => "[Placeholder for Age]",
        }
    }

    pub fn field(self, record: &EmployeeRecord) -> &str {
        match self {
            PlaceholderToken::Name => &record.name,
            PlaceholderToken::Id => &record.id,
            PlaceholderToken::Occupation => &record.occupation,
            PlaceholderToken::Country => &record.country,
            PlaceholderToken::Age => &record.age,
        }
    }
}

impl std::fmt::Display for PlaceholderToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token to replacement text for a single update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMap {
    entries: BTreeMap<PlaceholderToken, String>,
}

impl SubstitutionMap {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        let entries = PlaceholderToken::ALL
            .iter()
            .map(|token| (*token, token.field(record).to_string()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, token: PlaceholderToken) -> Option<&str> {
        self.entries.get(&token).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlaceholderToken, &str)> {
        self.entries
            .iter()
            .map(|(token, value)| (*token, value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> EmployeeRecord {
        EmployeeRecord {
            id: "E100".to_string(),
            name: "Jane Doe".to_string(),
            occupation: "Engineer".to_string(),
            country: "Canada".to_string(),
            age: "29".to_string(),
        }
    }

    #[test]
    fn tokens_are_distinct_literals() {
        for (pos, token) in PlaceholderToken::ALL.iter().enumerate() {
            for other in &PlaceholderToken::ALL[pos + 1..] {
                assert!(!token.as_str().contains(other.as_str()));
            }
        }
    }

    #[test]
    fn substitution_map_covers_every_token() {
        let map = SubstitutionMap::from_record(&jane());

        assert_eq!(map.iter().count(), 5);
        assert_eq!(map.get(PlaceholderToken::Id), Some("E100"));
        assert_eq!(map.get(PlaceholderToken::Name), Some("Jane Doe"));
        assert_eq!(map.get(PlaceholderToken::Occupation), Some("Engineer"));
        assert_eq!(map.get(PlaceholderToken::Country), Some("Canada"));
        assert_eq!(map.get(PlaceholderToken::Age), Some("29"));
    }

    #[test]
    fn display_matches_literal() {
        assert_eq!(PlaceholderToken::Id.to_string(), "[Placeholder for ID]");
    }
}

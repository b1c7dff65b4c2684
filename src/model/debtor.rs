use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtorInfo {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

impl DebtorInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against the full name or phone number
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.full_name().to_lowercase().contains(&needle)
            || self.phone_number.to_lowercase().contains(&needle)
    }
}

/// Debtor ids are used as file names, so only letters, digits, `-` and `_`
/// are accepted
pub fn is_valid_debtor_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

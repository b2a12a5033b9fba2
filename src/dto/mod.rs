pub mod admin_dto;
pub mod submit_dto;

use serde::{Deserialize, Deserializer};

// Custom deserializer to trim strings and convert empty strings to None
pub(crate) fn trim_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

// Same idea for required strings: a missing or blank value becomes an empty
// string so the length validators report it instead of a serde error.
pub(crate) fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: String = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

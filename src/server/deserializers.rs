use serde::{Deserialize, Deserializer};

// query strings arrive as text; anything that does not parse as a page number
// falls back to the first page instead of failing the request
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.parse::<usize>().ok()).unwrap_or(1))
}

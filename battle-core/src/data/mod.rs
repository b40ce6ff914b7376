//! Static game data: species, moves, items and abilities keyed by id.

pub mod abilities;
pub mod items;
pub mod moves;
pub mod species;
pub mod types;

#[cfg(test)]
mod tests;

/// Lowercase alphanumeric id, e.g. `"Choice Band"` -> `"choiceband"`.
pub fn to_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

use crate::feed::classify::normalize_tag;
use crate::feed::CategoryDefinition;

/// A category filter pill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill {
    pub id: String,
    pub label: String,
    pub active: bool,
}

/// Render the pill row, marking the pill whose id matches `active`.
pub fn render_categories(definitions: &[CategoryDefinition], active: &str) -> Vec<Pill> {
    let active = normalize_tag(active);
    definitions
        .iter()
        .map(|def| Pill {
            id: def.id.clone(),
            label: def.name.clone(),
            active: normalize_tag(&def.id) == active,
        })
        .collect()
}

/// Index of the active pill, if any.
pub fn active_index(pills: &[Pill]) -> Option<usize> {
    pills.iter().position(|p| p.active)
}

use super::key::{Family, ThresholdKey};
use crate::error::CalidadError;
use serde::{Deserialize, Serialize};

/// Threshold columns that belong to one standard/category, e.g. the lower
/// and upper columns of `eca_2017_3d1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardGroup {
    /// Column name without bound prefix (`eca_2017_3d1`).
    pub id: String,
    /// Friendly name for selection lists (`ECA 2017 3D1`).
    pub label: String,
    /// Member column names, in sheet order.
    pub columns: Vec<String>,
}

/// Bucket threshold columns by standard/category.
///
/// Groups are returned in the order their first column appears, so the
/// same sheet always yields the same listing. Groundwater reference
/// columns are not regulations and are left out.
pub fn group_columns(columns: &[ThresholdKey]) -> Vec<StandardGroup> {
    let mut groups: Vec<StandardGroup> = Vec::new();

    for key in columns {
        if *key.family() == Family::Reference {
            continue;
        }
        match groups.iter_mut().find(|g| g.id == key.standard_id()) {
            Some(group) => group.columns.push(key.column().to_string()),
            None => groups.push(StandardGroup {
                id: key.standard_id().to_string(),
                label: key.group_label(),
                columns: vec![key.column().to_string()],
            }),
        }
    }

    tracing::debug!(groups = groups.len(), columns = columns.len(), "grouped threshold columns");
    groups
}

/// Flatten selected groups back into their column names.
pub fn selected_columns<'a, I>(groups: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a StandardGroup>,
{
    groups
        .into_iter()
        .flat_map(|g| g.columns.iter().cloned())
        .collect()
}

/// Resolve standard names (group label or id, case-insensitive) to their
/// columns, in the order given.
pub fn select_standards(
    groups: &[StandardGroup],
    names: &[String],
) -> Result<Vec<String>, CalidadError> {
    let mut chosen: Vec<&StandardGroup> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        let group = groups
            .iter()
            .find(|g| g.label.eq_ignore_ascii_case(name) || g.id.eq_ignore_ascii_case(name))
            .ok_or_else(|| CalidadError::UnknownStandard(name.to_string()))?;
        if !chosen.iter().any(|g| g.id == group.id) {
            chosen.push(group);
        }
    }
    Ok(selected_columns(chosen))
}

use crate::artifacts::diff::diff_unit::DiffUnit;
use std::cmp::Ordering;
use std::sync::Arc;

/// Caller supplied order of the final diff unit list.
pub type UnitOrdering = Arc<dyn Fn(&DiffUnit, &DiffUnit) -> Ordering + Send + Sync>;

/// Most severe local status first, then by file name ignoring case.
pub fn by_importance(left: &DiffUnit, right: &DiffUnit) -> Ordering {
    left.local_status()
        .comparable()
        .cmp(&right.local_status().comparable())
        .then_with(|| file_name(left).cmp(&file_name(right)))
        .then_with(|| left.local_file().cmp(right.local_file()))
}

pub fn default_ordering() -> UnitOrdering {
    Arc::new(by_importance)
}

fn file_name(unit: &DiffUnit) -> String {
    unit.local_file()
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

use crate::locator::{PackagePart, locate_package};
use crate::package::{PackageId, TrackedPackage};

/// Shown in place of the list once the last package is gone.
pub const EMPTY_PROMPT: &str = "You are not tracking any packages. Add one!";

/// A visible package row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRow {
    pub id: PackageId,
    pub label: String,
    pub tracking_number: Option<String>,
}

impl PackageRow {
    fn from_package(package: TrackedPackage) -> Self {
        Self {
            id: package.id,
            label: package.title,
            tracking_number: package.tracking_number,
        }
    }
}

/// Owns the package list region. Nothing else mutates the rows.
#[derive(Debug, Clone, Default)]
pub struct ListController {
    rows: Vec<PackageRow>,
    empty_prompt: Option<&'static str>,
}

impl ListController {
    pub fn new(packages: Vec<TrackedPackage>) -> Self {
        let rows: Vec<PackageRow> = packages.into_iter().map(PackageRow::from_package).collect();
        let empty_prompt = rows.is_empty().then_some(EMPTY_PROMPT);
        Self { rows, empty_prompt }
    }

    pub fn rows(&self) -> &[PackageRow] {
        &self.rows
    }

    pub fn row(&self, id: PackageId) -> Option<&PackageRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn contains(&self, id: PackageId) -> bool {
        self.row(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The empty-state prompt, if it is currently shown.
    pub fn empty_prompt(&self) -> Option<&'static str> {
        self.empty_prompt
    }

    /// Remove the row for `id`. Removing an absent row is a no-op.
    ///
    /// When the list becomes empty the prompt is shown, at most once.
    pub fn remove_item(&mut self, id: PackageId) {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        if self.rows.len() != before {
            tracing::info!(
                package = %id,
                element = %locate_package(id, PackagePart::Row),
                "removed package row"
            );
        }

        if self.rows.is_empty() && self.empty_prompt.is_none() {
            self.empty_prompt = Some(EMPTY_PROMPT);
        }
    }

    /// Replace the visible label of a row. Returns false if the row is gone.
    pub fn set_label(&mut self, id: PackageId, label: &str) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.label = label.to_owned();
                tracing::debug!(element = %locate_package(id, PackagePart::Label), "label updated");
                true
            }
            None => false,
        }
    }
}

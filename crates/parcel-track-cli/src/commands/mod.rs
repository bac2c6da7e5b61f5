pub mod history;
pub mod list;
pub mod modal;

use parcel_track::{PackageId, Page, TrackedPackage};

/// Build a page from the configured rows, adding `id` if it is not listed.
pub fn page_with(packages: &[TrackedPackage], id: PackageId) -> Page {
    let mut rows = packages.to_vec();
    if !rows.iter().any(|p| p.id == id) {
        rows.push(TrackedPackage::new(id.get(), format!("#{id}")));
    }
    Page::new(rows)
}

pub mod accordion;
pub mod gateway;
pub mod list;
pub mod locator;
pub mod modal;
pub mod package;
pub mod page;
pub mod response;

pub use accordion::{AccordionController, Section, SectionNode, SectionState};
pub use gateway::{Action, Completion, Gateway, Outcome, Payload, Request, Ticket};
pub use list::{ListController, PackageRow};
pub use locator::{ElementId, ModalPart, PackagePart, locate_modal, locate_package};
pub use modal::{ModalController, ModalRegion, ModalResult, SubmissionState};
pub use package::{ModalKind, PackageId, TrackedPackage, TrackingRecord};
pub use page::{Page, PageEvent, PageUpdate};
pub use response::{ResponseError, TrackingData, interpret_modal, interpret_tracking};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

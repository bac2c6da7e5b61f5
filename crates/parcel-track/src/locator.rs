use std::fmt;

use crate::package::{ModalKind, PackageId};

/// Parts of a modal dialog that the controllers address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalPart {
    Root,
    CloseButton,
    CancelButton,
    ConfirmButton,
    Spinner,
    ErrorMessage,
}

impl ModalPart {
    /// The three buttons disabled while a submission is in flight.
    pub const CONTROLS: [ModalPart; 3] = [
        ModalPart::CloseButton,
        ModalPart::CancelButton,
        ModalPart::ConfirmButton,
    ];

    fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Root => None,
            Self::CloseButton => Some("xButton"),
            Self::CancelButton => Some("cancelButton"),
            Self::ConfirmButton => Some("updateButton"),
            Self::Spinner => Some("loadingSpinner"),
            Self::ErrorMessage => Some("modalErrorMessage"),
        }
    }
}

/// Parts of a package row (list entry plus its collapsible section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackagePart {
    Row,
    Label,
    SectionBody,
    Spinner,
}

/// Stable handle for a UI element, derived purely from identity.
///
/// `Display` renders the element id used by page templates. The string
/// form is output only; nothing reads identity back out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Modal(ModalKind, ModalPart),
    Package(PackageId, PackagePart),
}

pub fn locate_modal(kind: ModalKind, part: ModalPart) -> ElementId {
    ElementId::Modal(kind, part)
}

pub fn locate_package(id: PackageId, part: PackagePart) -> ElementId {
    ElementId::Package(id, part)
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modal(kind, part) => match part.suffix() {
                Some(suffix) => write!(f, "{}-{suffix}", kind.dom_name()),
                None => f.write_str(kind.dom_name()),
            },
            Self::Package(id, PackagePart::Row) => write!(f, "packageListAccordionItem-{id}"),
            Self::Package(id, PackagePart::Label) => write!(f, "packageLabel-{id}"),
            Self::Package(id, PackagePart::SectionBody) => write!(f, "accordion-body-{id}"),
            Self::Package(id, PackagePart::Spinner) => write!(f, "{id}-loadingSpinner"),
        }
    }
}

use crate::gateway::{Action, Outcome, Payload, Request, Ticket};
use crate::list::ListController;
use crate::locator::{ElementId, ModalPart, locate_modal};
use crate::package::{ModalKind, PackageId};
use crate::response::{ResponseError, interpret_modal};

/// Submission lifecycle of one dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting { generation: u64, package: PackageId },
    Error,
}

/// A button in the dialog footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub element: ElementId,
    pub enabled: bool,
}

/// The UI region owned by one dialog.
#[derive(Debug, Clone)]
pub struct ModalRegion {
    pub kind: ModalKind,
    pub visible: bool,
    pub controls: [Control; 3],
    /// Progress indicator in the footer, present while submitting.
    pub spinner: Option<ElementId>,
    pub error_visible: bool,
    /// Free-text input. Only the rename dialog reads it.
    pub input: String,
    package_slot: Option<PackageId>,
    state: SubmissionState,
    generation: u64,
}

impl ModalRegion {
    fn new(kind: ModalKind) -> Self {
        Self {
            kind,
            visible: false,
            controls: ModalPart::CONTROLS.map(|part| Control {
                element: locate_modal(kind, part),
                enabled: true,
            }),
            spinner: None,
            error_visible: false,
            input: String::new(),
            package_slot: None,
            state: SubmissionState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// The package this dialog was last prepared for.
    pub fn package(&self) -> Option<PackageId> {
        self.package_slot
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls.iter().all(|c| c.enabled)
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        for control in &mut self.controls {
            control.enabled = enabled;
        }
    }
}

/// How a completed submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalResult {
    Succeeded { package: PackageId },
    Failed(ResponseError),
}

/// Request shape and success handling for one dialog kind.
struct ModalBehaviour {
    action: Action,
    payload: fn(&ModalRegion, PackageId) -> Payload,
    /// An empty 200 body counts as a failure.
    requires_body: bool,
    on_success: fn(&mut ListController, PackageId, &str),
}

const RENAME: ModalBehaviour = ModalBehaviour {
    action: Action::UpdateTitle,
    payload: |region, package| {
        Payload::new()
            .field("newTitle", region.input.clone())
            .field("packageID", package.to_string())
    },
    requires_body: false,
    on_success: |list, package, body| {
        if !list.set_label(package, body) {
            tracing::debug!(package = %package, "renamed package no longer listed");
        }
    },
};

const DELETE: ModalBehaviour = ModalBehaviour {
    action: Action::DeletePackage,
    payload: |_, package| Payload::new().field("packageID", package.to_string()),
    requires_body: true,
    on_success: |list, package, _| list.remove_item(package),
};

fn behaviour(kind: ModalKind) -> &'static ModalBehaviour {
    match kind {
        ModalKind::TitleInput => &RENAME,
        ModalKind::Delete => &DELETE,
    }
}

fn slot(kind: ModalKind) -> usize {
    match kind {
        ModalKind::TitleInput => 0,
        ModalKind::Delete => 1,
    }
}

/// Drives the rename and delete dialogs.
#[derive(Debug, Clone)]
pub struct ModalController {
    regions: [ModalRegion; 2],
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            regions: ModalKind::ALL.map(ModalRegion::new),
        }
    }

    pub fn region(&self, kind: ModalKind) -> &ModalRegion {
        &self.regions[slot(kind)]
    }

    fn region_mut(&mut self, kind: ModalKind) -> &mut ModalRegion {
        &mut self.regions[slot(kind)]
    }

    /// The dialog currently shown, if any.
    pub fn visible(&self) -> Option<ModalKind> {
        self.regions.iter().find(|r| r.visible).map(|r| r.kind)
    }

    /// Stash `package` in the dialog before it opens.
    ///
    /// Refused while a submission for this dialog is in flight.
    pub fn prepare(&mut self, package: PackageId, kind: ModalKind) -> bool {
        let region = self.region_mut(kind);
        if region.is_submitting() {
            tracing::warn!(modal = %kind, package = %package, "prepare ignored while submitting");
            return false;
        }
        region.package_slot = Some(package);
        true
    }

    pub fn show(&mut self, kind: ModalKind) {
        self.region_mut(kind).visible = true;
    }

    pub fn set_input(&mut self, kind: ModalKind, text: impl Into<String>) {
        self.region_mut(kind).input = text.into();
    }

    pub fn input_mut(&mut self, kind: ModalKind) -> Option<&mut String> {
        let region = self.region_mut(kind);
        (!region.is_submitting()).then_some(&mut region.input)
    }

    /// Close the dialog via its close or cancel control.
    ///
    /// Returns false while submitting, since those controls are disabled.
    pub fn dismiss(&mut self, kind: ModalKind) -> bool {
        let region = self.region_mut(kind);
        if region.is_submitting() {
            return false;
        }
        region.visible = false;
        region.error_visible = false;
        region.state = SubmissionState::Idle;
        true
    }

    /// Start a submission for `kind`.
    ///
    /// Returns `None` if one is already in flight or the dialog was never
    /// prepared with a package.
    pub fn submit(&mut self, kind: ModalKind) -> Option<Request> {
        let region = self.region_mut(kind);
        if region.is_submitting() {
            tracing::debug!(modal = %kind, "submit ignored, request already in flight");
            return None;
        }
        let Some(package) = region.package_slot else {
            tracing::warn!(modal = %kind, "submit without a prepared package");
            return None;
        };

        region.set_controls_enabled(false);
        region.spinner = Some(locate_modal(kind, ModalPart::Spinner));
        region.error_visible = false;
        region.generation += 1;
        let generation = region.generation;
        region.state = SubmissionState::Submitting {
            generation,
            package,
        };

        let behaviour = behaviour(kind);
        let payload = (behaviour.payload)(region, package);
        tracing::info!(modal = %kind, package = %package, "submitting dialog");

        Some(Request {
            ticket: Ticket::Modal { kind, generation },
            action: behaviour.action,
            payload,
        })
    }

    /// Apply the outcome of a submission.
    ///
    /// Returns `None` when the completion no longer matches the dialog's
    /// in-flight submission; nothing is touched in that case.
    pub fn complete(
        &mut self,
        kind: ModalKind,
        generation: u64,
        outcome: &Outcome,
        list: &mut ListController,
    ) -> Option<ModalResult> {
        let region = self.region_mut(kind);
        let package = match region.state {
            SubmissionState::Submitting {
                generation: current,
                package,
            } if current == generation => package,
            _ => {
                tracing::debug!(modal = %kind, generation, "dropping stale dialog completion");
                return None;
            }
        };

        region.spinner = None;
        region.set_controls_enabled(true);

        let behaviour = behaviour(kind);
        let interpreted = interpret_modal(outcome).and_then(|body| {
            if behaviour.requires_body && body.is_empty() {
                Err(ResponseError::Sentinel)
            } else {
                Ok(body)
            }
        });

        match interpreted {
            Ok(body) => {
                (behaviour.on_success)(list, package, body);
                region.visible = false;
                region.state = SubmissionState::Idle;
                tracing::info!(modal = %kind, package = %package, "dialog action succeeded");
                // Any success leaves the rename field blank for the next open.
                self.regions[slot(ModalKind::TitleInput)].input.clear();
                Some(ModalResult::Succeeded { package })
            }
            Err(err) => {
                region.error_visible = true;
                region.state = SubmissionState::Error;
                tracing::warn!(modal = %kind, package = %package, error = %err, "dialog action failed");
                Some(ModalResult::Failed(err))
            }
        }
    }
}

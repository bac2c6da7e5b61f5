use crate::accordion::{AccordionController, SectionState};
use crate::gateway::{Completion, Request, Ticket};
use crate::list::ListController;
use crate::modal::{ModalController, ModalResult};
use crate::package::{ModalKind, PackageId, TrackedPackage};

/// Lifecycle hooks the host page raises.
///
/// Every event carries the identity it concerns; hosts never encode it
/// into element ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A row's action trigger is about to open `kind` for `package`.
    Prepare { package: PackageId, kind: ModalKind },
    /// Prepare and show the dialog in one step.
    Open { package: PackageId, kind: ModalKind },
    /// The dialog's confirm button was pressed.
    Submit(ModalKind),
    /// The dialog's close or cancel button was pressed.
    Dismiss(ModalKind),
    Expanded(PackageId),
    Collapsed(PackageId),
}

/// What a routed completion changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageUpdate {
    Modal(ModalKind, ModalResult),
    Section(PackageId, SectionState),
    /// The completion no longer applied to current state.
    Stale,
}

/// The coordination layer for one page: owns every region's controller
/// and routes host events and request completions between them.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub list: ListController,
    pub modals: ModalController,
    pub accordion: AccordionController,
}

impl Page {
    pub fn new(packages: Vec<TrackedPackage>) -> Self {
        Self {
            list: ListController::new(packages),
            modals: ModalController::new(),
            accordion: AccordionController::new(),
        }
    }

    /// Handle a host event. Returns the request to issue, if any.
    pub fn handle(&mut self, event: PageEvent) -> Option<Request> {
        match event {
            PageEvent::Prepare { package, kind } => {
                self.modals.prepare(package, kind);
                None
            }
            PageEvent::Open { package, kind } => {
                if self.modals.prepare(package, kind) {
                    self.modals.show(kind);
                }
                None
            }
            PageEvent::Submit(kind) => self.modals.submit(kind),
            PageEvent::Dismiss(kind) => {
                self.modals.dismiss(kind);
                None
            }
            PageEvent::Expanded(package) => {
                if !self.list.contains(package) {
                    tracing::debug!(package = %package, "expand ignored for unlisted package");
                    return None;
                }
                self.accordion.expanded(package)
            }
            PageEvent::Collapsed(package) => {
                self.accordion.collapsed(package);
                None
            }
        }
    }

    /// Route a completion to the controller that issued its request.
    pub fn complete(&mut self, completion: Completion) -> PageUpdate {
        let Completion { ticket, outcome } = completion;
        match ticket {
            Ticket::Modal { kind, generation } => {
                let Some(result) =
                    self.modals
                        .complete(kind, generation, &outcome, &mut self.list)
                else {
                    return PageUpdate::Stale;
                };
                if let ModalResult::Succeeded { package } = result
                    && !self.list.contains(package)
                {
                    self.accordion.forget(package);
                }
                PageUpdate::Modal(kind, result)
            }
            Ticket::Section {
                package,
                generation,
            } => match self.accordion.complete(package, generation, &outcome) {
                Some(state) => PageUpdate::Section(package, state),
                None => PageUpdate::Stale,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::accordion::{NO_DATA_PLACEHOLDER, SectionNode};
    use crate::gateway::{Action, Outcome};
    use crate::list::EMPTY_PROMPT;
    use crate::response::ResponseError;
    use crate::test_support::ScriptedGateway;

    use super::*;

    fn page_with(ids: &[i64]) -> Page {
        Page::new(
            ids.iter()
                .map(|id| TrackedPackage::new(*id, format!("Package {id}")))
                .collect(),
        )
    }

    #[tokio::test]
    async fn repeated_submit_issues_single_request() {
        let gateway = ScriptedGateway::new();
        gateway.respond(Action::DeletePackage, Outcome::ok("1"));
        let mut page = page_with(&[1, 2]);

        page.handle(PageEvent::Open {
            package: PackageId::new(1),
            kind: ModalKind::Delete,
        });
        let request = page.handle(PageEvent::Submit(ModalKind::Delete)).unwrap();
        assert!(page.handle(PageEvent::Submit(ModalKind::Delete)).is_none());
        assert!(page.handle(PageEvent::Submit(ModalKind::Delete)).is_none());

        let completion = request.execute(&gateway).await;
        page.complete(completion);

        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn rename_flow_updates_label() {
        let gateway = ScriptedGateway::new();
        gateway.respond(Action::UpdateTitle, Outcome::ok("New Name"));
        let mut page = page_with(&[5]);

        page.handle(PageEvent::Open {
            package: PackageId::new(5),
            kind: ModalKind::TitleInput,
        });
        page.modals.set_input(ModalKind::TitleInput, "New Name");
        let request = page.handle(PageEvent::Submit(ModalKind::TitleInput)).unwrap();
        let update = page.complete(request.execute(&gateway).await);

        assert_eq!(
            update,
            PageUpdate::Modal(
                ModalKind::TitleInput,
                ModalResult::Succeeded {
                    package: PackageId::new(5)
                }
            )
        );
        assert_eq!(page.list.row(PackageId::new(5)).unwrap().label, "New Name");
        assert!(page.modals.visible().is_none());

        let (action, payload) = &gateway.requests()[0];
        assert_eq!(*action, Action::UpdateTitle);
        assert_eq!(payload.get("newTitle"), Some("New Name"));
        assert_eq!(payload.get("packageID"), Some("5"));
    }

    #[tokio::test]
    async fn deleting_last_row_shows_prompt_once() {
        let gateway = ScriptedGateway::new();
        gateway.respond(Action::DeletePackage, Outcome::ok("1"));
        let mut page = page_with(&[9]);

        page.handle(PageEvent::Open {
            package: PackageId::new(9),
            kind: ModalKind::Delete,
        });
        let request = page.handle(PageEvent::Submit(ModalKind::Delete)).unwrap();
        page.complete(request.execute(&gateway).await);

        assert!(page.list.is_empty());
        assert_eq!(page.list.empty_prompt(), Some(EMPTY_PROMPT));
    }

    #[tokio::test]
    async fn sentinel_failure_leaves_list_untouched() {
        let gateway = ScriptedGateway::new();
        gateway.respond(Action::UpdateTitle, Outcome::ok("0"));
        let mut page = page_with(&[5]);

        page.handle(PageEvent::Open {
            package: PackageId::new(5),
            kind: ModalKind::TitleInput,
        });
        page.modals.set_input(ModalKind::TitleInput, "Renamed");
        let request = page.handle(PageEvent::Submit(ModalKind::TitleInput)).unwrap();
        let update = page.complete(request.execute(&gateway).await);

        assert_eq!(
            update,
            PageUpdate::Modal(
                ModalKind::TitleInput,
                ModalResult::Failed(ResponseError::Sentinel)
            )
        );
        assert_eq!(page.list.row(PackageId::new(5)).unwrap().label, "Package 5");
        assert_eq!(page.modals.visible(), Some(ModalKind::TitleInput));
        assert!(page.modals.region(ModalKind::TitleInput).error_visible);
    }

    #[tokio::test]
    async fn unscripted_request_surfaces_as_transport_failure() {
        let gateway = ScriptedGateway::new();
        let mut page = page_with(&[1]);

        page.handle(PageEvent::Open {
            package: PackageId::new(1),
            kind: ModalKind::Delete,
        });
        let request = page.handle(PageEvent::Submit(ModalKind::Delete)).unwrap();
        let update = page.complete(request.execute(&gateway).await);

        assert!(matches!(
            update,
            PageUpdate::Modal(
                ModalKind::Delete,
                ModalResult::Failed(ResponseError::Transport { status: 0 })
            )
        ));
        assert!(page.modals.region(ModalKind::Delete).controls_enabled());
    }

    #[tokio::test]
    async fn expand_fail_collapse_expand_refetches() {
        let gateway = ScriptedGateway::new();
        gateway.respond(Action::FetchTrackingData, Outcome::new(500, ""));
        gateway.respond(
            Action::FetchTrackingData,
            Outcome::ok(json!({"success": true, "data": ["meta"]}).to_string()),
        );
        let mut page = page_with(&[2]);
        let id = PackageId::new(2);

        let first = page.handle(PageEvent::Expanded(id)).unwrap();
        assert_eq!(
            page.complete(first.execute(&gateway).await),
            PageUpdate::Section(id, SectionState::Failed)
        );

        page.handle(PageEvent::Collapsed(id));
        assert!(page.accordion.section(id).unwrap().body.is_empty());

        let second = page.handle(PageEvent::Expanded(id)).unwrap();
        assert_eq!(
            page.complete(second.execute(&gateway).await),
            PageUpdate::Section(id, SectionState::Loaded)
        );
        assert_eq!(gateway.requests().len(), 2);
        assert_eq!(
            page.accordion.section(id).unwrap().body,
            vec![SectionNode::Placeholder(NO_DATA_PLACEHOLDER)]
        );
    }

    #[tokio::test]
    async fn late_tracking_response_is_stale() {
        let gateway = ScriptedGateway::new();
        gateway.respond(
            Action::FetchTrackingData,
            Outcome::ok(
                json!({"success": true, "data": ["meta", {"date": "d", "time": "t", "data": "x"}]})
                    .to_string(),
            ),
        );
        let mut page = page_with(&[2]);
        let id = PackageId::new(2);

        let request = page.handle(PageEvent::Expanded(id)).unwrap();
        page.handle(PageEvent::Collapsed(id));

        assert_eq!(
            page.complete(request.execute(&gateway).await),
            PageUpdate::Stale
        );
        assert!(page.accordion.section(id).unwrap().body.is_empty());
    }

    #[tokio::test]
    async fn deleted_package_drops_its_section() {
        let gateway = ScriptedGateway::new();
        gateway.respond(Action::DeletePackage, Outcome::ok("1"));
        let mut page = page_with(&[1, 2]);
        let id = PackageId::new(1);

        let load = page.handle(PageEvent::Expanded(id)).unwrap();
        page.handle(PageEvent::Open {
            package: id,
            kind: ModalKind::Delete,
        });
        let delete = page.handle(PageEvent::Submit(ModalKind::Delete)).unwrap();
        page.complete(delete.execute(&gateway).await);

        assert!(page.accordion.section(id).is_none());
        let late = Completion {
            ticket: load.ticket,
            outcome: Outcome::ok(json!({"success": true, "data": ["meta"]}).to_string()),
        };
        assert_eq!(page.complete(late), PageUpdate::Stale);
    }

    #[tokio::test]
    async fn deleted_package_cannot_be_reexpanded() {
        let gateway = ScriptedGateway::new();
        gateway.respond(Action::DeletePackage, Outcome::ok("1"));
        let mut page = page_with(&[1, 2]);
        let id = PackageId::new(1);

        let load = page.handle(PageEvent::Expanded(id)).unwrap();
        page.handle(PageEvent::Open {
            package: id,
            kind: ModalKind::Delete,
        });
        let delete = page.handle(PageEvent::Submit(ModalKind::Delete)).unwrap();
        page.complete(delete.execute(&gateway).await);

        assert!(page.handle(PageEvent::Expanded(id)).is_none());
        assert!(page.accordion.section(id).is_none());

        let late = Completion {
            ticket: load.ticket,
            outcome: Outcome::ok(
                json!({"success": true, "data": ["meta", {"date": "d", "time": "t", "data": "x"}]})
                    .to_string(),
            ),
        };
        assert_eq!(page.complete(late), PageUpdate::Stale);
        assert!(page.accordion.section(id).is_none());
    }

    #[test]
    fn prepare_without_show_keeps_dialog_hidden() {
        let mut page = page_with(&[1]);
        page.handle(PageEvent::Prepare {
            package: PackageId::new(1),
            kind: ModalKind::Delete,
        });
        assert!(page.modals.visible().is_none());
        assert_eq!(
            page.modals.region(ModalKind::Delete).package(),
            Some(PackageId::new(1))
        );
    }

    #[test]
    fn dismiss_hides_dialog() {
        let mut page = page_with(&[1]);
        page.handle(PageEvent::Open {
            package: PackageId::new(1),
            kind: ModalKind::TitleInput,
        });
        assert_eq!(page.modals.visible(), Some(ModalKind::TitleInput));
        page.handle(PageEvent::Dismiss(ModalKind::TitleInput));
        assert!(page.modals.visible().is_none());
    }
}

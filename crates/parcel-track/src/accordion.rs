use std::collections::BTreeMap;

use crate::gateway::{Action, Outcome, Payload, Request, Ticket};
use crate::locator::{ElementId, PackagePart, locate_package};
use crate::package::{PackageId, TrackingRecord};
use crate::response::{TrackingData, interpret_tracking};

pub const NO_DATA_PLACEHOLDER: &str =
    "There is no tracking data for this package yet. Please try again in a few minutes.";
pub const LOAD_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Lazy-load lifecycle of one collapsible section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Collapsed,
    Loading,
    Loaded,
    Failed,
}

/// Content rendered inside a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionNode {
    Spinner(ElementId),
    Records(Vec<TrackingRecord>),
    Placeholder(&'static str),
    Failure(&'static str),
}

/// The body region of one package's section.
#[derive(Debug, Clone)]
pub struct Section {
    pub package: PackageId,
    pub body: Vec<SectionNode>,
    state: SectionState,
    generation: u64,
}

impl Section {
    fn new(package: PackageId) -> Self {
        Self {
            package,
            body: Vec::new(),
            state: SectionState::Collapsed,
            generation: 0,
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state != SectionState::Collapsed
    }

    /// Rendered tracking records, if the load produced any.
    pub fn records(&self) -> Option<&[TrackingRecord]> {
        self.body.iter().find_map(|node| match node {
            SectionNode::Records(records) => Some(records.as_slice()),
            _ => None,
        })
    }
}

/// Owns every section body, keyed by package.
///
/// Generations come from one counter shared by all sections, so a value is
/// never handed out twice even after a section is forgotten and recreated.
#[derive(Debug, Clone, Default)]
pub struct AccordionController {
    sections: BTreeMap<PackageId, Section>,
    next_generation: u64,
}

impl AccordionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, package: PackageId) -> Option<&Section> {
        self.sections.get(&package)
    }

    pub fn state(&self, package: PackageId) -> SectionState {
        self.sections
            .get(&package)
            .map_or(SectionState::Collapsed, Section::state)
    }

    fn bump(next_generation: &mut u64) -> u64 {
        *next_generation += 1;
        *next_generation
    }

    /// The section was expanded. Starts a fresh load if it was collapsed.
    ///
    /// Returns `None` when a load is already in flight or the section is
    /// already showing content.
    pub fn expanded(&mut self, package: PackageId) -> Option<Request> {
        let section = self
            .sections
            .entry(package)
            .or_insert_with(|| Section::new(package));

        if section.state != SectionState::Collapsed {
            tracing::debug!(package = %package, state = ?section.state, "expand ignored");
            return None;
        }

        section.generation = Self::bump(&mut self.next_generation);
        section.state = SectionState::Loading;
        section.body = vec![SectionNode::Spinner(locate_package(
            package,
            PackagePart::Spinner,
        ))];
        tracing::info!(package = %package, "loading tracking data");

        Some(Request {
            ticket: Ticket::Section {
                package,
                generation: section.generation,
            },
            action: Action::FetchTrackingData,
            payload: Payload::new().field("packageID", package.to_string()),
        })
    }

    /// The section was collapsed. Clears its body unconditionally and
    /// invalidates any load still in flight.
    pub fn collapsed(&mut self, package: PackageId) {
        if let Some(section) = self.sections.get_mut(&package) {
            section.body.clear();
            section.state = SectionState::Collapsed;
            section.generation = Self::bump(&mut self.next_generation);
            tracing::debug!(element = %locate_package(package, PackagePart::SectionBody), "section cleared");
        }
    }

    /// Drop a section whose package is gone from the list.
    pub fn forget(&mut self, package: PackageId) {
        self.sections.remove(&package);
    }

    /// Apply a tracking-data response.
    ///
    /// Returns the new state, or `None` if the response is stale (the
    /// section collapsed or reloaded since the request went out).
    pub fn complete(
        &mut self,
        package: PackageId,
        generation: u64,
        outcome: &Outcome,
    ) -> Option<SectionState> {
        let section = match self.sections.get_mut(&package) {
            Some(section)
                if section.state == SectionState::Loading && section.generation == generation =>
            {
                section
            }
            _ => {
                tracing::debug!(package = %package, generation, "dropping stale tracking response");
                return None;
            }
        };

        section
            .body
            .retain(|node| !matches!(node, SectionNode::Spinner(_)));

        match interpret_tracking(outcome) {
            Ok(TrackingData::Empty) => {
                section.body.push(SectionNode::Placeholder(NO_DATA_PLACEHOLDER));
                section.state = SectionState::Loaded;
            }
            Ok(TrackingData::Records(records)) => {
                tracing::debug!(package = %package, count = records.len(), "tracking data loaded");
                section.body.push(SectionNode::Records(records));
                section.state = SectionState::Loaded;
            }
            Err(err) => {
                tracing::warn!(package = %package, error = %err, "tracking data load failed");
                section.body.push(SectionNode::Failure(LOAD_FAILURE_MESSAGE));
                section.state = SectionState::Failed;
            }
        }

        Some(section.state)
    }
}

use parcel_track::{Completion, Request};

/// Commands returned by the app to the event loop for side-effect execution.
#[derive(Debug)]
pub enum AppCommand {
    /// No side effect needed.
    None,
    /// Quit the application.
    Quit,
    /// Send a request to the backend and report its completion.
    Issue(Request),
}

/// Actions dispatched back into the app from async tasks.
#[derive(Debug)]
pub enum Action {
    /// A backend request finished (successfully or not).
    Completed(Completion),
}

// ── UI event surface ──
//
// The fixed set of named operations the rendering layer can invoke, with
// their dashboard / list / details variants. The console routes each
// command; rendering never calls the store directly.

use crate::model::{ClientForm, ClientId};

/// Where a row-level operation was invoked from. The shared cache makes
/// the refresh identical either way; the origin matters for tracing and
/// for details-screen selection updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Dashboard,
    List,
    Details,
}

/// Every operation the UI can dispatch.
#[derive(Debug, Clone)]
pub enum UiCommand {
    ViewClient { id: ClientId },
    EditClient { id: ClientId },
    /// Edit the currently viewed client (details screen).
    EditCurrent,
    SubmitAddClient { form: ClientForm },
    SubmitEditClient { form: ClientForm },
    ToggleStatus { id: ClientId, origin: Origin },
    /// Toggle the currently viewed client (details screen).
    ToggleCurrent,
    DeleteClient { id: ClientId, origin: Origin },
    /// Delete the currently viewed client (details screen).
    DeleteCurrent,
    /// Cancel the active screen per its cancel rule.
    Cancel,
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    Created { id: ClientId },
    /// A confirmation was declined or there was nothing to do; no state
    /// changed.
    Unchanged,
}

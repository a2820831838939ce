//! Newsletter dialog state machine

use serde::Serialize;

use super::NewsletterPort;

/// Visibility of the newsletter dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogState {
    /// Hidden
    #[default]
    Closed,
    /// Visible, waiting for an address
    Open,
    /// Visible, showing the confirmation
    Confirmed,
}

/// What a submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The address was handed to the subscription port
    Forwarded,
    /// The address was empty; the confirmation is shown anyway
    Empty,
    /// The dialog was closed, nothing happened
    Ignored,
}

/// The newsletter dialog owned by a post page
#[derive(Debug, Clone, Default)]
pub struct NewsletterDialog {
    state: DialogState,
}

impl NewsletterDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    /// The call-to-action was activated
    pub fn activate(&mut self) {
        if self.state == DialogState::Closed {
            self.state = DialogState::Open;
        }
    }

    /// Submit an address from the dialog form.
    ///
    /// Only presence is checked, never the format. An empty address still
    /// moves the dialog to `Confirmed`.
    pub fn submit(&mut self, address: &str, port: &dyn NewsletterPort) -> SubmitOutcome {
        if self.state == DialogState::Closed {
            tracing::debug!("Ignoring newsletter submit while the dialog is closed");
            return SubmitOutcome::Ignored;
        }

        let outcome = if address.is_empty() {
            tracing::debug!("Empty newsletter address, confirming without subscribing");
            SubmitOutcome::Empty
        } else {
            port.submit_newsletter_email(address);
            SubmitOutcome::Forwarded
        };

        self.state = DialogState::Confirmed;
        outcome
    }

    /// Close the dialog from any state
    pub fn close(&mut self) {
        self.state = DialogState::Closed;
    }
}

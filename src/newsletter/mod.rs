//! Newsletter module - the subscription dialog and where addresses go

mod dialog;
mod subscribers;

pub use dialog::{DialogState, NewsletterDialog, SubmitOutcome};
pub use subscribers::{Subscriber, SubscriberList};

/// Capability that receives submitted newsletter addresses
pub trait NewsletterPort: Send + Sync {
    /// Hand over a non-empty address. Fire-and-forget.
    fn submit_newsletter_email(&self, address: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::NewsletterPort;
    use std::sync::Mutex;

    /// Port that records every forwarded address
    #[derive(Default)]
    pub struct RecordingNewsletter {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingNewsletter {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl NewsletterPort for RecordingNewsletter {
        fn submit_newsletter_email(&self, address: &str) {
            self.calls.lock().unwrap().push(address.to_string());
        }
    }
}

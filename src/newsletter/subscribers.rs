//! File-backed subscriber list

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::NewsletterPort;

/// One line of the subscribers file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    pub subscribed_at: String,
}

/// Appends subscribers to a JSON-lines file, one object per line
pub struct SubscriberList {
    path: PathBuf,
    known: Mutex<HashSet<String>>,
}

impl SubscriberList {
    /// Open a list, reading addresses already stored at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let known = Self::read(&path)?
            .into_iter()
            .map(|s| s.email)
            .collect::<HashSet<_>>();
        tracing::debug!("Loaded {} subscribers from {:?}", known.len(), path);

        Ok(Self {
            path,
            known: Mutex::new(known),
        })
    }

    /// All subscribers stored in a file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<Subscriber>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let mut subscribers = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str::<Subscriber>(line) {
                Ok(s) => subscribers.push(s),
                Err(e) => tracing::warn!("Skipping malformed subscriber line in {:?}: {}", path, e),
            }
        }
        Ok(subscribers)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store an address, returning `false` when it was already present
    pub fn add(&self, email: &str) -> Result<bool> {
        let mut known = self
            .known
            .lock()
            .map_err(|_| anyhow::anyhow!("subscriber list lock poisoned"))?;
        if known.contains(email) {
            return Ok(false);
        }

        let record = Subscriber {
            email: email.to_string(),
            subscribed_at: Local::now().to_rfc3339(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&record)?)?;

        known.insert(record.email);
        Ok(true)
    }
}

impl NewsletterPort for SubscriberList {
    fn submit_newsletter_email(&self, address: &str) {
        match self.add(address) {
            Ok(true) => tracing::info!("New newsletter subscriber"),
            Ok(false) => tracing::debug!("Address already subscribed"),
            Err(e) => tracing::warn!("Failed to store newsletter subscriber: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_and_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subs.jsonl");
        let list = SubscriberList::open(&path).unwrap();

        assert!(list.add("a@example.com").unwrap());
        assert!(list.add("b@example.com").unwrap());
        assert!(!list.add("a@example.com").unwrap());

        let stored = SubscriberList::read(&path).unwrap();
        let emails: Vec<_> = stored.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_reopen_remembers_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("subs.jsonl");
        SubscriberList::open(&path)
            .unwrap()
            .submit_newsletter_email("a@example.com");

        let reopened = SubscriberList::open(&path).unwrap();
        assert!(!reopened.add("a@example.com").unwrap());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subs.jsonl");
        fs::write(
            &path,
            "not json\n{\"email\":\"ok@example.com\",\"subscribed_at\":\"x\"}\n",
        )
        .unwrap();

        let stored = SubscriberList::read(&path).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "ok@example.com");
    }
}

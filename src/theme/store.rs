//! Shared theme state

use tokio::sync::watch;

use super::ThemeColor;

/// Capability a page uses to publish and read the current theme
pub trait ThemePort: Send + Sync {
    /// Replace the current theme. Fire-and-forget.
    fn push_theme_color(&self, color: ThemeColor);

    /// The theme currently in effect
    fn current_theme(&self) -> ThemeColor;
}

/// Process-wide theme store other parts of the program can subscribe to
pub struct ThemeStore {
    tx: watch::Sender<ThemeColor>,
}

impl ThemeStore {
    pub fn new(initial: ThemeColor) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Receiver that observes every theme change
    pub fn subscribe(&self) -> watch::Receiver<ThemeColor> {
        self.tx.subscribe()
    }
}

impl ThemePort for ThemeStore {
    fn push_theme_color(&self, color: ThemeColor) {
        tracing::debug!("Theme color set to main={}", color.main);
        // send_replace keeps the value even with no receivers alive
        self.tx.send_replace(color);
    }

    fn current_theme(&self) -> ThemeColor {
        self.tx.borrow().clone()
    }
}

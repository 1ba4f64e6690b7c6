//! Page view that shows the greeting fetched from the API.
//!
//! The view owns a single state cell, written at most once by [`MessageView::mount`].
//! A failed fetch moves the view into [`ViewState::Failed`] but leaves the
//! displayed message empty, so the rendered page is an empty heading.

use tracing::{info, warn};

use super::http::ApiClient;
use crate::metrics;

/// State of the displayed message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing fetched yet.
    #[default]
    Empty,
    /// Greeting fetched successfully.
    Loaded(String),
    /// Fetch failed; holds the reason.
    Failed(String),
}

/// Single-page view rendering the API greeting.
#[derive(Debug, Default)]
pub struct MessageView {
    state: ViewState,
    mounted: bool,
}

impl MessageView {
    /// Create an unmounted view with an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the mount effect: fetch the greeting once.
    ///
    /// Only the first call performs a request; later calls return the
    /// existing state untouched.
    pub async fn mount(&mut self, client: &ApiClient) -> &ViewState {
        if self.mounted {
            return &self.state;
        }
        self.mounted = true;

        self.state = match client.fetch_root().await {
            Ok(message) => {
                info!(%message, "greeting loaded");
                ViewState::Loaded(message)
            }
            Err(e) => {
                warn!(error = %e, "failed to load greeting");
                metrics::inc_client_fetch_failures();
                ViewState::Failed(e.to_string())
            }
        };

        &self.state
    }

    /// Whether the mount effect has run.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The displayed message; empty unless a greeting was loaded.
    pub fn message(&self) -> &str {
        match &self.state {
            ViewState::Loaded(message) => message,
            ViewState::Empty | ViewState::Failed(_) => "",
        }
    }

    /// Error from the mount fetch, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Visible text of the rendered page.
    pub fn text_content(&self) -> &str {
        self.message()
    }

    /// Render the page markup.
    pub fn render(&self) -> String {
        format!("<h1>{}</h1>", htmlescape::encode_minimal(self.message()))
    }
}

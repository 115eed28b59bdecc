use crate::error::Result;

/// The capability a live browser tab offers the harvest pipeline.
///
/// The pipeline owns exactly one session for its lifetime and drives it
/// sequentially: navigate, run a script against the current page, read the
/// current URL. Scripts are self-contained expressions that re-query their
/// target elements, so no argument marshalling is needed.
#[async_trait::async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the tab to a URL and wait for the page to load.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Evaluate a JavaScript expression against the current page.
    ///
    /// The expression's value is returned as JSON; expressions evaluating
    /// to `undefined` yield `Value::Null`.
    async fn execute_script(&self, script: &str) -> Result<serde_json::Value>;

    /// The URL the tab is currently on.
    async fn current_url(&self) -> Result<String>;

    /// Shut the browser down. Called unconditionally when the pipeline ends.
    async fn quit(&mut self) -> Result<()>;
}

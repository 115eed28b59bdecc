use crate::error::{BrowserError, Result};
use crate::session::BrowserSession;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::time::Duration;

/// Chromium-backed implementation of [`BrowserSession`].
///
/// Owns one browser process and one page for its whole lifetime. The CDP
/// event handler runs on a spawned task and drains until the browser exits.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
}

impl BrowserEngine {
    /// Launch a browser process configured from [`mapscout_core::BrowserConfig`].
    pub async fn launch(config: &mapscout_core::BrowserConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.window_width, config.window_height)
            .request_timeout(Duration::from_secs(config.navigation_timeout_secs));
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Drain CDP events until the browser process exits
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::debug!(headless = config.headless, "browser engine launched");
        Ok(Self { browser, page })
    }
}

#[async_trait::async_trait]
impl BrowserSession for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?
            .ok_or_else(|| BrowserError::NavigationError("page has no URL".to_string()))
    }

    async fn quit(&mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        let _ = self.browser.wait().await;
        tracing::debug!("browser engine shut down");
        Ok(())
    }
}

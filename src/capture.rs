//! Browser capture collaborator.
//!
//! The pipeline only needs four things from the browser: render a URL into
//! visible text lines, click a tab by its label, re-capture the text after a
//! click, and grab a screenshot. Everything Chrome-specific stays behind the
//! `PageCapture` trait; tests drive the pipeline with scripted captures.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use tracing::{info, warn};

use crate::extract::classify::ClassifyPolicy;
use crate::extract::assemble_snapshot;
use crate::model::{Section, Snapshot};

/// Narrow interface over the headless browser. Implementations may block;
/// the monitor drives this from a blocking task.
pub trait PageCapture: Send {
    /// Navigate to `url`, wait for render, return the page's visible text
    /// split into lines.
    fn render(&mut self, url: &str) -> Result<Vec<String>>;

    /// Click the element whose visible text contains `label`. Returns
    /// whether a click landed; failure is degraded operation, not an error.
    fn click(&mut self, label: &str) -> bool;

    /// Re-capture the currently rendered page text without navigating.
    fn text(&mut self) -> Result<Vec<String>>;

    /// PNG screenshot of the current viewport.
    fn screenshot(&mut self) -> Result<Vec<u8>>;
}

/// One full scrape: render the page once, then walk the three section tabs,
/// re-capturing after each click. Returns the assembled snapshot and, when
/// available, a screenshot for the notification attachment.
pub fn scrape_snapshot(
    capture: &mut dyn PageCapture,
    policy: &dyn ClassifyPolicy,
    url: &str,
) -> Result<(Snapshot, Option<Vec<u8>>)> {
    let mut current = capture.render(url).context("render leaderboard page")?;

    let mut captures: Vec<(Section, Vec<String>)> = Vec::with_capacity(Section::ALL.len());
    for section in Section::ALL {
        if !capture.click(section.tab_label()) {
            warn!(section = %section, "tab click failed, extracting from current view");
        }
        match capture.text() {
            Ok(lines) => current = lines,
            Err(e) => {
                warn!(section = %section, error = %e, "re-capture failed, reusing last render");
            }
        }
        captures.push((section, current.clone()));
    }

    let screenshot = match capture.screenshot() {
        Ok(png) => Some(png),
        Err(e) => {
            warn!(error = %e, "screenshot failed");
            None
        }
    };

    let snapshot = assemble_snapshot(policy, url, &captures);
    for section in Section::ALL {
        let entries = snapshot.sections.get(section);
        if let Some(top) = entries.first() {
            info!(
                section = %section,
                count = entries.len(),
                top = %top.name,
                top_score = top.score,
                "section extracted"
            );
        }
    }
    info!(total = snapshot.total_entries(), "scrape finished");

    Ok((snapshot, screenshot))
}

/// `PageCapture` over a headless Chrome instance. Launched fresh per check
/// cycle and dropped when the cycle ends.
pub struct ChromeCapture {
    _browser: Browser,
    tab: Arc<Tab>,
    render_wait: Duration,
    click_wait: Duration,
}

impl ChromeCapture {
    pub fn launch() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((1920, 1200)))
            .idle_browser_timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| anyhow!("chrome launch options: {e}"))?;
        let browser = Browser::new(options).context("launch headless chrome")?;
        let tab = browser.new_tab().context("open tab")?;
        Ok(Self {
            _browser: browser,
            tab,
            render_wait: Duration::from_secs(8),
            click_wait: Duration::from_secs(2),
        })
    }

    fn body_text(&self) -> Result<Vec<String>> {
        let result = self
            .tab
            .evaluate("document.body.innerText", false)
            .context("read body text")?;
        let text = result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| anyhow!("body text was not a string"))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

impl PageCapture for ChromeCapture {
    fn render(&mut self, url: &str) -> Result<Vec<String>> {
        self.tab.navigate_to(url).context("navigate")?;
        self.tab.wait_until_navigated().context("wait for load")?;
        // Let client-side rendering settle, then scroll the charts into view
        std::thread::sleep(self.render_wait);
        let _ = self.tab.evaluate("window.scrollTo(0, 800)", false);
        std::thread::sleep(self.click_wait);
        self.body_text()
    }

    fn click(&mut self, label: &str) -> bool {
        let xpaths = [
            format!("//button[contains(text(), '{label}')]"),
            format!("//div[contains(text(), '{label}')]"),
            format!("//*[text()='{label}']"),
        ];
        for xpath in &xpaths {
            if let Ok(element) = self.tab.wait_for_xpath_with_custom_timeout(
                xpath,
                Duration::from_secs(3),
            ) {
                if element.click().is_ok() {
                    std::thread::sleep(self.click_wait);
                    return true;
                }
            }
        }
        false
    }

    fn text(&mut self) -> Result<Vec<String>> {
        self.body_text()
    }

    fn screenshot(&mut self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .context("capture screenshot")
    }
}

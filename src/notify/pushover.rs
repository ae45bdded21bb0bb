use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::{Notifier, MESSAGE_LIMIT};

const VALIDATE_URL: &str = "https://api.pushover.net/1/users/validate.json";
const MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";

#[derive(Clone)]
pub struct PushoverNotifier {
    token: String,
    user: String,
    client: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct PushoverResponse {
    status: i32,
    #[serde(default)]
    errors: Vec<String>,
}

impl PushoverNotifier {
    pub fn new(token: String, user: String) -> Self {
        Self {
            token,
            user,
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Verify the credentials against the Pushover validation endpoint.
    /// Called once at startup; failure is fatal before any cycle runs.
    pub async fn validate(&self) -> Result<()> {
        if self.token.is_empty() || self.user.is_empty() {
            bail!("PUSHOVER_USER_KEY and PUSHOVER_API_TOKEN must be set");
        }

        let resp = self
            .client
            .post(VALIDATE_URL)
            .timeout(Duration::from_secs(10))
            .form(&[("token", self.token.as_str()), ("user", self.user.as_str())])
            .send()
            .await
            .context("reach Pushover validation endpoint")?;

        let status = resp.status();
        let body: PushoverResponse = resp.json().await.context("parse validation response")?;
        if status.is_success() && body.status == 1 {
            info!("Pushover credentials validated");
            Ok(())
        } else {
            Err(anyhow!("invalid Pushover credentials: {:?}", body.errors))
        }
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn send(
        &self,
        title: &str,
        message: &str,
        priority: i8,
        image: Option<&[u8]>,
    ) -> Result<()> {
        // Transport limit; counted in characters like the API does
        let message: String = message.chars().take(MESSAGE_LIMIT).collect();

        let mut form = Form::new()
            .text("token", self.token.clone())
            .text("user", self.user.clone())
            .text("title", title.to_string())
            .text("message", message)
            .text("priority", priority.to_string());

        if let Some(png) = image {
            let part = Part::bytes(png.to_vec())
                .file_name("benchmark.png")
                .mime_str("image/png")
                .context("attachment mime")?;
            form = form.part("attachment", part);
        }

        let resp = self
            .client
            .post(MESSAGES_URL)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .context("send Pushover message")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Pushover error: {status} - {body}");
        }
        info!(title, "Pushover sent");
        Ok(())
    }
}

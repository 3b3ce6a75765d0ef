//! Chat backend adapter over the site's JSON endpoints.
//!
//! Uses browser `fetch()` via gloo-net, so requests carry the page's
//! session cookie. POSTs add the CSRF header the server expects.
//! Every request is raced against `request_timeout_ms`.

use std::future::Future;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

use chat_core::ports::ChatBackendPort;
use chat_types::{
    ChatError, Result,
    config::BackendConfig,
    conversation::ConversationSummary,
    message::Message,
    wire::{ErrorBody, HistoryResponse, SendReply, SendRequest, SendResponse, SessionResponse},
};
use crate::cookie::document_cookie;

pub struct HttpChatBackend {
    config: BackendConfig,
}

impl HttpChatBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Session URL with the id encoded as a single path segment
    pub fn session_endpoint(&self, conversation_id: &str) -> String {
        let segment = String::from(js_sys::encode_uri_component(conversation_id));
        self.config.session_url(&segment)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);
        let response = self
            .with_timeout(async {
                Request::get(url)
                    .header("Accept", "application/json")
                    .send()
                    .await
                    .map_err(|e| ChatError::Network(e.to_string()))
            })
            .await?;
        read_json(response).await
    }

    async fn with_timeout<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let ms = self.config.request_timeout_ms;
        if ms == 0 {
            return fut.await;
        }
        let timer = TimeoutFuture::new(u32::try_from(ms).unwrap_or(u32::MAX));
        futures::pin_mut!(fut, timer);
        match select(fut, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ChatError::Timeout(ms)),
        }
    }
}

#[async_trait(?Send)]
impl ChatBackendPort for HttpChatBackend {
    async fn send(&self, req: SendRequest) -> Result<SendReply> {
        let url = self.config.send_url();
        log::debug!("POST {} (conversation {:?})", url, req.conversation_id);

        let mut builder = Request::post(&url).header("Content-Type", "application/json");
        match document_cookie(&self.config.csrf_cookie) {
            Some(token) => builder = builder.header(&self.config.csrf_header, &token),
            None => log::warn!("No {} cookie; sending without CSRF header", self.config.csrf_cookie),
        }
        let request = builder
            .json(&req)
            .map_err(|e| ChatError::Serialization(e.to_string()))?;

        let response = self
            .with_timeout(async {
                request
                    .send()
                    .await
                    .map_err(|e| ChatError::Network(e.to_string()))
            })
            .await?;

        let body: SendResponse = read_json(response).await?;
        body.into_reply()
    }

    async fn history(&self) -> Result<Vec<ConversationSummary>> {
        let body: HistoryResponse = self.get_json(&self.config.history_url()).await?;
        body.into_summaries()
    }

    async fn session(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let body: SessionResponse = self
            .get_json(&self.session_endpoint(conversation_id))
            .await?;
        body.into_messages()
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))?;
    decode_body(status, &text)
}

/// Interpret a response body.
///
/// A non-2xx status is an application error when the server explained itself
/// with `{"error": ...}`, and a transport error otherwise.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
            log::warn!("Backend refused request (HTTP {}): {}", status, error);
            return Err(ChatError::Application(error));
        }
        return Err(ChatError::Network(format!("HTTP {}: {}", status, truncate(body, 200))));
    }
    Ok(serde_json::from_str(body)?)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

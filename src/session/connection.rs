//! Boundary to the remote debugging connection.
//!
//! Connecting to the browser and discovering the tab happen elsewhere; the
//! session only needs to send commands and listen to notifications.

use crate::utils::error::SessionError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

/// A DevTools protocol notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Protocol method, e.g. `Tracing.dataCollected`
    pub method: String,

    /// Notification parameters
    pub params: Value,
}

impl Notification {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Command and notification channel to one browser tab
#[async_trait]
pub trait DebugConnection: Send + Sync {
    /// Send a protocol command and wait for its response
    async fn send_command(&self, method: &str, params: Value) -> Result<Value, SessionError>;

    /// Subscribe to notifications sent after this call.
    ///
    /// Dropping the stream unsubscribes.
    fn subscribe(&self) -> BoxStream<'static, Notification>;
}

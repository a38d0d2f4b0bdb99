//! Announcement of the experimental protocol extensions this client handles.

use lsp_types::ClientCapabilities;
use serde_json::{Map, Value};
use tether_config::{Config, ExperimentalFeature, ExperimentalFeatures};
use tracing::debug;

use crate::CLIENT_TARGET;

/// Writes feature flags into the `experimental` capability namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilityAnnouncer {
    features: ExperimentalFeatures,
}

impl CapabilityAnnouncer {
    /// Builds an announcer for the supplied toggles.
    #[must_use]
    pub const fn new(features: ExperimentalFeatures) -> Self {
        Self { features }
    }

    /// Builds an announcer from client configuration.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::new(*config.experimental())
    }

    /// One boolean per feature, keyed by its protocol name.
    #[must_use]
    pub fn flags(&self) -> Map<String, Value> {
        ExperimentalFeature::ALL
            .into_iter()
            .map(|feature| {
                (
                    feature.key().to_owned(),
                    Value::Bool(self.features.is_enabled(feature)),
                )
            })
            .collect()
    }

    /// Merges the flags into `capabilities.experimental`.
    ///
    /// Keys already present in an `experimental` object are kept unless they
    /// name one of the announced features. A non-object value is replaced.
    pub fn announce(&self, capabilities: &mut ClientCapabilities) {
        let flags = self.flags();
        debug!(
            target: CLIENT_TARGET,
            flags = ?flags,
            "announcing experimental capabilities"
        );
        match capabilities.experimental.as_mut() {
            Some(Value::Object(existing)) => existing.extend(flags),
            _ => capabilities.experimental = Some(Value::Object(flags)),
        }
    }
}

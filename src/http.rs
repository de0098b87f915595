//! Shared HTTP agent

use std::sync::LazyLock;
use std::time::Duration;

use ureq::Agent;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Agent reused for every collection fetch (keeps connections pooled)
pub static HTTP_AGENT: LazyLock<Agent> = LazyLock::new(|| {
    Agent::config_builder()
        .timeout_global(Some(HTTP_TIMEOUT))
        .build()
        .into()
});

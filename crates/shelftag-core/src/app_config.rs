use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// The shop's myshopify domain, e.g. `"example.myshopify.com"`.
    pub shop_domain: String,
    /// Admin API version segment, e.g. `"2024-10"`.
    pub api_version: String,
    pub admin_token: String,
    /// Shared secret for webhook signature verification.
    pub webhook_secret: String,
    /// Public callback URL registered for the change-notification
    /// subscription, e.g. `"https://shelftag.example.com/webhooks/products-update"`.
    pub callback_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    /// Variants per enumeration page.
    pub page_size: u32,
    pub inter_page_delay_ms: u64,
    /// Pause after each classify-or-write sequence.
    pub inter_call_delay_ms: u64,
    /// How long a just-processed variant is exempt from reprocessing.
    pub cooldown_secs: u64,
    /// Maximum variant ids drained from the pending queue per tick.
    pub batch_size: usize,
    /// Seconds between queue drain ticks.
    pub batch_interval_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shop_domain", &self.shop_domain)
            .field("api_version", &self.api_version)
            .field("admin_token", &"[redacted]")
            .field("webhook_secret", &"[redacted]")
            .field("callback_url", &self.callback_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("page_size", &self.page_size)
            .field("inter_page_delay_ms", &self.inter_page_delay_ms)
            .field("inter_call_delay_ms", &self.inter_call_delay_ms)
            .field("cooldown_secs", &self.cooldown_secs)
            .field("batch_size", &self.batch_size)
            .field("batch_interval_secs", &self.batch_interval_secs)
            .finish()
    }
}

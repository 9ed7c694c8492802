use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by the Admin API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from the Admin API")]
    UnexpectedStatus { status: u16 },

    #[error("variant not found: {variant_id}")]
    NotFound { variant_id: String },

    #[error("response for {context} is missing expected data")]
    MissingData { context: String },

    #[error("GraphQL errors for {context}: {}", messages.join("; "))]
    GraphQl {
        context: String,
        messages: Vec<String>,
    },

    #[error("validation errors for {context}: {}", messages.join("; "))]
    UserErrors {
        context: String,
        messages: Vec<String>,
    },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid Admin API endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

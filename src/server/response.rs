//! What the core hands back to the HTTP layer.

/// Content type of every protocol response, including protocol errors.
pub const XML_CONTENT_TYPE: &str = "text/xml";
/// Content type of the opaque server-failure response.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Status, content type and body for one handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OaiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl OaiResponse {
    /// HTTP 200, used for successes and protocol errors alike.
    pub const OK: u16 = 200;
    /// HTTP 500, used only for system faults.
    pub const INTERNAL_SERVER_ERROR: u16 = 500;

    /// A protocol response carrying an XML document.
    pub fn xml(body: String) -> Self {
        Self {
            status: Self::OK,
            content_type: XML_CONTENT_TYPE,
            body,
        }
    }

    /// An opaque server failure. Carries no protocol XML.
    pub fn server_failure() -> Self {
        Self {
            status: Self::INTERNAL_SERVER_ERROR,
            content_type: TEXT_CONTENT_TYPE,
            body: "Internal Server Error".to_string(),
        }
    }

    pub fn is_server_failure(&self) -> bool {
        self.status >= 500
    }
}

//! Response envelope builder.
//!
//! Every OAI-PMH response shares the same skeleton: an `OAI-PMH` root with
//! three namespace attributes, a `responseDate`, and a `request` element
//! echoing the harvester's arguments. After the header comes either one
//! verb-named result element or one or more `error` elements, never both.
//!
//! # Examples
//!
//! ```rust
//! use oai_pmh_server::envelope::build_error;
//! use oai_pmh_server::{ErrorCode, RequestContext};
//!
//! let context = RequestContext::new([("verb", "Frobnicate")])
//!     .with_origin("http", "localhost:1337", "/");
//! let xml = build_error(&context, &[ErrorCode::BadVerb]).unwrap();
//! assert!(xml.contains(r#"<error code="badVerb">Illegal OAI verb</error>"#));
//! ```

mod content;
mod node;

pub use content::{Identification, PROTOCOL_VERSION, VerbResponse};
pub use node::{Element, XmlNode, is_xml_name};

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::exception::ErrorCode;
use crate::request::RequestContext;
use chrono::{DateTime, SecondsFormat, Utc};

/// Default namespace of every OAI-PMH response.
pub const OAI_NAMESPACE: &str = "http://www.openarchives.org/OAI/2.0/";
/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Schema location pinned to the OAI-PMH 2.0 schema.
pub const SCHEMA_LOCATION: &str =
    "http://www.openarchives.org/OAI/2.0/ http://www.openarchives.org/OAI/2.0/OAI-PMH.xsd";

/// What follows the envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeBody {
    Success(Element),
    /// Non-empty, in detection order
    Errors(Vec<ErrorCode>),
}

/// A fully assembled response document, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    response_date: DateTime<Utc>,
    request: Element,
    body: EnvelopeBody,
}

impl ResponseEnvelope {
    /// A success envelope carrying one verb result.
    ///
    /// # Errors
    ///
    /// Fails when the context cannot produce a canonical request URL.
    pub fn success(context: &RequestContext, content: &VerbResponse) -> EnvelopeResult<Self> {
        Ok(Self {
            response_date: Utc::now(),
            request: request_element(context, |_| true)?,
            body: EnvelopeBody::Success(content.to_element()),
        })
    }

    /// An error envelope carrying one `error` element per code.
    ///
    /// # Errors
    ///
    /// Fails when `codes` is empty or the context cannot produce a canonical
    /// request URL.
    pub fn error(context: &RequestContext, codes: &[ErrorCode]) -> EnvelopeResult<Self> {
        if codes.is_empty() {
            return Err(EnvelopeError::EmptyErrorList);
        }
        Ok(Self {
            response_date: Utc::now(),
            request: request_element(context, is_echoable)?,
            body: EnvelopeBody::Errors(codes.to_vec()),
        })
    }

    /// Replace the response timestamp.
    pub fn at(mut self, response_date: DateTime<Utc>) -> Self {
        self.response_date = response_date;
        self
    }

    pub fn response_date(&self) -> DateTime<Utc> {
        self.response_date
    }

    pub fn body(&self) -> &EnvelopeBody {
        &self.body
    }

    /// Whether this envelope reports protocol errors.
    pub fn is_error(&self) -> bool {
        matches!(self.body, EnvelopeBody::Errors(_))
    }

    /// The complete `OAI-PMH` root element.
    pub fn to_element(&self) -> Element {
        let root = Element::new("OAI-PMH")
            .with_attribute("xmlns", OAI_NAMESPACE)
            .with_attribute("xmlns:xsi", XSI_NAMESPACE)
            .with_attribute("xsi:schemaLocation", SCHEMA_LOCATION)
            .with_child(Element::text(
                "responseDate",
                self.response_date.to_rfc3339_opts(SecondsFormat::Secs, true),
            ))
            .with_child(self.request.clone());

        match &self.body {
            EnvelopeBody::Success(content) => root.with_child(content.clone()),
            EnvelopeBody::Errors(codes) => root.with_children(codes.iter().map(|code| {
                Element::text("error", code.message()).with_attribute("code", code.as_str())
            })),
        }
    }

    /// Serialize to an XML document string.
    pub fn to_xml(&self) -> EnvelopeResult<String> {
        self.to_element().to_document()
    }
}

/// Render a success response for `content`.
pub fn build_success(context: &RequestContext, content: &VerbResponse) -> EnvelopeResult<String> {
    ResponseEnvelope::success(context, content)?.to_xml()
}

/// Render an error response listing `codes`.
pub fn build_error(context: &RequestContext, codes: &[ErrorCode]) -> EnvelopeResult<String> {
    ResponseEnvelope::error(context, codes)?.to_xml()
}

fn request_element(
    context: &RequestContext,
    echo: impl Fn(&str) -> bool,
) -> EnvelopeResult<Element> {
    let url = context.canonical_url()?;
    Ok(context
        .parameters()
        .iter()
        .filter(|(name, _)| echo(name.as_str()))
        .fold(Element::new("request"), |element, (name, value)| {
            element.with_attribute(name, value)
        })
        .with_text(url))
}

/// Whether an argument name can be echoed as a `request` attribute.
///
/// Error responses may carry arguments the harvester made up. Names that
/// are not plain XML names, or that would bind a namespace prefix, are left
/// out of the echo.
fn is_echoable(name: &str) -> bool {
    is_xml_name(name)
        && !name.contains(':')
        && !name.get(..3).is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml"))
}

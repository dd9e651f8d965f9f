//! HTTP response types for the Trendyol API SDK.
//!
//! [`HttpResponse`] holds the status, headers and the body bytes exactly as
//! received. The [`FromResponse`] capability turns those bytes into the
//! caller's result type: [`Json<T>`] decodes, [`RawBody`] keeps the bytes
//! verbatim (e.g. ZPL shipping labels), and `()` discards the body.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// A response from the Trendyol API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The body bytes as received.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for statuses below 400.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code < 400
    }

    /// Returns the first value of a header (name is case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub(crate) fn collect_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Converts a successful response body into a result value.
///
/// Implemented for [`Json<T>`], [`RawBody`] and `()`.
pub trait FromResponse: Sized {
    /// Builds the value from the body bytes.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the bytes do not match the expected shape.
    fn from_body(body: Vec<u8>) -> Result<Self, serde_json::Error>;
}

/// A JSON-decoded response body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwraps the decoded value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned> FromResponse for Json<T> {
    fn from_body(body: Vec<u8>) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(&body).map(Json)
    }
}

/// A response body preserved byte-for-byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawBody(pub Vec<u8>);

impl RawBody {
    /// Unwraps the bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl FromResponse for RawBody {
    fn from_body(body: Vec<u8>) -> Result<Self, serde_json::Error> {
        Ok(Self(body))
    }
}

impl FromResponse for () {
    fn from_body(_body: Vec<u8>) -> Result<Self, serde_json::Error> {
        Ok(())
    }
}

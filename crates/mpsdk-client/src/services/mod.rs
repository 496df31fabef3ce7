//! One façade per marketplace area, each borrowing an [`HttpClient`].

mod basket;
mod catalog;
mod division;
mod order;
mod product;
mod promotion;
mod user;

#[cfg(test)]
mod fake;

use mpsdk_core::DomainError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

pub use basket::BasketService;
pub use catalog::CatalogService;
pub use division::DivisionService;
pub use order::OrderService;
pub use product::ProductService;
pub use promotion::PromotionService;
pub use user::UserService;

/// Unreserved characters (RFC 3986) pass through; everything else is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a caller-supplied path segment.
pub(crate) fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

pub(crate) fn to_json<T: Serialize>(value: &T, context: &str) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Serialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Status-specific remapping of transport errors. Every other error passes
/// through unchanged.
pub(crate) trait RemapStatus<T> {
    /// HTTP 404 becomes [`ClientError::NotFound`] with the given message.
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T, ClientError>;

    /// HTTP 400 becomes [`DomainError::SomeParametersAreInvalid`] carrying the
    /// response body.
    fn or_invalid_parameters(self) -> Result<T, ClientError>;
}

impl<T> RemapStatus<T> for Result<T, ClientError> {
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T, ClientError> {
        self.map_err(|err| match err {
            ClientError::Status { status: 404, .. } => ClientError::NotFound(what()),
            other => other,
        })
    }

    fn or_invalid_parameters(self) -> Result<T, ClientError> {
        self.map_err(|err| match err {
            ClientError::Status {
                status: 400, body, ..
            } => ClientError::Domain(DomainError::SomeParametersAreInvalid(body)),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> Result<(), ClientError> {
        Err(ClientError::Status {
            status,
            url: "http://localhost/x".to_owned(),
            body: "bad input".to_owned(),
        })
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("8_1_1_2_2"), "8_1_1_2_2");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("FR-75"), "FR-75");
    }

    #[test]
    fn not_found_remaps_only_404() {
        let err = status(404).or_not_found(|| "company #3 not found".to_owned());
        assert!(matches!(err, Err(ClientError::NotFound(ref m)) if m == "company #3 not found"));

        let err = status(500).or_not_found(|| unreachable!());
        assert!(matches!(err, Err(ClientError::Status { status: 500, .. })));
    }

    #[test]
    fn invalid_parameters_remaps_only_400() {
        let err = status(400).or_invalid_parameters();
        assert!(matches!(
            err,
            Err(ClientError::Domain(DomainError::SomeParametersAreInvalid(ref body))) if body == "bad input"
        ));

        let err = status(403).or_invalid_parameters();
        assert!(matches!(err, Err(ClientError::Status { status: 403, .. })));
    }
}

//! Conversions from external infrastructure errors into domain errors.

use picnic_domain::PicnicError;
use reqwest::{Error as HttpError, StatusCode};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PicnicError);

impl From<InfraError> for PicnicError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PicnicError> for InfraError {
    fn from(value: PicnicError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPicnicError {
    fn into_picnic(self) -> PicnicError;
}

/// Domain error for a non-success HTTP status
///
/// `detail` is the response body, appended when non-blank. The status code
/// always leads the message so session rejections stay recognisable.
pub fn status_error(status: StatusCode, detail: &str) -> PicnicError {
    let mut message = format!(
        "HTTP {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown status")
    );
    let detail = detail.trim();
    if !detail.is_empty() {
        message.push_str(": ");
        message.push_str(detail);
    }

    match status.as_u16() {
        401 | 403 => PicnicError::Authentication(message),
        _ => PicnicError::RemoteOperation(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PicnicError */
/* -------------------------------------------------------------------------- */

impl IntoPicnicError for HttpError {
    fn into_picnic(self) -> PicnicError {
        if self.is_timeout() {
            return PicnicError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PicnicError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_error(status, "");
        }

        if self.is_decode() {
            return PicnicError::RemoteOperation(format!("Invalid response body: {self}"));
        }

        PicnicError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_picnic())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::Client;
    use tokio::runtime::Runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn status_401_maps_to_authentication_error() {
        let mapped = status_error(StatusCode::UNAUTHORIZED, "");
        assert_eq!(mapped, PicnicError::Authentication("HTTP 401 Unauthorized".into()));
    }

    #[test]
    fn other_statuses_map_to_remote_operation_with_detail() {
        let mapped = status_error(StatusCode::BAD_REQUEST, " {\"error\":\"bad product\"} ");
        assert_eq!(
            mapped,
            PicnicError::RemoteOperation("HTTP 400 Bad Request: {\"error\":\"bad product\"}".into())
        );
    }

    #[test]
    fn http_status_403_from_reqwest_maps_to_authentication_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(StatusCode::FORBIDDEN))
                .mount(&server)
                .await;

            let client = Client::builder().no_proxy().build().unwrap();
            let error =
                client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

            let mapped: PicnicError = InfraError::from(error).into();
            match mapped {
                PicnicError::Authentication(msg) => assert!(msg.contains("403")),
                other => panic!("expected authentication error, got {:?}", other),
            }
        });
    }
}

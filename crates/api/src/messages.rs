//! Stock messages used by error responses.

/// Request used a method the route does not support.
pub const UNSUPPORTED_HTTP_REQUEST_METHOD: &str = "HTTP Request Method Not Supported";
/// Request body has an unsupported content type.
pub const UNSUPPORTED_CONTENT_TYPE: &str = "Content Type Not Supported";
/// Request body could not be read.
pub const INVALID_REQUEST_BODY: &str = "Invalid Request Body";
/// Caller lacks access to the resource.
pub const FORBIDDEN_ACCESS: &str = "You are not allowed to access this resource";
/// Outbound mail failed.
pub const FAILED_MAIL_DELIVERY: &str = "Mail delivery failed";
/// Caller identity could not be resolved.
pub const INVALID_USER: &str = "Invalid User";
/// Metadata key for the request path.
pub const PATH_URL: &str = "path";
/// One or more arguments failed validation.
pub const INVALID_ARGUMENTS: &str = "Invalid Arguments";
/// No route matched the request.
pub const NON_VALID_ROUTE_OR_ENDPOINT: &str = "The requested resource was not found on the server.";
/// Fallback message.
pub const DEFAULT_MESSAGE: &str = "An error has occurred";
/// Placeholder for an unknown variable.
pub const UNKNOWN_VARIABLE: &str = "Unknown";

/// A required query parameter is missing.
///
/// ```
/// use fleen_base_api::messages::missing_http_request_parameter;
///
/// assert_eq!(
///     missing_http_request_parameter("pageNo", "int"),
///     "Required parameter 'pageNo' of type 'int' is missing"
/// );
/// ```
#[must_use]
pub fn missing_http_request_parameter(name: &str, kind: &str) -> String {
    format!("Required parameter '{name}' of type '{kind}' is missing")
}

/// A required path variable is missing.
#[must_use]
pub fn missing_path_variable(name: &str) -> String {
    format!("Required parameter '{name}' is missing")
}

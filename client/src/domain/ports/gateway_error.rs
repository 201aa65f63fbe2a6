//! Failure taxonomy shared by every backend gateway port.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the job board backend.
    pub enum GatewayError {
        /// The backend answered with an error status and a readable message.
        Rejected { status: u16, message: String } =>
            "backend rejected request with status {status}: {message}",
        /// The backend answered with an error status and no readable message.
        Status { status: u16 } =>
            "backend returned status {status}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "backend transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "backend timeout: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } =>
            "backend response decode failed: {message}",
        /// The request could not be built.
        InvalidRequest { message: String } =>
            "backend request invalid: {message}",
    }
}

impl GatewayError {
    /// Message supplied by the backend, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status returned by the backend, if a response arrived.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn only_rejections_carry_a_server_message() {
        assert_eq!(
            GatewayError::rejected(401_u16, "Invalid credentials").server_message(),
            Some("Invalid credentials")
        );
        assert!(GatewayError::status(500_u16).server_message().is_none());
        assert!(GatewayError::timeout("slow").server_message().is_none());
    }

    #[rstest]
    #[case(GatewayError::rejected(404_u16, "gone"), Some(404))]
    #[case(GatewayError::status(502_u16), Some(502))]
    #[case(GatewayError::transport("reset"), None)]
    fn status_is_reported_when_a_response_arrived(
        #[case] error: GatewayError,
        #[case] expected: Option<u16>,
    ) {
        assert_eq!(error.http_status(), expected);
    }
}

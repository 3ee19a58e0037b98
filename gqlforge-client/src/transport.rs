//! The transport seam used by generated services
//!
//! Generated services never talk to the network themselves; they hand a
//! [`Request`] to a [`Transport`] and decode the `data` map it returns.

use crate::{ClientError, Request};
use serde_json::{Map, Value};

/// Sends requests and returns the decoded `data` map of the response
pub trait Transport {
    /// Sends `request` and returns the response data keyed by root field name.
    fn send(&self, request: &Request) -> Result<Map<String, Value>, ClientError>;
}

impl<F> Transport for F
where
    F: Fn(&Request) -> Result<Map<String, Value>, ClientError>,
{
    fn send(&self, request: &Request) -> Result<Map<String, Value>, ClientError> {
        tracing::debug!(kind = %request.kind, action = %request.action, "sending request");
        let response = self(request);
        if let Err(ref err) = response {
            tracing::debug!(action = %request.action, error = %err, "request failed");
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arguments;
    use std::cell::RefCell;

    #[test]
    fn test_closure_transport_receives_request() {
        let seen = RefCell::new(Vec::new());
        let transport = |request: &Request| -> Result<Map<String, Value>, ClientError> {
            seen.borrow_mut().push(request.to_document());
            let mut data = Map::new();
            data.insert("ping".to_string(), Value::String("pong".to_string()));
            Ok(data)
        };

        let response = transport
            .send(&Request::query("ping", Arguments::new(), None).unwrap())
            .unwrap();

        assert_eq!(response.get("ping"), Some(&Value::String("pong".to_string())));
        assert_eq!(seen.borrow().as_slice(), ["query { ping }".to_string()]);
    }

    #[test]
    fn test_transport_error_propagates() {
        let transport =
            |_: &Request| -> Result<Map<String, Value>, ClientError> { Err(ClientError::transport("offline")) };

        let err = transport
            .send(&Request::query("ping", Arguments::new(), None).unwrap())
            .unwrap_err();
        assert_eq!(err, ClientError::Transport("offline".to_string()));
    }
}

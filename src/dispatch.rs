//! Session-scoped command dispatch.
//!
//! [`Dispatcher::execute`] turns a [`Command`] plus an optional encoded body
//! into exactly one [`Request`], sends it through the [`Transport`], and
//! unwraps the `value` of the response envelope. The dispatcher keeps no
//! state between calls beyond the transport and the session id.

use serde::Serialize;
use serde_json::Value;

use crate::command::{Command, HttpMethod};
use crate::encode::to_json;
use crate::error::Error;
use crate::session::{ElementId, SessionId};
use crate::transport::{Request, Response, Transport};

pub struct Dispatcher<T> {
    transport: T,
    session: SessionId,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, session: SessionId) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `command` without sending it.
    ///
    /// GET commands never carry a body, even when one is given.
    pub fn build_request<B: Serialize>(
        &self,
        command: Command,
        element: Option<&ElementId>,
        body: Option<&B>,
    ) -> Result<Request, Error> {
        let path = command
            .resolve_path(&self.session, element)
            .ok_or(Error::EmptyIdentifier("element id"))?;
        let body = match (command.method(), body) {
            (HttpMethod::Get, _) | (_, None) => None,
            (HttpMethod::Post, Some(b)) => Some(to_json(b)?),
        };
        Ok(Request {
            method: command.method(),
            path,
            body,
        })
    }

    /// Send `command` and return the `value` of the response.
    pub async fn execute<B: Serialize>(
        &self,
        command: Command,
        element: Option<&ElementId>,
        body: Option<&B>,
    ) -> Result<Value, Error> {
        let request = self.build_request(command, element, body)?;
        tracing::debug!(
            command = %command,
            method = %request.method,
            path = %request.path,
            "dispatching command"
        );

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(command = %command, error = %e, "transport failed");
            e
        })?;

        decode_value(response).map_err(|e| {
            tracing::warn!(command = %command, error = %e, "command failed");
            e
        })
    }
}

/// Unwrap `value` from a response envelope.
///
/// Anything but a 2xx JSON object with a `value` member is a protocol error
/// carrying the status and raw body.
pub fn decode_value(response: Response) -> Result<Value, Error> {
    if !response.is_success() {
        return Err(protocol_error(response));
    }
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(mut envelope)) => match envelope.remove("value") {
            Some(value) => Ok(value),
            None => Err(protocol_error(response)),
        },
        _ => Err(protocol_error(response)),
    }
}

fn protocol_error(response: Response) -> Error {
    Error::Protocol {
        status: response.status,
        body: response.body,
    }
}

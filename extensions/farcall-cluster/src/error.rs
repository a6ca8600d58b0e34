use farcall::protocol::ProtocolError;
use farcall_registry::RegistryError;
use std::fmt;
use std::io;

/// Errors surfaced by the outbound call path.
///
/// Transport-level failures (`Io`, `Timeout`, `ConnectionClosed`) are what
/// retry strategies act on; everything else either short-circuits the call
/// or reports a terminal outcome.
#[derive(Debug)]
pub enum CallError {
    /// Connection or socket failure while talking to a provider.
    Io(io::Error),

    /// No response arrived within the call timeout.
    Timeout,

    /// The provider closed the connection before responding.
    ConnectionClosed,

    /// The response frame could not be decoded.
    Protocol(ProtocolError),

    /// The registry could not be queried.
    Discovery(RegistryError),

    /// Discovery returned zero instances; there is nothing to call.
    NoProvider,

    /// A frame of the wrong kind arrived in response position.
    UnexpectedMessage,

    /// The invoked method failed on the provider; the message is the
    /// carried application error.
    Application { message: String },

    /// The retry budget ran out; `last` is the final underlying failure.
    RetriesExhausted { attempts: usize, last: Box<CallError> },

    /// Every remaining candidate failed during fail-over.
    AllCandidatesFailed,

    /// No strategy implementation is registered under the requested key.
    UnknownVariant { kind: &'static str, key: String },
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Io(error) => write!(f, "transport I/O error: {}", error),
            CallError::Timeout => write!(f, "timed out waiting for response"),
            CallError::ConnectionClosed => {
                write!(f, "connection closed before a response arrived")
            }
            CallError::Protocol(error) => write!(f, "protocol error: {}", error),
            CallError::Discovery(error) => write!(f, "{}", error),
            CallError::NoProvider => write!(f, "no available provider"),
            CallError::UnexpectedMessage => {
                write!(f, "unexpected message kind in response position")
            }
            CallError::Application { message } => {
                write!(f, "remote invocation failed: {}", message)
            }
            CallError::RetriesExhausted { attempts, last } => {
                write!(f, "retries exhausted after {} attempts: {}", attempts, last)
            }
            CallError::AllCandidatesFailed => {
                write!(f, "every remaining candidate failed")
            }
            CallError::UnknownVariant { kind, key } => {
                write!(f, "no {} registered under key: {}", kind, key)
            }
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallError::Io(error) => Some(error),
            CallError::Protocol(error) => Some(error),
            CallError::Discovery(error) => Some(error),
            CallError::RetriesExhausted { last, .. } => Some(last.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for CallError {
    fn from(error: io::Error) -> Self {
        CallError::Io(error)
    }
}

impl From<ProtocolError> for CallError {
    fn from(error: ProtocolError) -> Self {
        CallError::Protocol(error)
    }
}

impl From<RegistryError> for CallError {
    fn from(error: RegistryError) -> Self {
        CallError::Discovery(error)
    }
}

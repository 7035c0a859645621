//! gRPC status codes and the [`Status`] error.
//!
//! Interceptors fail a call by returning a [`Status`]. The code tells the
//! caller what kind of failure it was; the message is for humans.
//!
//! ```rust
//! use interpose::{Code, Status};
//!
//! let status = Status::unauthenticated("missing token");
//! assert_eq!(status.code(), Code::Unauthenticated);
//! assert_eq!(status.to_string(), "unauthenticated: missing token");
//! ```

use std::fmt;

/// The canonical gRPC status codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Code {
    Ok,                 // 0
    Cancelled,          // 1
    Unknown,            // 2
    InvalidArgument,    // 3
    DeadlineExceeded,   // 4
    NotFound,           // 5
    AlreadyExists,      // 6
    PermissionDenied,   // 7
    ResourceExhausted,  // 8
    FailedPrecondition, // 9
    Aborted,            // 10
    OutOfRange,         // 11
    Unimplemented,      // 12
    Internal,           // 13
    Unavailable,        // 14
    DataLoss,           // 15
    Unauthenticated,    // 16
}

impl Code {
    /// Lower-case wire name, as used in logs (e.g. `"deadline_exceeded"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok                 => "ok",
            Self::Cancelled          => "cancelled",
            Self::Unknown            => "unknown",
            Self::InvalidArgument    => "invalid_argument",
            Self::DeadlineExceeded   => "deadline_exceeded",
            Self::NotFound           => "not_found",
            Self::AlreadyExists      => "already_exists",
            Self::PermissionDenied   => "permission_denied",
            Self::ResourceExhausted  => "resource_exhausted",
            Self::FailedPrecondition => "failed_precondition",
            Self::Aborted            => "aborted",
            Self::OutOfRange         => "out_of_range",
            Self::Unimplemented      => "unimplemented",
            Self::Internal           => "internal",
            Self::Unavailable        => "unavailable",
            Self::DataLoss           => "data_loss",
            Self::Unauthenticated    => "unauthenticated",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Code> for i32 {
    fn from(code: Code) -> i32 {
        match code {
            Code::Ok                 => 0,
            Code::Cancelled          => 1,
            Code::Unknown            => 2,
            Code::InvalidArgument    => 3,
            Code::DeadlineExceeded   => 4,
            Code::NotFound           => 5,
            Code::AlreadyExists      => 6,
            Code::PermissionDenied   => 7,
            Code::ResourceExhausted  => 8,
            Code::FailedPrecondition => 9,
            Code::Aborted            => 10,
            Code::OutOfRange         => 11,
            Code::Unimplemented      => 12,
            Code::Internal           => 13,
            Code::Unavailable        => 14,
            Code::DataLoss           => 15,
            Code::Unauthenticated    => 16,
        }
    }
}

/// Numbers outside `0..=16` map to [`Code::Unknown`].
impl From<i32> for Code {
    fn from(value: i32) -> Self {
        match value {
            0  => Self::Ok,
            1  => Self::Cancelled,
            3  => Self::InvalidArgument,
            4  => Self::DeadlineExceeded,
            5  => Self::NotFound,
            6  => Self::AlreadyExists,
            7  => Self::PermissionDenied,
            8  => Self::ResourceExhausted,
            9  => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _  => Self::Unknown,
        }
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

/// The error half of a unary call: a [`Code`] plus a message.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Status {
    code: Code,
    message: String,
}

macro_rules! constructors {
    ($($name:ident => $code:ident),* $(,)?) => {
        $(
            #[doc = concat!("A status with [`Code::", stringify!($code), "`].")]
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(Code::$code, message)
            }
        )*
    };
}

impl Status {
    /// A status with an explicit code.
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn code(&self) -> Code { self.code }
    pub fn message(&self) -> &str { &self.message }

    constructors! {
        cancelled           => Cancelled,
        unknown             => Unknown,
        invalid_argument    => InvalidArgument,
        deadline_exceeded   => DeadlineExceeded,
        not_found           => NotFound,
        already_exists      => AlreadyExists,
        permission_denied   => PermissionDenied,
        resource_exhausted  => ResourceExhausted,
        failed_precondition => FailedPrecondition,
        aborted             => Aborted,
        out_of_range        => OutOfRange,
        unimplemented       => Unimplemented,
        internal            => Internal,
        unavailable         => Unavailable,
        data_loss           => DataLoss,
        unauthenticated     => Unauthenticated,
    }
}

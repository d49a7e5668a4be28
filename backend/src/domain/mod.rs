//! Domain primitives, ports and services.
//!
//! Purpose: model the role-based session flow and the navigation shell
//! independently of HTTP. Types validate their invariants on construction
//! and document their serialisation contracts (serde) in their Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Role, User, Session: who is signed in and as what.
//! - SessionService: set_role, login, verify_otp and logout.
//! - navigation: route table, guard and bottom bar.

pub mod auth;
pub mod error;
pub mod navigation;
pub mod ports;
pub mod role;
pub mod session;
pub mod session_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    ContactNumber, DEMO_BYPASS_CODE, LoginValidationError, OTP_LENGTH, OtpAcceptance, OtpCode,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::role::{Role, UnknownRole};
pub use self::session::{Session, SessionPhase};
pub use self::session_service::{INCORRECT_CODE_MESSAGE, SessionService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserId, UserValidationError};

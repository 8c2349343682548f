//! Debugger-facing variable inspection.
//!
//! The formatter only sees a descriptor and a raw value. This module is the
//! layer around it: resolving descriptors once per type, keeping a frame of
//! variables, and answering client requests with the formatted text placed
//! verbatim in the reply.
//!
//! # Quick-start
//!
//! ```rust
//! use enumscope_runtime::debugger::InspectionSession;
//! use enumscope_runtime::{EnumFormatter, EnumTypeDescriptor, IntegerRepr};
//!
//! let resolver = |name: &str| {
//!     EnumTypeDescriptor::builder(name, IntegerRepr::I32)
//!         .flags(true)
//!         .member("read", 1)
//!         .member("write", 2)
//!         .build()
//! };
//! let mut session = InspectionSession::new(resolver, EnumFormatter::new());
//! session.add_variable("mode", "FileAccess", 3);
//!
//! let reply = session.handle_mi_line(r#"-var-create - * "mode""#);
//! assert!(reply.text.contains(r#"value="read | write""#));
//! ```

pub mod inspection;
pub mod protocol;
pub mod session;

pub use inspection::{ConfigCatalog, DescriptorCache, Inspector, TypeResolver};
pub use protocol::{parse_mi_command, MiCommand, MiRecord, MiRequest, VarObject, Variable};
pub use session::{FrameVariable, InspectionSession, MiReply};

use thiserror::Error;

use crate::descriptor::DescriptorError;

/// Errors answering an inspection request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    #[error("No symbol \"{0}\" in current context.")]
    UnknownVariable(String),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

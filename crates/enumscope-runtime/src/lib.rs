//! Enumscope runtime
//!
//! Presentation of enumeration-typed values for debuggers: given the resolved
//! metadata of an enum type and a raw integral value read from the debuggee,
//! produce the text a user sees when inspecting the variable.
//!
//! ```rust
//! use enumscope_runtime::{format_enum, EnumTypeDescriptor, IntegerRepr};
//!
//! let access = EnumTypeDescriptor::builder("FileAccess", IntegerRepr::I32)
//!     .flags(true)
//!     .member("append", 4)
//!     .member("write", 2)
//!     .member("read", 1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(format_enum(&access, 2), "write");
//! assert_eq!(format_enum(&access, 7), "read | write | append");
//! assert_eq!(format_enum(&access, 0), "0");
//! assert_eq!(format_enum(&access, 101), "101");
//! ```

pub mod debugger;
pub mod descriptor;
pub mod formatter;
pub mod numeral;
pub mod value;

pub use descriptor::{DescriptorError, EnumMember, EnumTypeBuilder, EnumTypeDescriptor};
pub use formatter::{format_enum, EnumFormatter, FormatPath, Formatted};
pub use value::{IntegerRepr, RawEnumValue, Width};

//! Enumtable - immutable, richly-annotated enumerations
//!
//! Enumtable builds immutable enumeration objects from plain declarative
//! maps, providing value lookup, text lookup, iteration, and an extension
//! mechanism that derives new enumerations with added or overridden
//! metadata.
//!
//! # Architecture
//!
//! One small component over one underlying table:
//!
//! - [`definition`] - The declarative input: [`EnumDefinition`] and [`EntrySpec`]
//! - [`value`] - [`EnumValue`], the comparable value keying derived tables
//! - [`entry`] - [`EnumEntry`], the canonical per-key record
//! - [`enumeration`] - [`Enumeration`]: construction, views, extension, identity
//!
//! # Correctness Invariants
//!
//! 1. Every entry's value is defined and non-null at construction time;
//!    construction fails before any partial enumeration is visible
//! 2. Iteration and collection order equal definition order
//! 3. Enumerations are deeply immutable once built; extension always
//!    produces a new enumeration and never touches the source
//! 4. When two entries share a value, the later one in definition order
//!    owns the slot in every value-keyed table
//!
//! # Example
//!
//! ```
//! use enumtable::{EnumDefinition, EnumValue};
//! use serde_json::json;
//!
//! let e = EnumDefinition::new()
//!     .pair("TYPE_A", 0, "Type A")
//!     .pair("TYPE_B", 1, "Type B")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(e.value("TYPE_A"), Some(&EnumValue::from(0)));
//! assert_eq!(e.text(&EnumValue::from(1)), Some(&json!("Type B")));
//!
//! // Derive a richer enumeration; the original stays untouched.
//! let e2 = e
//!     .extend(
//!         &EnumDefinition::new()
//!             .entry("TYPE_A", json!({ "extra": "Extra Information" }))
//!             .entry("TYPE_C", json!({ "value": 2 })),
//!     )
//!     .unwrap();
//!
//! assert_eq!(e2.get("TYPE_A").unwrap().field("extra"), Some(&json!("Extra Information")));
//! assert_eq!(e.get("TYPE_A").unwrap().field("extra"), None);
//! ```

pub mod definition;
pub mod entry;
pub mod enumeration;
pub mod value;

pub use definition::{EntrySpec, EnumDefinition};
pub use entry::EnumEntry;
pub use enumeration::{extend, is_enumeration, DefinitionError, Enumeration};
pub use value::EnumValue;

//! Casewise converts the case of text and capitalizes sentence starts while
//! typing.
//!
//! The two pure entry points are [`convert`], which applies a
//! [`CaseOperation`] to a piece of text, and [`evaluate`], which decides
//! whether the character just typed before the caret begins a new sentence.
//! Everything else models the surfaces and settings they are driven by.
//!
//! # Example
//!
//! ```
//! use casewise::{CaseOperation, convert, evaluate};
//!
//! assert_eq!(convert("hello world", CaseOperation::TitleCase), "Hello World");
//! assert!(evaluate("Hello. w").should_capitalize());
//! ```

pub mod broadcast;
pub mod case;
pub mod config;
pub mod context;
pub mod popup;
pub mod sentence;
pub mod settings;
pub mod surface;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use broadcast::{BroadcastReport, ContextId, SettingsHub};
pub use case::{CaseError, CaseOperation, TextSpan, convert, convert_span, convert_tagged};
pub use config::{Config, ConfigError};
pub use context::{AutoCapitalize, ConversionOutcome, ConversionRequest, EditingContext};
pub use popup::PopupForm;
pub use sentence::{CapitalizeDecision, CaretContext, evaluate};
pub use settings::{
    FileStore, MemoryStore, Settings, SettingsError, SettingsStore, SettingsUpdate,
};
pub use surface::{EditableSurface, NodePosition, PlainField, RichRegion, SurfaceError};


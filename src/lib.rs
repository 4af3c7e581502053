pub mod browser;
pub mod classify;
pub mod config;
pub mod element;
pub mod error;
pub mod field;
pub mod fill;
pub mod page;
pub mod report;
pub mod sample;
pub mod scan;
pub mod session;
pub mod stealth;
pub mod submit;
pub mod surface;
pub mod synth;
pub mod url;

pub use browser::FormBrowser;
pub use classify::{classify, SemanticType};
pub use config::{BrowserConfig, FillerConfig};
pub use error::{Error, Result};
pub use field::{FieldDescriptor, FieldKind};
pub use fill::FormFiller;
pub use page::Page;
pub use report::{FailurePolicy, FillOutcome, RunLedger, RunSummary};
pub use surface::Surface;

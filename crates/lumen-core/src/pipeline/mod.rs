//! The builder / snapshot object model.
//!
//! A [`Builder`] is a short-lived staging object that exclusively owns its
//! working image and replaces it on each transform. [`Builder::build`]
//! freezes the result into a [`Snapshot`], an immutable shared handle that
//! can seed any number of new builders (fan-out) without copying pixels.
//!
//! ```text
//! LoadSource ──load──▶ Builder ──transform*──▶ Builder ──build──▶ Snapshot
//!                         ▲                                         │
//!                         └──────────────── load(snapshot) ─────────┘
//! ```

mod builder;
mod operation;
mod options;
mod snapshot;
mod source;

pub use builder::Builder;
pub use operation::Operation;
pub use options::PipelineOptions;
pub use snapshot::Snapshot;
pub use source::LoadSource;

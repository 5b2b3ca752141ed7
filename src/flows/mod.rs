//! Multi-step flows: the node-claim wizard, checkout and order progress.
//!
//! Everything here is UI-agnostic state. The TUI screens in `crate::ui` own an
//! instance of a flow, forward edits to it and render what it reports.

pub mod checkout;
pub mod claim;
mod deferred;
mod error;
pub mod progress;
mod sequencer;

pub use checkout::{CheckoutFlow, CheckoutSeed, OrderDraft, OrderQuote, CHECKOUT_STEPS};
pub use claim::{can_advance, ClaimField, ClaimForm, ClaimWizard, FieldValue, CLAIM_STEPS};
pub use deferred::{resolve_slot, Deferred};
pub use error::FlowError;
pub use progress::{milestones, Milestone, MilestoneState};
pub use sequencer::{StepSequencer, StepStatus};

//! Node-claim wizard: five linear steps gated on required-field presence.
//!
//! Step 1 collects node information, step 2 connection details, step 3 an
//! ownership signature, step 4 terms and listing preferences, and step 5 is a
//! review with the final "Claim" action. Verification is presence-only; nothing
//! here checks key formats, addresses or signatures.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{Deferred, FlowError, StepSequencer};
use crate::types::{Btc, Node, NodeStatus};

mod fields;

pub use fields::{location_label, ClaimField, FieldValue, DEFAULT_PORT, NODE_LOCATIONS};

#[cfg(test)]
mod tests;

pub const CLAIM_STEPS: usize = 5;

/// Titles shown in the progress strip
pub const STEP_TITLES: [&str; CLAIM_STEPS] = [
    "Node Information",
    "Technical Details",
    "Verification",
    "Configuration",
    "Complete",
];

/// One-line guidance for each step
pub const STEP_DESCRIPTIONS: [&str; CLAIM_STEPS] = [
    "Provide basic information about your Lightning Network node",
    "Enter technical details and connection information",
    "Verify ownership of your node",
    "Configure your node settings",
    "Review and complete your node claim",
];

/// Field name to value mapping backing the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimForm {
    values: BTreeMap<ClaimField, FieldValue>,
}

impl Default for ClaimForm {
    fn default() -> Self {
        Self {
            values: ClaimField::all()
                .iter()
                .map(|f| (*f, f.default_value()))
                .collect(),
        }
    }
}

impl ClaimForm {
    pub fn get(&self, field: ClaimField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Text of a field, empty for flags
    pub fn text(&self, field: ClaimField) -> &str {
        self.get(field)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    /// Value of a checkbox, false for text fields
    pub fn flag(&self, field: ClaimField) -> bool {
        self.get(field).and_then(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn is_present(&self, field: ClaimField) -> bool {
        self.get(field).is_some_and(FieldValue::is_present)
    }

    /// Replace a field's value. The value kind must match the field.
    pub fn set(&mut self, field: ClaimField, value: impl Into<FieldValue>) -> Result<(), FlowError> {
        let value = value.into();
        let kind_matches = match &value {
            FieldValue::Flag(_) => field.is_flag(),
            FieldValue::Text(_) => !field.is_flag(),
        };
        if !kind_matches {
            return Err(FlowError::FieldType {
                field: field.key(),
                expected: if field.is_flag() { "boolean" } else { "text" },
            });
        }
        self.values.insert(field, value);
        Ok(())
    }

    /// Set a field addressed by its string key (`nodeName`, `acceptTOS`, ...)
    pub fn set_by_key(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<(), FlowError> {
        let field: ClaimField = key.parse()?;
        self.set(field, value)
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ClaimField, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// Fields that must be present before leaving `step`
pub fn required_fields(step: usize) -> &'static [ClaimField] {
    match step {
        1 => &[ClaimField::NodeName, ClaimField::NodeAlias],
        2 => &[ClaimField::Pubkey, ClaimField::IpAddress],
        3 => &[ClaimField::Signature],
        4 => &[ClaimField::AcceptTos],
        _ => &[],
    }
}

/// Whether "Next" (or "Claim" on the last step) is enabled.
///
/// Pure: depends only on the step and the form values. Steps outside
/// `1..=CLAIM_STEPS` never advance.
pub fn can_advance(step: usize, form: &ClaimForm) -> bool {
    (1..=CLAIM_STEPS).contains(&step)
        && required_fields(step).iter().all(|f| form.is_present(*f))
}

/// Labels of the required fields still missing on `step`
pub fn missing_fields(step: usize, form: &ClaimForm) -> Vec<&'static str> {
    required_fields(step)
        .iter()
        .filter(|f| !form.is_present(**f))
        .map(ClaimField::label)
        .collect()
}

/// Wizard state: current step, the form, and the one-way completion flag.
#[derive(Debug, Clone)]
pub struct ClaimWizard {
    sequencer: StepSequencer,
    form: ClaimForm,
    is_complete: bool,
}

impl ClaimWizard {
    /// Start a claim. `now` stamps the ownership message the user must sign.
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut form = ClaimForm::default();
        form.values.insert(
            ClaimField::SignatureMessage,
            FieldValue::Text(signature_message(now)),
        );
        Self {
            sequencer: StepSequencer::new(CLAIM_STEPS),
            form,
            is_complete: false,
        }
    }

    pub fn current_step(&self) -> usize {
        self.sequencer.current()
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn form(&self) -> &ClaimForm {
        &self.form
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Update one field. Rejected once the claim has been confirmed.
    pub fn update_field(
        &mut self,
        field: ClaimField,
        value: impl Into<FieldValue>,
    ) -> Result<(), FlowError> {
        if self.is_complete {
            return Err(FlowError::AlreadyComplete);
        }
        if field == ClaimField::SignatureMessage {
            return Err(FlowError::ReadOnlyField(field.key()));
        }
        self.form.set(field, value)
    }

    pub fn can_advance(&self) -> bool {
        can_advance(self.current_step(), &self.form)
    }

    /// Go to the next step if the gate is open.
    ///
    /// Returns `Ok(false)` on the last step, where "Claim" replaces "Next".
    pub fn next(&mut self) -> Result<bool, FlowError> {
        if self.is_complete {
            return Err(FlowError::AlreadyComplete);
        }
        let step = self.current_step();
        if !can_advance(step, &self.form) {
            return Err(FlowError::StepIncomplete {
                step,
                missing: missing_fields(step, &self.form),
            });
        }
        let moved = self.sequencer.advance();
        if moved {
            tracing::debug!(from = step, to = self.current_step(), "claim wizard advanced");
        }
        Ok(moved)
    }

    /// Go back one step. No-op on the first step or after completion.
    pub fn back(&mut self) -> bool {
        if self.is_complete {
            return false;
        }
        self.sequencer.retreat()
    }

    /// Final "Claim" action on the review step.
    ///
    /// Marks the wizard complete and returns the claimed node, released to the
    /// caller once `delay` has elapsed.
    pub fn confirm(&mut self, now: DateTime<Utc>, delay: Duration) -> Result<Deferred<Node>, FlowError> {
        if self.is_complete {
            return Err(FlowError::AlreadyComplete);
        }
        if !self.sequencer.is_last() {
            return Err(FlowError::WrongStep {
                expected: CLAIM_STEPS,
                current: self.current_step(),
            });
        }

        self.is_complete = true;
        let node = self.claimed_node(now);
        tracing::info!(
            node_id = node.id,
            alias = %node.alias,
            delay_ms = delay.as_millis() as u64,
            "node claim confirmed"
        );
        Ok(Deferred::new(node, delay))
    }

    /// The node record a confirmed claim produces
    pub fn claimed_node(&self, now: DateTime<Utc>) -> Node {
        let location = self.form.text(ClaimField::NodeLocation);
        Node {
            id: now.timestamp_millis().unsigned_abs(),
            name: self.form.text(ClaimField::NodeName).trim().to_string(),
            alias: self.form.text(ClaimField::NodeAlias).trim().to_string(),
            pubkey: self.form.text(ClaimField::Pubkey).trim().to_string(),
            status: NodeStatus::Online,
            capacity: Btc::ZERO,
            channels: 0,
            uptime_pct: Decimal::from(100),
            location: location_label(location).to_string(),
            fees: "0%".to_string(),
            last_update: "just now".to_string(),
            is_owned: true,
        }
    }
}

/// Message the node operator signs to prove ownership
pub fn signature_message(now: DateTime<Utc>) -> String {
    format!("orange-pages-claim-{}", now.timestamp_millis())
}

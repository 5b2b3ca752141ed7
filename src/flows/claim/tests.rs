//! Tests for the node-claim wizard

use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};

use super::*;
use crate::types::NodeStatus;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 19, 14, 30, 0).unwrap()
}

fn filled_form() -> ClaimForm {
    let mut form = ClaimForm::default();
    form.set(ClaimField::NodeName, "N1").unwrap();
    form.set(ClaimField::NodeAlias, "n1").unwrap();
    form.set(ClaimField::Pubkey, "02aa").unwrap();
    form.set(ClaimField::IpAddress, "1.2.3.4").unwrap();
    form.set(ClaimField::Signature, "sig").unwrap();
    form.set(ClaimField::AcceptTos, true).unwrap();
    form
}

fn fill_wizard(wizard: &mut ClaimWizard) {
    for (field, value) in filled_form().iter() {
        if field != ClaimField::SignatureMessage {
            wizard.update_field(field, value.clone()).unwrap();
        }
    }
}

// ─── Step Gate ──────────────────────────────────────────────────────────────

#[test]
fn test_gate_step_one_requires_name_and_alias() {
    let mut form = ClaimForm::default();
    assert!(!can_advance(1, &form));

    form.set(ClaimField::NodeName, "N1").unwrap();
    assert!(!can_advance(1, &form));

    form.set(ClaimField::NodeAlias, "n1").unwrap();
    assert!(can_advance(1, &form));
}

#[test]
fn test_gate_step_two_requires_pubkey_and_ip() {
    let mut form = ClaimForm::default();
    assert!(!can_advance(2, &form));

    form.set(ClaimField::Pubkey, "02aa").unwrap();
    assert!(!can_advance(2, &form));

    form.set(ClaimField::IpAddress, "1.2.3.4").unwrap();
    assert!(can_advance(2, &form));
}

#[test]
fn test_gate_step_three_requires_signature() {
    let mut form = ClaimForm::default();
    assert!(!can_advance(3, &form));

    form.set(ClaimField::Signature, "sig").unwrap();
    assert!(can_advance(3, &form));
}

#[test]
fn test_gate_step_four_requires_accepted_terms() {
    let mut form = ClaimForm::default();
    assert!(!can_advance(4, &form));

    form.set(ClaimField::AcceptTos, true).unwrap();
    assert!(can_advance(4, &form));

    form.set(ClaimField::AcceptTos, false).unwrap();
    assert!(!can_advance(4, &form));
}

#[test]
fn test_gate_final_step_is_always_open() {
    assert!(can_advance(5, &ClaimForm::default()));
}

#[test]
fn test_gate_rejects_out_of_range_steps() {
    let form = filled_form();
    assert!(!can_advance(0, &form));
    assert!(!can_advance(6, &form));
}

#[test]
fn test_gate_treats_whitespace_as_empty() {
    let mut form = ClaimForm::default();
    form.set(ClaimField::NodeName, "   ").unwrap();
    form.set(ClaimField::NodeAlias, "n1").unwrap();
    assert!(!can_advance(1, &form));
}

#[test]
fn test_gate_is_idempotent() {
    let form = filled_form();
    for step in 1..=CLAIM_STEPS {
        assert_eq!(can_advance(step, &form), can_advance(step, &form));
    }
    let empty = ClaimForm::default();
    assert_eq!(can_advance(1, &empty), can_advance(1, &empty));
    assert_eq!(empty, ClaimForm::default());
}

#[test]
fn test_missing_fields_lists_labels() {
    let mut form = ClaimForm::default();
    form.set(ClaimField::NodeAlias, "n1").unwrap();
    assert_eq!(missing_fields(1, &form), vec!["Node Name"]);
}

// ─── Form State ─────────────────────────────────────────────────────────────

#[test]
fn test_form_defaults() {
    let form = ClaimForm::default();
    assert_eq!(form.text(ClaimField::Port), "9735");
    assert!(!form.flag(ClaimField::AcceptTos));
    assert!(form.flag(ClaimField::EnablePublicListing));
    assert!(form.flag(ClaimField::EnableAutoUpdate));
    assert_eq!(form.text(ClaimField::NodeName), "");
}

#[test]
fn test_form_rejects_mismatched_value_kind() {
    let mut form = ClaimForm::default();
    assert_eq!(
        form.set(ClaimField::AcceptTos, "yes"),
        Err(FlowError::FieldType {
            field: "acceptTOS",
            expected: "boolean"
        })
    );
    assert!(form.set(ClaimField::NodeName, true).is_err());
}

#[test]
fn test_form_set_by_key() {
    let mut form = ClaimForm::default();
    form.set_by_key("nodeAlias", "alpha").unwrap();
    assert_eq!(form.text(ClaimField::NodeAlias), "alpha");
    assert_eq!(
        form.set_by_key("nickname", "x"),
        Err(FlowError::UnknownField("nickname".to_string()))
    );
}

// ─── Sequencing ─────────────────────────────────────────────────────────────

#[test]
fn test_next_blocked_by_gate() {
    let mut wizard = ClaimWizard::new(fixed_now());
    let err = wizard.next().unwrap_err();
    assert!(matches!(err, FlowError::StepIncomplete { step: 1, .. }));
    assert_eq!(wizard.current_step(), 1);
}

#[test]
fn test_back_on_first_step_is_noop() {
    let mut wizard = ClaimWizard::new(fixed_now());
    assert!(!wizard.back());
    assert_eq!(wizard.current_step(), 1);
}

#[test]
fn test_next_on_final_step_is_noop() {
    let mut wizard = ClaimWizard::new(fixed_now());
    fill_wizard(&mut wizard);
    for _ in 1..CLAIM_STEPS {
        assert!(wizard.next().unwrap());
    }
    assert_eq!(wizard.current_step(), 5);
    assert!(!wizard.next().unwrap());
    assert_eq!(wizard.current_step(), 5);
}

#[test]
fn test_back_keeps_entered_values() {
    let mut wizard = ClaimWizard::new(fixed_now());
    fill_wizard(&mut wizard);
    wizard.next().unwrap();
    assert!(wizard.back());
    assert_eq!(wizard.current_step(), 1);
    assert_eq!(wizard.form().text(ClaimField::NodeName), "N1");
}

#[test]
fn test_signature_message_is_stamped() {
    let wizard = ClaimWizard::new(fixed_now());
    assert_eq!(
        wizard.form().text(ClaimField::SignatureMessage),
        format!("orange-pages-claim-{}", fixed_now().timestamp_millis())
    );
}

#[test]
fn test_signature_message_is_not_editable() {
    let mut wizard = ClaimWizard::new(fixed_now());
    let before = wizard.form().text(ClaimField::SignatureMessage).to_string();
    assert_eq!(
        wizard.update_field(ClaimField::SignatureMessage, "forged"),
        Err(FlowError::ReadOnlyField("signatureMessage"))
    );
    assert_eq!(wizard.form().text(ClaimField::SignatureMessage), before);
}

// ─── Completion ─────────────────────────────────────────────────────────────

#[test]
fn test_confirm_before_final_step_fails() {
    let mut wizard = ClaimWizard::new(fixed_now());
    fill_wizard(&mut wizard);
    let err = wizard
        .confirm(fixed_now(), Duration::from_millis(2000))
        .unwrap_err();
    assert_eq!(
        err,
        FlowError::WrongStep {
            expected: 5,
            current: 1
        }
    );
    assert!(!wizard.is_complete());
}

#[test]
fn test_claim_produces_owned_online_node_after_delay() {
    let mut wizard = ClaimWizard::new(fixed_now());
    fill_wizard(&mut wizard);
    while wizard.next().unwrap() {}

    let start = Instant::now();
    let pending = wizard
        .confirm(fixed_now(), Duration::from_millis(2000))
        .unwrap();
    assert!(wizard.is_complete());

    let pending = pending
        .try_resolve(start)
        .expect_err("node must not be released before the delay");
    let node = pending
        .try_resolve(start + Duration::from_millis(2500))
        .expect("node released after the delay");

    assert_eq!(node.name, "N1");
    assert_eq!(node.alias, "n1");
    assert_eq!(node.pubkey, "02aa");
    assert_eq!(node.status, NodeStatus::Online);
    assert!(node.is_owned);
    assert_eq!(node.channels, 0);
    assert_eq!(node.capacity.to_string(), "₿0.00");
    assert_eq!(node.uptime_display(), "100%");
    assert_eq!(node.id, fixed_now().timestamp_millis() as u64);
}

#[test]
fn test_completion_never_reverts() {
    let mut wizard = ClaimWizard::new(fixed_now());
    fill_wizard(&mut wizard);
    while wizard.next().unwrap() {}
    wizard.confirm(fixed_now(), Duration::ZERO).unwrap();

    assert!(!wizard.back());
    assert_eq!(wizard.next(), Err(FlowError::AlreadyComplete));
    assert!(matches!(
        wizard.confirm(fixed_now(), Duration::ZERO),
        Err(FlowError::AlreadyComplete)
    ));
    assert_eq!(
        wizard.update_field(ClaimField::NodeName, "other"),
        Err(FlowError::AlreadyComplete)
    );
    assert!(wizard.is_complete());
}

#[test]
fn test_claimed_node_uses_location_label() {
    let mut wizard = ClaimWizard::new(fixed_now());
    wizard
        .update_field(ClaimField::NodeLocation, "eu-west")
        .unwrap();
    assert_eq!(wizard.claimed_node(fixed_now()).location, "Europe (West)");
}

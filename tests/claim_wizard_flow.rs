//! End-to-end node claim: walk the wizard through all five steps, confirm,
//! and wait out the simulated delay.

use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use orange_pages::catalog::Catalog;
use orange_pages::flows::{ClaimField, ClaimWizard, FlowError, StepStatus, CLAIM_STEPS};
use orange_pages::types::NodeStatus;

fn filled_wizard() -> ClaimWizard {
    let now = Utc.with_ymd_and_hms(2024, 1, 19, 14, 30, 0).unwrap();
    let mut wizard = ClaimWizard::new(now);

    wizard.update_field(ClaimField::NodeName, "N1").unwrap();
    wizard.update_field(ClaimField::NodeAlias, "n1").unwrap();
    wizard.update_field(ClaimField::NodeLocation, "eu-west").unwrap();
    assert!(wizard.next().unwrap());

    wizard.update_field(ClaimField::Pubkey, "02aa").unwrap();
    wizard.update_field(ClaimField::IpAddress, "1.2.3.4").unwrap();
    assert!(wizard.next().unwrap());

    wizard.update_field(ClaimField::Signature, "sig").unwrap();
    assert!(wizard.next().unwrap());

    wizard.update_field(ClaimField::AcceptTos, true).unwrap();
    assert!(wizard.next().unwrap());

    assert_eq!(wizard.current_step(), CLAIM_STEPS);
    wizard
}

#[test]
fn test_each_step_is_gated() {
    let mut wizard = ClaimWizard::new(Utc::now());
    for step in 1..CLAIM_STEPS {
        assert_eq!(wizard.current_step(), step);
        assert!(matches!(
            wizard.next(),
            Err(FlowError::StepIncomplete { step: s, .. }) if s == step
        ));
        match step {
            1 => {
                wizard.update_field(ClaimField::NodeName, "N1").unwrap();
                wizard.update_field(ClaimField::NodeAlias, "n1").unwrap();
            }
            2 => {
                wizard.update_field(ClaimField::Pubkey, "02aa").unwrap();
                wizard.update_field(ClaimField::IpAddress, "1.2.3.4").unwrap();
            }
            3 => wizard.update_field(ClaimField::Signature, "sig").unwrap(),
            _ => wizard.update_field(ClaimField::AcceptTos, true).unwrap(),
        }
        assert!(wizard.next().unwrap());
    }
    assert_eq!(wizard.sequencer().status(1), StepStatus::Completed);
    assert_eq!(wizard.sequencer().status(CLAIM_STEPS), StepStatus::Current);
}

#[test]
fn test_claimed_node_lands_in_catalog() {
    let mut wizard = filled_wizard();
    let start = Instant::now();
    let pending = wizard
        .confirm(Utc::now(), Duration::from_millis(2000))
        .unwrap();
    assert!(wizard.is_complete());

    let pending = match pending.try_resolve(start) {
        Ok(_) => panic!("resolved before the delay"),
        Err(pending) => pending,
    };
    let node = pending
        .try_resolve(start + Duration::from_millis(2500))
        .unwrap_or_else(|_| panic!("still pending after the delay"));

    assert_eq!(node.name, "N1");
    assert_eq!(node.alias, "n1");
    assert_eq!(node.pubkey, "02aa");
    assert_eq!(node.location, "Europe (West)");
    assert_eq!(node.status, NodeStatus::Online);
    assert!(node.is_owned);

    let mut catalog = Catalog::builtin();
    let owned_before = catalog.owned_nodes().count();
    catalog.add_node(node.clone());
    assert_eq!(catalog.owned_nodes().count(), owned_before + 1);
    assert!(catalog.nodes().iter().any(|n| n.id == node.id));
}

#[test]
fn test_second_confirmation_is_rejected() {
    let mut wizard = filled_wizard();
    wizard.confirm(Utc::now(), Duration::ZERO).unwrap();
    assert!(matches!(
        wizard.confirm(Utc::now(), Duration::ZERO),
        Err(FlowError::AlreadyComplete)
    ));
    assert!(!wizard.back());
    assert!(wizard.update_field(ClaimField::NodeName, "other").is_err());
}

#[tokio::test]
async fn test_wait_hands_over_node() {
    let mut wizard = filled_wizard();
    let pending = wizard
        .confirm(Utc::now(), Duration::from_millis(20))
        .unwrap();
    let node = pending.wait().await;
    assert_eq!(node.status, NodeStatus::Online);
    assert!(node.is_owned);
}

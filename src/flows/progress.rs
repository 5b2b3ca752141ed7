//! Milestones shown on the order-status screen, derived from the order status.

use crate::types::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Placed,
    PaymentProcessing,
    Confirmed,
    Delivered,
}

impl Milestone {
    pub fn all() -> [Milestone; 4] {
        [
            Milestone::Placed,
            Milestone::PaymentProcessing,
            Milestone::Confirmed,
            Milestone::Delivered,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Milestone::Placed => "Order Placed",
            Milestone::PaymentProcessing => "Payment Processing",
            Milestone::Confirmed => "Transaction Confirmed",
            Milestone::Delivered => "Assets Delivered",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Milestone::Placed => "Order has been created",
            Milestone::PaymentProcessing => "Waiting for payment confirmation",
            Milestone::Confirmed => "Payment has been confirmed",
            Milestone::Delivered => "Assets transferred to your wallet",
        }
    }

    fn reached_by(&self, status: OrderStatus) -> bool {
        match self {
            Milestone::Placed => true,
            Milestone::PaymentProcessing => status != OrderStatus::Pending,
            Milestone::Confirmed | Milestone::Delivered => status == OrderStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneState {
    pub milestone: Milestone,
    pub reached: bool,
}

/// Project an order status onto the four milestones, in order
pub fn milestones(status: OrderStatus) -> [MilestoneState; 4] {
    Milestone::all().map(|milestone| MilestoneState {
        milestone,
        reached: milestone.reached_by(status),
    })
}

pub fn completed_count(status: OrderStatus) -> usize {
    milestones(status).iter().filter(|m| m.reached).count()
}

pub fn progress_percent(status: OrderStatus) -> u16 {
    (completed_count(status) * 100 / Milestone::all().len()) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reached(status: OrderStatus) -> Vec<bool> {
        milestones(status).iter().map(|m| m.reached).collect()
    }

    #[test]
    fn test_pending_reaches_only_placed() {
        assert_eq!(
            reached(OrderStatus::Pending),
            vec![true, false, false, false]
        );
        assert_eq!(progress_percent(OrderStatus::Pending), 25);
    }

    #[test]
    fn test_completed_reaches_everything() {
        assert_eq!(reached(OrderStatus::Completed), vec![true; 4]);
        assert_eq!(progress_percent(OrderStatus::Completed), 100);
    }

    #[test]
    fn test_non_pending_unlocks_payment() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Failed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(reached(status), vec![true, true, false, false]);
            assert_eq!(completed_count(status), 2);
        }
    }

    #[test]
    fn test_milestones_keep_order() {
        let titles: Vec<_> = milestones(OrderStatus::Processing)
            .iter()
            .map(|m| m.milestone.title())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Order Placed",
                "Payment Processing",
                "Transaction Confirmed",
                "Assets Delivered"
            ]
        );
    }
}

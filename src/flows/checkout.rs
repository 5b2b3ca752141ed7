//! Three-step checkout: order details, payment method, confirmation.
//!
//! The quote is recomputed from the amount on every edit, so the subtotal,
//! fee and final total shown on screen always agree with what gets submitted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{FlowError, StepSequencer};
use crate::types::{
    parse_positive_quantity, AmountError, Asset, Btc, Holding, OrderRecord, OrderSide,
    OrderStatus, PaymentMethod,
};

pub const CHECKOUT_STEPS: usize = 3;

pub const STEP_TITLES: [&str; CHECKOUT_STEPS] = ["Order Details", "Payment", "Submitted"];

/// What is being bought or sold, fixed for the lifetime of a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSeed {
    pub asset: String,
    pub symbol: String,
    pub unit_price: Btc,
    pub side: OrderSide,
}

impl Default for CheckoutSeed {
    fn default() -> Self {
        Self {
            asset: "Bitcoin Ordinals".to_string(),
            symbol: "ORD".to_string(),
            unit_price: Btc::scaled(1, 3),
            side: OrderSide::Buy,
        }
    }
}

impl CheckoutSeed {
    pub fn buy(asset: &Asset) -> Self {
        Self {
            asset: asset.name.clone(),
            symbol: asset.symbol.clone(),
            unit_price: asset.price,
            side: OrderSide::Buy,
        }
    }

    pub fn sell(holding: &Holding) -> Self {
        Self {
            asset: holding.name.clone(),
            symbol: holding.symbol.clone(),
            unit_price: holding.unit_price(),
            side: OrderSide::Sell,
        }
    }
}

/// Amounts derived from a valid order amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuote {
    /// `amount × unit price`
    pub subtotal: Btc,
    pub fee: Btc,
    /// `subtotal + fee`
    pub total: Btc,
}

impl OrderQuote {
    /// Fails with [`AmountError::TooLarge`] when any figure leaves the decimal range.
    pub fn compute(
        amount: Decimal,
        unit_price: Btc,
        fee_rate: Decimal,
    ) -> Result<Self, AmountError> {
        let too_large = || AmountError::TooLarge(amount.to_string());
        let subtotal = unit_price.checked_mul(amount).ok_or_else(too_large)?;
        let fee = subtotal.checked_mul(fee_rate).ok_or_else(too_large)?;
        let total = subtotal.checked_add(fee).ok_or_else(too_large)?;
        Ok(Self {
            subtotal,
            fee,
            total,
        })
    }
}

/// The order being edited
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub asset: String,
    pub symbol: String,
    pub side: OrderSide,
    /// Raw text as typed
    pub amount: String,
    pub unit_price: Btc,
    pub fee_rate: Decimal,
    /// `None` while the amount is not a positive number
    pub quote: Option<OrderQuote>,
    pub payment_method: PaymentMethod,
}

impl OrderDraft {
    fn requote(&mut self) {
        self.quote = self.parse_amount().ok().map(|(_, quote)| quote);
    }

    fn parse_amount(&self) -> Result<(Decimal, OrderQuote), AmountError> {
        let amount = parse_positive_quantity(&self.amount)?;
        let quote = OrderQuote::compute(amount, self.unit_price, self.fee_rate)?;
        Ok((amount, quote))
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    sequencer: StepSequencer,
    draft: OrderDraft,
    submitted: Option<OrderRecord>,
}

impl CheckoutFlow {
    pub fn new(seed: CheckoutSeed, fee_rate: Decimal, default_amount: &str) -> Self {
        let mut draft = OrderDraft {
            asset: seed.asset,
            symbol: seed.symbol,
            side: seed.side,
            amount: default_amount.to_string(),
            unit_price: seed.unit_price,
            fee_rate,
            quote: None,
            payment_method: PaymentMethod::default(),
        };
        draft.requote();
        Self {
            sequencer: StepSequencer::new(CHECKOUT_STEPS),
            draft,
            submitted: None,
        }
    }

    pub fn current_step(&self) -> usize {
        self.sequencer.current()
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// The order produced by [`CheckoutFlow::submit`], once there is one
    pub fn submitted(&self) -> Option<&OrderRecord> {
        self.submitted.as_ref()
    }

    /// Replace the amount text and recompute the quote. Only on step 1.
    pub fn set_amount(&mut self, amount: impl Into<String>) -> Result<(), FlowError> {
        self.expect_step(1)?;
        self.draft.amount = amount.into();
        self.draft.requote();
        Ok(())
    }

    /// Pick a payment method. Only on step 2.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), FlowError> {
        self.expect_step(2)?;
        self.draft.payment_method = method;
        Ok(())
    }

    /// Whether "Continue to Payment" is enabled
    pub fn can_continue(&self) -> bool {
        self.current_step() == 1 && self.draft.quote.is_some()
    }

    pub fn continue_to_payment(&mut self) -> Result<(), FlowError> {
        self.expect_step(1)?;
        self.draft.parse_amount()?;
        self.sequencer.advance();
        tracing::debug!(amount = %self.draft.amount, "checkout moved to payment");
        Ok(())
    }

    /// Back to order details. Only from the payment step.
    pub fn back(&mut self) -> bool {
        self.current_step() == 2 && self.sequencer.retreat()
    }

    /// Place the order and move to the confirmation step.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<OrderRecord, FlowError> {
        if self.submitted.is_some() {
            return Err(FlowError::AlreadyComplete);
        }
        self.expect_step(2)?;
        let (amount, quote) = self.draft.parse_amount()?;

        let order = OrderRecord {
            id: format!("ORD-{}", now.timestamp_millis()),
            side: self.draft.side,
            asset: self.draft.asset.clone(),
            symbol: self.draft.symbol.clone(),
            amount,
            price: self.draft.unit_price,
            total: quote.subtotal,
            fee: quote.fee,
            status: OrderStatus::Processing,
            date: now,
            payment_method: Some(self.draft.payment_method),
        };
        self.sequencer.advance();
        self.submitted = Some(order.clone());

        tracing::info!(
            order_id = %order.id,
            side = %order.side,
            symbol = %order.symbol,
            total = %order.grand_total(),
            method = order.payment_method.map(|m| m.id()).unwrap_or_default(),
            "order submitted"
        );
        Ok(order)
    }

    fn expect_step(&self, expected: usize) -> Result<(), FlowError> {
        let current = self.current_step();
        if current == expected {
            Ok(())
        } else {
            Err(FlowError::WrongStep { expected, current })
        }
    }
}

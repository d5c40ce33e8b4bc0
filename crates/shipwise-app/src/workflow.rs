//! Shipping workflow: rate refresh, courier selection, and the submission gate
//!
//! ```text
//! Idle --select--> Selected --submit--> Submitting --ok--> Idle (selection cleared)
//!                                                  \--err-> Selected
//! ```
//!
//! Every method takes `&self`; state sits behind a mutex that is never held
//! across an `.await`, so one workflow can be shared between tasks.

use std::sync::{Arc, Mutex, MutexGuard};

use shipwise_domain::model::{
    ChargeBreakdown, CourierQuote, OrderHandoffRequest, ParcelSpec, PaymentMode, RateQuery,
    RateSet, Selection, ShippingMode,
};
use shipwise_domain::repository::OrderHandoff;
use shipwise_types::{HandoffError, RateError};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::rate_coordinator::RateQueryCoordinator;

/// The inputs that determine a rate query
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentInputs {
    pub origin: String,
    pub destination: String,
    pub parcel: ParcelSpec,
    pub payment: PaymentMode,
}

impl ShipmentInputs {
    pub fn to_query(&self) -> RateQuery {
        RateQuery::new(
            self.origin.clone(),
            self.destination.clone(),
            &self.parcel,
            self.payment,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Selected,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("a submission is in flight; inputs cannot change until it settles")]
    SubmissionInFlight,

    #[error("no shipment inputs have been provided")]
    NoInputs,

    #[error(transparent)]
    Rate(#[from] RateError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("no courier selected")]
    NoSelection,

    #[error("selection {courier} ({mode}) matches {matches} quotes in the current rate set, expected exactly one")]
    SelectionMismatch {
        courier: String,
        mode: ShippingMode,
        matches: usize,
    },

    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("order hand-off failed: {0}")]
    Handoff(#[from] HandoffError),
}

/// Result of [`ShippingWorkflow::refresh_rates`]
#[derive(Debug, Clone, PartialEq)]
pub enum RateOutcome {
    /// The response matched the current inputs and is now the active rate set
    Applied(RateSet),
    /// The inputs changed or a newer query was issued while this one was in flight
    Discarded,
}

#[derive(Debug, Default)]
struct WorkflowState {
    inputs: Option<ShipmentInputs>,
    rates: Option<RateSet>,
    /// Sequence number of the newest query still awaiting a response
    pending: Option<u64>,
    issued: u64,
    selection: Option<Selection>,
    submitting: bool,
    warehouse: Option<String>,
    rto_warehouse: Option<String>,
}

pub struct ShippingWorkflow {
    id: Uuid,
    coordinator: RateQueryCoordinator,
    handoff: Arc<dyn OrderHandoff>,
    state: Mutex<WorkflowState>,
}

/// Clears the in-flight flag when the submission settles or its future is dropped
struct InFlightGuard<'a> {
    state: &'a Mutex<WorkflowState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).submitting = false;
    }
}

fn lock(state: &Mutex<WorkflowState>) -> MutexGuard<'_, WorkflowState> {
    // state is plain data; a panic elsewhere cannot leave it half-updated
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ShippingWorkflow {
    pub fn new(coordinator: RateQueryCoordinator, handoff: Arc<dyn OrderHandoff>) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinator,
            handoff,
            state: Mutex::new(WorkflowState::default()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> WorkflowPhase {
        let state = lock(&self.state);
        if state.submitting {
            WorkflowPhase::Submitting
        } else if state.selection.is_some() {
            WorkflowPhase::Selected
        } else {
            WorkflowPhase::Idle
        }
    }

    /// Record new inputs.
    ///
    /// Returns `true` when they differ from the current ones, in which case the
    /// selection and rate set are dropped and the caller should refresh rates.
    pub fn on_inputs_changed(&self, inputs: ShipmentInputs) -> Result<bool, WorkflowError> {
        let mut state = lock(&self.state);
        if state.submitting {
            return Err(WorkflowError::SubmissionInFlight);
        }
        if state.inputs.as_ref() == Some(&inputs) {
            return Ok(false);
        }

        if let Some(dropped) = state.selection.take() {
            debug!(workflow = %self.id, courier = %dropped.courier_name, "inputs changed, selection cleared");
        }
        state.inputs = Some(inputs);
        state.rates = None;
        state.pending = None;
        Ok(true)
    }

    /// Warehouse ids forwarded with the hand-off
    pub fn set_warehouses(
        &self,
        warehouse: Option<String>,
        rto_warehouse: Option<String>,
    ) -> Result<(), WorkflowError> {
        let mut state = lock(&self.state);
        if state.submitting {
            return Err(WorkflowError::SubmissionInFlight);
        }
        state.warehouse = warehouse;
        state.rto_warehouse = rto_warehouse;
        Ok(())
    }

    /// Query rates for the current inputs.
    ///
    /// Issuing a query clears the selection and the active rate set, so nothing
    /// can be submitted against superseded prices while the query is pending.
    /// A response is applied only if no newer query was issued and the inputs
    /// are unchanged when it arrives.
    pub async fn refresh_rates(&self) -> Result<RateOutcome, WorkflowError> {
        let (query, seq, key) = {
            let mut state = lock(&self.state);
            if state.submitting {
                return Err(WorkflowError::SubmissionInFlight);
            }
            let query = state
                .inputs
                .as_ref()
                .ok_or(WorkflowError::NoInputs)?
                .to_query();
            let key = query.key();
            state.issued += 1;
            let seq = state.issued;
            state.pending = Some(seq);
            state.selection = None;
            state.rates = None;
            (query, seq, key)
        };

        let result = self.coordinator.fetch_rates(&query).await;

        let mut state = lock(&self.state);
        if state.pending != Some(seq) {
            warn!(workflow = %self.id, %key, "discarding stale rate response");
            return Ok(RateOutcome::Discarded);
        }
        state.pending = None;

        let rates = result?;
        state.rates = Some(rates.clone());
        Ok(RateOutcome::Applied(rates))
    }

    /// Record the user's pick; the quote is checked against the rate set at submit time
    pub fn select(&self, quote: &CourierQuote) {
        self.select_by(Selection::of(quote));
    }

    pub fn select_by(&self, selection: Selection) {
        lock(&self.state).selection = Some(selection);
    }

    pub fn selection(&self) -> Option<Selection> {
        lock(&self.state).selection.clone()
    }

    pub fn rates(&self) -> Option<RateSet> {
        lock(&self.state).rates.clone()
    }

    /// Quotes of the active rate set, in provider order
    pub fn quotes(&self) -> Vec<CourierQuote> {
        lock(&self.state)
            .rates
            .as_ref()
            .map(|r| r.quotes.clone())
            .unwrap_or_default()
    }

    /// Hand the selected quote's charges to the order service.
    ///
    /// At most one submission runs at a time. Success clears the selection;
    /// failure keeps it so the user can retry.
    pub async fn submit(&self) -> Result<ChargeBreakdown, SubmitError> {
        let (order, selection) = {
            let mut state = lock(&self.state);
            let selection = state.selection.clone().ok_or(SubmitError::NoSelection)?;

            let quotes = state.rates.as_ref().map(|r| r.quotes.as_slice()).unwrap_or(&[]);
            let matched: Vec<&CourierQuote> =
                quotes.iter().filter(|q| selection.matches(q)).collect();
            let quote = match matched.as_slice() {
                [quote] => *quote,
                _ => {
                    error!(
                        workflow = %self.id,
                        courier = %selection.courier_name,
                        mode = %selection.mode,
                        matches = matched.len(),
                        "selection does not identify exactly one quote"
                    );
                    return Err(SubmitError::SelectionMismatch {
                        courier: selection.courier_name.clone(),
                        mode: selection.mode,
                        matches: matched.len(),
                    });
                }
            };

            if state.submitting {
                return Err(SubmitError::AlreadySubmitting);
            }

            let order = OrderHandoffRequest {
                courier: quote.courier_name.clone(),
                mode: quote.mode,
                charges: ChargeBreakdown::from(quote),
                warehouse: state.warehouse.clone(),
                rto_warehouse: state.rto_warehouse.clone(),
            };
            state.submitting = true;
            (order, selection)
        };
        let _in_flight = InFlightGuard { state: &self.state };

        match self.handoff.hand_off(&order).await {
            Ok(()) => {
                let mut state = lock(&self.state);
                if state.selection.as_ref() == Some(&selection) {
                    state.selection = None;
                }
                info!(
                    workflow = %self.id,
                    courier = %order.courier,
                    mode = %order.mode,
                    total = order.charges.total,
                    "order handed off"
                );
                Ok(order.charges)
            }
            Err(e) => {
                warn!(workflow = %self.id, error = %e, "order hand-off failed");
                Err(SubmitError::Handoff(e))
            }
        }
    }
}

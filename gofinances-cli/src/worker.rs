use gofinances_client::{ControllerError, TransactionListController, TransactionsApi};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardRequest {
    Load,
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    Loaded { count: usize },
    LoadFailed { message: String },
    Deleted { id: String, removed: bool },
    DeleteFailed { id: String, message: String },
}

/// Runs requests one at a time against the controller and reports back to the UI.
///
/// The UI reads state from the controller's snapshot channel; events only
/// carry outcomes for the status line.
pub async fn run_worker<A: TransactionsApi>(
    controller: TransactionListController<A>,
    mut rx: mpsc::UnboundedReceiver<DashboardRequest>,
    tx: std::sync::mpsc::Sender<DashboardEvent>,
) {
    while let Some(req) = rx.recv().await {
        let event = match req {
            DashboardRequest::Load => match controller.load().await {
                Ok(snap) => DashboardEvent::Loaded {
                    count: snap.transactions.len(),
                },
                Err(ControllerError::Deactivated) => break,
                Err(e) => DashboardEvent::LoadFailed {
                    message: e.to_string(),
                },
            },
            DashboardRequest::Delete { id } => match controller.delete(&id).await {
                Ok(outcome) => DashboardEvent::Deleted {
                    id,
                    removed: outcome.removed,
                },
                Err(ControllerError::Deactivated) => break,
                Err(e) => DashboardEvent::DeleteFailed {
                    id,
                    message: e.to_string(),
                },
            },
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use gofinances_client::{error::ApiResult, ApiError};
    use gofinances_core::{Balance, Transaction, TransactionType, TransactionsPayload};

    struct StubApi;

    #[async_trait]
    impl TransactionsApi for StubApi {
        async fn list(&self) -> ApiResult<TransactionsPayload> {
            let at = Utc.with_ymd_and_hms(2020, 4, 17, 15, 0, 0).unwrap();
            Ok(TransactionsPayload {
                transactions: vec![Transaction::new(
                    "1",
                    "Salary",
                    500.0,
                    TransactionType::Income,
                    "Work",
                    at,
                )],
                balance: Balance::from_totals(500.0, 0.0),
            })
        }

        async fn delete(&self, id: &str) -> ApiResult<()> {
            if id == "1" {
                Ok(())
            } else {
                Err(ApiError::UnexpectedStatus {
                    status: 404,
                    body: "not found".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_worker_reports_outcomes_in_order() {
        let controller = TransactionListController::new(StubApi, chrono_tz::UTC);
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (ev_tx, ev_rx) = std::sync::mpsc::channel();

        req_tx.send(DashboardRequest::Load).unwrap();
        req_tx
            .send(DashboardRequest::Delete { id: "9".to_string() })
            .unwrap();
        req_tx
            .send(DashboardRequest::Delete { id: "1".to_string() })
            .unwrap();
        drop(req_tx);

        run_worker(controller.clone(), req_rx, ev_tx).await;

        let events: Vec<DashboardEvent> = ev_rx.try_iter().collect();
        assert_eq!(events[0], DashboardEvent::Loaded { count: 1 });
        assert!(matches!(
            &events[1],
            DashboardEvent::DeleteFailed { id, message } if id == "9" && message.contains("404")
        ));
        assert_eq!(
            events[2],
            DashboardEvent::Deleted {
                id: "1".to_string(),
                removed: true
            }
        );
        assert!(controller.snapshot().transactions.is_empty());
    }

    #[tokio::test]
    async fn test_worker_stops_after_deactivate() {
        let controller = TransactionListController::new(StubApi, chrono_tz::UTC);
        controller.deactivate();
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (ev_tx, ev_rx) = std::sync::mpsc::channel();

        req_tx.send(DashboardRequest::Load).unwrap();
        run_worker(controller, req_rx, ev_tx).await;

        assert!(ev_rx.try_iter().next().is_none());
    }
}

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, error, info, warn};

use crate::domain::delivery::DeliveryRecord;
use crate::domain::ports::PersistenceSink;
use crate::inbound::webhook::dispatcher::EventDispatcher;

/// Runs the side effects of accepted deliveries off the response path.
///
/// `DeliveryWorker` is the submitting half: [`DeliveryWorker::submit`] pushes
/// onto an unbounded channel and returns immediately. [`DeliveryWorker::start`]
/// launches the draining loop inside a `tokio::spawn`; for every record the
/// loop spawns one persistence task and one dispatch task, so a slow disk or
/// a stuck handler only ever holds up its own task.
#[derive(Debug, Clone)]
pub struct DeliveryWorker {
    tx: mpsc::UnboundedSender<Arc<DeliveryRecord>>,
}

impl DeliveryWorker {
    /// Start the processing loop and return a handle for submitting records.
    ///
    /// The loop ends once every handle has been dropped.
    pub fn start(sink: Arc<dyn PersistenceSink>, dispatcher: Arc<EventDispatcher>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        info!("Delivery worker starting");

        tokio::spawn(async move {
            Self::run_loop(UnboundedReceiverStream::new(rx), sink, dispatcher).await;
        });

        Self { tx }
    }

    /// Queue a record for persistence and dispatch without waiting on either.
    ///
    /// Returns `false` when the processing loop is gone; the record is then
    /// logged and dropped.
    pub fn submit(&self, record: Arc<DeliveryRecord>) -> bool {
        match self.tx.send(record) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    delivery_id = e.0.delivery_id.as_deref().unwrap_or("-"),
                    "Delivery worker stopped; dropping background work"
                );
                false
            }
        }
    }

    /// Whether the processing loop is still receiving records
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    async fn run_loop(
        mut records: UnboundedReceiverStream<Arc<DeliveryRecord>>,
        sink: Arc<dyn PersistenceSink>,
        dispatcher: Arc<EventDispatcher>,
    ) {
        while let Some(record) = records.next().await {
            let sink = sink.clone();
            let persisted = record.clone();
            tokio::spawn(async move {
                Self::persist(sink.as_ref(), &persisted).await;
            });

            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher.dispatch(record.event_name(), &record.body).await;
            });
        }

        debug!("Delivery worker stopped");
    }

    async fn persist(sink: &dyn PersistenceSink, record: &DeliveryRecord) {
        if let Err(e) = sink.persist(record).await {
            error!(
                delivery_id = record.delivery_id.as_deref().unwrap_or("-"),
                error = %e,
                "Failed to persist delivery"
            );
        }
    }
}

// Queue message handler: one message = one credential sync run

use crate::models::SyncCredential;
use crate::sync::FraudCaseSync;
use async_trait::async_trait;
use message_bus::{Delivery, HandlerError, MessageHandler};

pub struct SyncHandler {
    sync: FraudCaseSync,
}

impl SyncHandler {
    pub fn new(sync: FraudCaseSync) -> Self {
        Self { sync }
    }
}

#[async_trait]
impl MessageHandler for SyncHandler {
    async fn handle(&self, delivery: &Delivery) -> Result<(), HandlerError> {
        let credential = SyncCredential::from_payload(&delivery.payload);

        match self.sync.process_credential(&credential).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_fatal() => Err(HandlerError::Fatal(Box::new(e))),
            Err(e) => Err(HandlerError::Reject(Box::new(e))),
        }
    }
}

//! Audit recording policy.
//!
//! Mutating operations record who did what to which resource, strictly after
//! the primary write succeeded. Recording is fire-and-forget: a failed audit
//! insert is logged and swallowed, the HTTP response reflects only the
//! primary write. The primary and audit tables can therefore diverge; there
//! is no reconciliation.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::model::{AuditAction, NewAuditRecord, ResourceKind};
use crate::domain::repo::AuditLogRepository;

/// Fire-and-forget audit recorder shared by the services.
#[derive(Clone)]
pub struct AuditRecorder {
    repo: Arc<dyn AuditLogRepository>,
}

impl AuditRecorder {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    /// Record a mutation. `actor` is the acting user id; without one the
    /// record is skipped (an audit record requires a valid user id).
    pub async fn record(
        &self,
        actor: Option<i64>,
        action: AuditAction,
        resource_type: ResourceKind,
        resource_id: i64,
        description: impl Into<String>,
    ) {
        let Some(user_id) = actor else {
            warn!(
                action = action.as_str(),
                resource_type = resource_type.as_str(),
                resource_id,
                "Skipping audit record: no acting user id"
            );
            return;
        };

        let rec = NewAuditRecord {
            user_id,
            action,
            description: description.into(),
            resource_type,
            resource_id,
            timestamp: Utc::now(),
        };

        if let Err(e) = self.repo.append(rec).await {
            warn!(
                error = %e,
                user_id,
                action = action.as_str(),
                resource_type = resource_type.as_str(),
                resource_id,
                "Audit record failed (continuing)"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AuditRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        appended: Mutex<Vec<NewAuditRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl AuditLogRepository for RecordingSink {
        async fn append(&self, rec: NewAuditRecord) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("sink unavailable");
            }
            self.appended.lock().unwrap().push(rec);
            Ok(())
        }

        async fn recent(&self, _limit: u64) -> anyhow::Result<Vec<AuditRecord>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn records_with_actor() {
        let sink = Arc::new(RecordingSink::default());
        let recorder = AuditRecorder::new(sink.clone());

        recorder
            .record(
                Some(7),
                AuditAction::Create,
                ResourceKind::Customer,
                42,
                "Added customer Jane",
            )
            .await;

        let appended = sink.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].user_id, 7);
        assert_eq!(appended[0].action, AuditAction::Create);
        assert_eq!(appended[0].resource_type, ResourceKind::Customer);
        assert_eq!(appended[0].resource_id, 42);
    }

    #[tokio::test]
    async fn skips_without_actor() {
        let sink = Arc::new(RecordingSink::default());
        let recorder = AuditRecorder::new(sink.clone());

        recorder
            .record(None, AuditAction::Delete, ResourceKind::Doctor, 1, "x")
            .await;

        assert!(sink.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn swallows_sink_failures() {
        let sink = Arc::new(RecordingSink {
            appended: Mutex::new(Vec::new()),
            fail: true,
        });
        let recorder = AuditRecorder::new(sink.clone());

        // Must not panic or propagate the error.
        recorder
            .record(Some(1), AuditAction::Update, ResourceKind::User, 2, "x")
            .await;

        assert!(sink.appended.lock().unwrap().is_empty());
    }
}

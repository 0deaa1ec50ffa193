//! Session recording: derive metadata, build the page, call the store.

use crate::comment::generate_comment;
use crate::config::PropertyNames;
use crate::error::{ToolError, ToolResult};
use crate::mapper::{RecordFields, map_record};
use crate::notion::RecordStore;
use crate::session::{
    Clock, SessionState, SystemClock, format_elapsed, minutes_between, session_title,
};
use crate::types::{RecordOutcome, SessionLogRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Records sessions into a [`RecordStore`], tracking process-lifetime state.
///
/// The session counter advances on every attempt, including attempts whose
/// store call fails. The last log time only advances on success.
pub struct SessionRecorder {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    properties: PropertyNames,
    state: SessionState,
}

impl SessionRecorder {
    pub fn new(store: Arc<dyn RecordStore>, properties: PropertyNames) -> Self {
        Self::with_clock(store, properties, Arc::new(SystemClock))
    }

    /// Create a recorder reading time from `clock`. State starts at `clock.now()`.
    pub fn with_clock(
        store: Arc<dyn RecordStore>,
        properties: PropertyNames,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = SessionState::new(clock.now());
        Self {
            store,
            clock,
            properties,
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Record one session.
    pub async fn record(&mut self, request: &SessionLogRequest) -> ToolResult<RecordOutcome> {
        let now = self.clock.now();
        let session_number = self.state.begin_attempt();
        let title = session_title(now, session_number);

        let commentary = match request.claude_comment.as_deref().filter(|c| !c.is_empty()) {
            Some(comment) => comment.to_string(),
            None => generate_comment(
                &request.purpose,
                &request.changes,
                request.errors.as_deref(),
            ),
        };

        let properties = map_record(
            &self.properties,
            &RecordFields {
                request,
                title: &title,
                commentary: &commentary,
                recorded_at: now,
            },
        );
        debug!(
            session_number,
            property_count = properties.len(),
            "Creating Notion page"
        );

        let record = match self.store.create_record(properties).await {
            Ok(record) => record,
            Err(e) => {
                warn!(session_number, error = %e, "Notion page creation failed");
                return Err(ToolError::external_call(e));
            }
        };

        let previous = self.state.commit(now);
        let minutes = minutes_between(previous, self.clock.now());
        info!(session_number, page_id = %record.id, title = %title, "Session recorded");

        Ok(RecordOutcome {
            record,
            title,
            session_number,
            time_since_last_log: format_elapsed(minutes),
        })
    }
}

//! Inactivity reaper.
//!
//! A periodic background sweep that evicts participants whose last heartbeat
//! is older than the configured timeout and announces each eviction to the
//! room. Runs independently of request handling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::{ChatMessage, MessageStore, ParticipantStore, StoreError, Timestamp};
use crate::time::Clock;

/// Periodic eviction of silent participants.
pub struct InactivityReaper {
    participants: Arc<dyn ParticipantStore>,
    messages: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
    interval: Duration,
}

/// Cancellation handle for a spawned reaper task.
pub struct ReaperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Stop the sweep loop and wait for the task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

impl InactivityReaper {
    pub fn new(
        participants: Arc<dyn ParticipantStore>,
        messages: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
            timeout,
            interval,
        }
    }

    /// Run one sweep over all participants. Returns how many were evicted.
    ///
    /// Evictions are independent: a failure for one participant is logged
    /// and the sweep continues with the rest.
    pub async fn sweep(&self) -> Result<usize, StoreError> {
        let now = Timestamp::new(self.clock.now_millis());
        let timeout_ms = self.timeout.as_millis() as i64;
        let cutoff = Timestamp::new(now.millis() - timeout_ms);

        let participants = self.participants.list().await?;
        let mut evicted = 0;

        for participant in participants {
            if !participant.is_stale(now, timeout_ms) {
                continue;
            }

            // Conditional delete: a heartbeat racing this sweep wins and the
            // participant survives untouched.
            match self
                .participants
                .remove_if_older(participant.id, cutoff)
                .await
            {
                Ok(true) => {
                    evicted += 1;
                    tracing::info!(name = %participant.name, "evicted inactive participant");
                    let left =
                        ChatMessage::left(participant.name.clone(), self.clock.clock_time());
                    if let Err(e) = self.messages.insert(left).await {
                        tracing::warn!(
                            name = %participant.name,
                            error = %e,
                            "failed to record leave message"
                        );
                    }
                }
                Ok(false) => {
                    tracing::debug!(name = %participant.name, "heartbeat won the race, skipping");
                }
                Err(e) => {
                    tracing::warn!(
                        name = %participant.name,
                        error = %e,
                        "eviction failed, continuing sweep"
                    );
                }
            }
        }

        Ok(evicted)
    }

    /// Spawn the sweep loop as a background task.
    pub fn spawn(self) -> ReaperHandle {
        let (shutdown, mut stopped) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.sweep().await {
                            tracing::error!(error = %e, "reaper sweep failed");
                        }
                    }
                    _ = stopped.changed() => {
                        tracing::info!("reaper stopped");
                        break;
                    }
                }
            }
        });

        ReaperHandle { shutdown, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::LEAVE_TEXT;
    use crate::domain::repository::{MockMessageStore, MockParticipantStore};
    use crate::domain::{BROADCAST, MessageKind, Participant, ParticipantName};
    use crate::infrastructure::repository::{InMemoryMessageStore, InMemoryParticipantStore};
    use crate::time::ManualClock;

    const TIMEOUT: Duration = Duration::from_secs(10);
    const INTERVAL: Duration = Duration::from_secs(15);

    fn participant(name: &str, at: i64) -> Participant {
        Participant::new(ParticipantName::new(name).unwrap(), Timestamp::new(at))
    }

    fn reaper(
        participants: Arc<dyn ParticipantStore>,
        messages: Arc<dyn MessageStore>,
        clock: Arc<ManualClock>,
    ) -> InactivityReaper {
        InactivityReaper::new(participants, messages, clock, TIMEOUT, INTERVAL)
    }

    #[tokio::test]
    async fn test_sweep_evicts_stale_and_keeps_fresh() {
        // given (precondition): alice silent past the timeout, bob fresh
        let participants = Arc::new(InMemoryParticipantStore::new());
        let messages = Arc::new(InMemoryMessageStore::new());
        let clock = Arc::new(ManualClock::new(20_000));
        participants
            .insert_if_absent(participant("alice", 1_000))
            .await
            .unwrap();
        participants
            .insert_if_absent(participant("bob", 15_000))
            .await
            .unwrap();
        let reaper = reaper(participants.clone(), messages.clone(), clock);

        // when (operation):
        let evicted = reaper.sweep().await.unwrap();

        // then (expected result): alice gone with a leave message, bob kept
        assert_eq!(evicted, 1);
        let remaining = participants.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name.as_str(), "bob");

        let announcements = messages.visible_to("carol").await.unwrap();
        assert_eq!(announcements.len(), 1);
        assert_eq!(announcements[0].from.as_str(), "alice");
        assert_eq!(announcements[0].to.as_str(), BROADCAST);
        assert_eq!(announcements[0].kind, MessageKind::Status);
        assert_eq!(announcements[0].text.as_str(), LEAVE_TEXT);
    }

    #[tokio::test]
    async fn test_sweep_noop_when_everyone_is_fresh() {
        // given (precondition):
        let participants = Arc::new(InMemoryParticipantStore::new());
        let messages = Arc::new(InMemoryMessageStore::new());
        let clock = Arc::new(ManualClock::new(5_000));
        participants
            .insert_if_absent(participant("alice", 1_000))
            .await
            .unwrap();
        let reaper = reaper(participants.clone(), messages.clone(), clock);

        // when (operation):
        let evicted = reaper.sweep().await.unwrap();

        // then (expected result):
        assert_eq!(evicted, 0);
        assert_eq!(participants.list().await.unwrap().len(), 1);
        assert!(messages.visible_to("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_respects_racing_heartbeat() {
        // given (precondition): alice looks stale in the sweep's read
        let participants = Arc::new(InMemoryParticipantStore::new());
        let messages = Arc::new(InMemoryMessageStore::new());
        let clock = Arc::new(ManualClock::new(20_000));
        let alice = participant("alice", 1_000);
        let name = alice.name.clone();
        participants.insert_if_absent(alice).await.unwrap();

        // heartbeat lands before the conditional delete executes
        participants
            .touch(&name, Timestamp::new(19_000))
            .await
            .unwrap();
        let reaper = reaper(participants.clone(), messages.clone(), clock);

        // when (operation):
        let evicted = reaper.sweep().await.unwrap();

        // then (expected result): alice survives, no leave message
        assert_eq!(evicted, 0);
        assert_eq!(participants.list().await.unwrap().len(), 1);
        assert!(messages.visible_to("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_continues_after_per_participant_store_error() {
        // given (precondition): two stale participants, eviction of the
        // first fails at the store
        let stale_a = participant("alice", 1_000);
        let stale_b = participant("bob", 1_000);
        let id_a = stale_a.id;
        let id_b = stale_b.id;

        let mut participants = MockParticipantStore::new();
        participants
            .expect_list()
            .return_once(move || Ok(vec![stale_a, stale_b]));
        participants
            .expect_remove_if_older()
            .withf(move |id, _| *id == id_a)
            .returning(|_, _| Err(StoreError::Backend("boom".to_string())));
        participants
            .expect_remove_if_older()
            .withf(move |id, _| *id == id_b)
            .returning(|_, _| Ok(true));

        let mut messages = MockMessageStore::new();
        messages
            .expect_insert()
            .withf(|m| m.from == *"bob")
            .times(1)
            .returning(|_| Ok(()));

        let clock = Arc::new(ManualClock::new(20_000));
        let reaper = reaper(Arc::new(participants), Arc::new(messages), clock);

        // when (operation):
        let evicted = reaper.sweep().await.unwrap();

        // then (expected result): bob still evicted despite alice's failure
        assert_eq!(evicted, 1);
    }

    #[tokio::test]
    async fn test_sweep_tolerates_leave_message_failure() {
        // given (precondition): eviction succeeds, the leave insert fails
        let stale = participant("alice", 1_000);

        let mut participants = MockParticipantStore::new();
        participants
            .expect_list()
            .return_once(move || Ok(vec![stale]));
        participants
            .expect_remove_if_older()
            .returning(|_, _| Ok(true));

        let mut messages = MockMessageStore::new();
        messages
            .expect_insert()
            .returning(|_| Err(StoreError::Backend("boom".to_string())));

        let clock = Arc::new(ManualClock::new(20_000));
        let reaper = reaper(Arc::new(participants), Arc::new(messages), clock);

        // when (operation):
        let result = reaper.sweep().await;

        // then (expected result): the sweep itself still succeeds
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_spawned_reaper_stops_on_handle() {
        // given (precondition):
        let participants = Arc::new(InMemoryParticipantStore::new());
        let messages = Arc::new(InMemoryMessageStore::new());
        let clock = Arc::new(ManualClock::new(0));
        let handle = reaper(participants, messages, clock).spawn();

        // when (operation) / then (expected result): stop returns promptly
        handle.stop().await;
    }
}

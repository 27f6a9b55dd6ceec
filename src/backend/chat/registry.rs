/**
 * Connection Registry
 *
 * The registry is the set of chat connections that should receive
 * broadcasts. It is the only shared mutable structure in the chat core.
 *
 * # Thread Safety
 *
 * The map is guarded by a `std::sync::RwLock`. The map lock is never held
 * while a frame is being sent: `broadcast` copies the members out under a
 * read lock, sends to the copy, and only then takes the write lock to drop
 * connections that failed. Registration and deregistration from other tasks
 * can therefore interleave with a broadcast freely.
 *
 * Each member also has its own delivery gate. It is held while a frame is
 * handed to that one connection, which keeps a history flush and a live
 * broadcast from overtaking each other on the same connection.
 *
 * # History Replay
 *
 * A connection registered with `register_replaying` is a member at once, but
 * broadcasts to it are queued instead of sent. `finish_replay` sends the
 * queued frames that were not already part of the replayed history and
 * switches the member to live delivery.
 *
 * # Failure Handling
 *
 * A connection that is closed or rejects a frame during a broadcast is
 * removed from the registry. The remaining connections still receive the
 * frame and the broadcast itself never fails.
 */

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::backend::chat::connection::{Connection, ConnectionId};

/// Outcome of one broadcast
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections that accepted the frame
    pub delivered: usize,
    /// Connections still replaying history that queued the frame
    pub queued: usize,
    /// Connections removed because they were closed or failed to send
    pub pruned: Vec<ConnectionId>,
}

enum Delivery {
    /// Frames held back until history replay ends, tagged with message id
    Replaying(Vec<(i64, String)>),
    Live,
}

struct Member {
    connection: Arc<dyn Connection>,
    delivery: Mutex<Delivery>,
}

impl Member {
    fn new(connection: Arc<dyn Connection>, delivery: Delivery) -> Arc<Self> {
        Arc::new(Self {
            connection,
            delivery: Mutex::new(delivery),
        })
    }
}

/// Concurrency-safe set of open chat connections
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    members: Arc<RwLock<HashMap<ConnectionId, Arc<Member>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection that receives broadcasts immediately
    ///
    /// Registering the same id twice keeps a single entry (the newest
    /// handle). Returns `true` if the id was not registered before.
    pub fn register(&self, connection: Arc<dyn Connection>) -> bool {
        self.insert(Member::new(connection, Delivery::Live))
    }

    /// Add a connection whose broadcasts are queued until `finish_replay`
    pub fn register_replaying(&self, connection: Arc<dyn Connection>) -> bool {
        self.insert(Member::new(connection, Delivery::Replaying(Vec::new())))
    }

    fn insert(&self, member: Arc<Member>) -> bool {
        let id = member.connection.id();
        let mut members = self.members.write().unwrap_or_else(PoisonError::into_inner);
        members.insert(id, member).is_none()
    }

    /// Remove a connection; absent ids are ignored
    ///
    /// Returns `true` if a connection was removed.
    pub fn deregister(&self, id: ConnectionId) -> bool {
        let mut members = self.members.write().unwrap_or_else(PoisonError::into_inner);
        members.remove(&id).is_some()
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    /// Number of registered connections
    pub fn len(&self) -> usize {
        self.members.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn member(&self, id: ConnectionId) -> Option<Arc<Member>> {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Members at this instant
    fn snapshot(&self) -> Vec<Arc<Member>> {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Deliver `payload` to every connection registered at the time of the call
    ///
    /// `message_id` identifies the frame to members that are still replaying
    /// history, so a message they already got from the history is not sent
    /// twice.
    pub fn broadcast(&self, message_id: i64, payload: &str) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for member in self.snapshot() {
            let connection = &member.connection;
            if !connection.is_open() {
                tracing::debug!("[Chat] Connection {} closed, pruning", connection.id());
                report.pruned.push(connection.id());
                continue;
            }

            let mut delivery = member.delivery.lock().unwrap_or_else(PoisonError::into_inner);
            match &mut *delivery {
                Delivery::Replaying(queue) => {
                    queue.push((message_id, payload.to_string()));
                    report.queued += 1;
                }
                Delivery::Live => match connection.send(payload) {
                    Ok(()) => report.delivered += 1,
                    Err(e) => {
                        tracing::debug!("[Chat] Send failed, pruning: {}", e);
                        report.pruned.push(connection.id());
                    }
                },
            }
        }

        for id in &report.pruned {
            self.deregister(*id);
        }

        report
    }

    /// End history replay for `id` and switch it to live delivery
    ///
    /// Queued frames whose message id is in `replayed` are dropped, the rest
    /// are sent in broadcast order. A connection that fails a send here is
    /// deregistered.
    ///
    /// # Returns
    ///
    /// Number of queued frames sent
    pub fn finish_replay(&self, id: ConnectionId, replayed: &HashSet<i64>) -> usize {
        let Some(member) = self.member(id) else {
            return 0;
        };

        let mut delivery = member.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        let queued = match std::mem::replace(&mut *delivery, Delivery::Live) {
            Delivery::Replaying(queued) => queued,
            Delivery::Live => return 0,
        };

        let mut flushed = 0;
        for (message_id, frame) in queued {
            if replayed.contains(&message_id) {
                continue;
            }
            if let Err(e) = member.connection.send(&frame) {
                tracing::debug!("[Chat] Flush failed, pruning: {}", e);
                drop(delivery);
                self.deregister(id);
                return flushed;
            }
            flushed += 1;
        }

        flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::chat::test_support::RecordingConnection;

    #[test]
    fn test_register_and_deregister() {
        let registry = ConnectionRegistry::new();
        let a = RecordingConnection::new();

        assert!(registry.register(a.clone()));
        assert!(registry.contains(a.id()));
        assert_eq!(registry.len(), 1);

        assert!(registry.deregister(a.id()));
        assert!(!registry.deregister(a.id()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_double_register_keeps_one_entry() {
        let registry = ConnectionRegistry::new();
        let a = RecordingConnection::new();

        assert!(registry.register(a.clone()));
        assert!(!registry.register(a.clone()));
        assert_eq!(registry.len(), 1);

        registry.broadcast(0, "once");
        assert_eq!(a.received(), vec!["once".to_string()]);
    }

    #[test]
    fn test_broadcast_reaches_every_member() {
        let registry = ConnectionRegistry::new();
        let members: Vec<_> = (0..3).map(|_| RecordingConnection::new()).collect();
        for member in &members {
            registry.register(member.clone());
        }

        let report = registry.broadcast(0, "hello");

        assert_eq!(report.delivered, 3);
        assert!(report.pruned.is_empty());
        for member in &members {
            assert_eq!(member.received(), vec!["hello".to_string()]);
        }
    }

    #[test]
    fn test_failing_connection_is_pruned_without_blocking_others() {
        let registry = ConnectionRegistry::new();
        let a = RecordingConnection::new();
        let b = RecordingConnection::new();
        let c = RecordingConnection::new();
        registry.register(a.clone());
        registry.register(b.clone());
        registry.register(c.clone());

        b.fail_sends();
        let report = registry.broadcast(0, "first");

        assert_eq!(report.delivered, 2);
        assert_eq!(report.pruned, vec![b.id()]);
        assert!(!registry.contains(b.id()));

        registry.broadcast(0, "second");
        assert_eq!(a.received(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(c.received(), vec!["first".to_string(), "second".to_string()]);
        assert!(b.received().is_empty());
    }

    #[test]
    fn test_closed_connection_is_pruned() {
        let registry = ConnectionRegistry::new();
        let a = RecordingConnection::new();
        registry.register(a.clone());

        a.close();
        let report = registry.broadcast(0, "nobody home");

        assert_eq!(report.delivered, 0);
        assert_eq!(report.pruned, vec![a.id()]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_register_during_broadcast() {
        let registry = ConnectionRegistry::new();
        let stable = RecordingConnection::new();
        registry.register(stable.clone());

        let writer = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let churn = RecordingConnection::new();
                    registry.register(churn.clone());
                    registry.deregister(churn.id());
                }
            })
        };

        for i in 0..200 {
            registry.broadcast(0, &i.to_string());
        }
        writer.join().unwrap();

        assert_eq!(stable.received().len(), 200);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_replaying_member_queues_until_finish() {
        let registry = ConnectionRegistry::new();
        let live = RecordingConnection::new();
        let joining = RecordingConnection::new();
        registry.register(live.clone());
        registry.register_replaying(joining.clone());

        let report = registry.broadcast(1, "m1");
        registry.broadcast(2, "m2");

        assert_eq!(report.delivered, 1);
        assert_eq!(report.queued, 1);
        assert!(joining.received().is_empty());
        assert!(registry.contains(joining.id()));

        let replayed: HashSet<i64> = [1].into_iter().collect();
        assert_eq!(registry.finish_replay(joining.id(), &replayed), 1);
        assert_eq!(joining.received(), vec!["m2".to_string()]);

        registry.broadcast(3, "m3");
        assert_eq!(joining.received(), vec!["m2".to_string(), "m3".to_string()]);
        assert_eq!(live.received().len(), 3);
    }

    #[test]
    fn test_finish_replay_is_one_shot() {
        let registry = ConnectionRegistry::new();
        let a = RecordingConnection::new();
        registry.register_replaying(a.clone());
        registry.broadcast(1, "m1");

        assert_eq!(registry.finish_replay(a.id(), &HashSet::new()), 1);
        assert_eq!(registry.finish_replay(a.id(), &HashSet::new()), 0);
        assert_eq!(a.received(), vec!["m1".to_string()]);
    }

    #[test]
    fn test_failed_flush_deregisters() {
        let registry = ConnectionRegistry::new();
        let a = RecordingConnection::new();
        registry.register_replaying(a.clone());
        registry.broadcast(1, "m1");

        a.fail_sends();

        assert_eq!(registry.finish_replay(a.id(), &HashSet::new()), 0);
        assert!(!registry.contains(a.id()));
    }

    #[test]
    fn test_finish_replay_for_unknown_connection() {
        let registry = ConnectionRegistry::new();
        let a = RecordingConnection::new();

        assert_eq!(registry.finish_replay(a.id(), &HashSet::new()), 0);
        assert!(registry.is_empty());
    }
}

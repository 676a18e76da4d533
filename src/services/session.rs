//! In-memory per-call transcript sessions.
//!
//! Live webhook events accumulate here keyed by call ID, with duplicate
//! suppression by (speaker, text). The store is bounded: once at capacity,
//! starting a new session evicts the oldest one.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

#[derive(Default)]
struct CallSession {
    lines: Vec<String>,
    seen: HashSet<(String, String)>,
}

pub struct SessionStore {
    max_sessions: usize,
    inner: Mutex<Sessions>,
}

#[derive(Default)]
struct Sessions {
    by_call: HashMap<String, CallSession>,
    // insertion order, for eviction
    order: VecDeque<String>,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            max_sessions: max_sessions.max(1),
            inner: Mutex::new(Sessions::default()),
        }
    }

    /// Appends one utterance to a call's session. Returns false if the same
    /// (speaker, text) pair was already recorded for that call.
    pub fn append(&self, call_id: &str, speaker: &str, text: &str) -> bool {
        let mut inner = self.inner.lock();
        if !inner.by_call.contains_key(call_id) {
            while inner.order.len() >= self.max_sessions {
                if let Some(evicted) = inner.order.pop_front() {
                    inner.by_call.remove(&evicted);
                }
            }
            inner.order.push_back(call_id.to_string());
            inner.by_call.insert(call_id.to_string(), CallSession::default());
        }

        let session = match inner.by_call.get_mut(call_id) {
            Some(s) => s,
            None => return false,
        };
        let key = (speaker.to_uppercase(), text.to_string());
        if session.seen.contains(&key) {
            return false;
        }
        session
            .lines
            .push(format!("[{}]: {}", speaker.to_uppercase(), text));
        session.seen.insert(key);
        true
    }

    /// Snapshot of one call's accumulated lines, in arrival order.
    pub fn snapshot(&self, call_id: &str) -> Vec<String> {
        self.inner
            .lock()
            .by_call
            .get(call_id)
            .map(|s| s.lines.clone())
            .unwrap_or_default()
    }

    /// Snapshot of every live session.
    pub fn snapshot_all(&self) -> BTreeMap<String, Vec<String>> {
        self.inner
            .lock()
            .by_call
            .iter()
            .map(|(id, s)| (id.clone(), s.lines.clone()))
            .collect()
    }

    /// Drops one call's session, e.g. after the end-of-call report arrived.
    pub fn remove(&self, call_id: &str) {
        let mut inner = self.inner.lock();
        inner.by_call.remove(call_id);
        inner.order.retain(|id| id != call_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_utterances_are_suppressed_per_call() {
        let store = SessionStore::new(8);
        assert!(store.append("call-1", "user", "hello"));
        assert!(!store.append("call-1", "user", "hello"));
        assert!(!store.append("call-1", "USER", "hello"));
        // same pair on a different call is not a duplicate
        assert!(store.append("call-2", "user", "hello"));
        assert_eq!(store.snapshot("call-1"), vec!["[USER]: hello"]);
    }

    #[test]
    fn lines_keep_arrival_order() {
        let store = SessionStore::new(8);
        store.append("call-1", "ai", "hi there");
        store.append("call-1", "user", "hello");
        store.append("call-1", "ai", "how are you");
        assert_eq!(
            store.snapshot("call-1"),
            vec!["[AI]: hi there", "[USER]: hello", "[AI]: how are you"]
        );
    }

    #[test]
    fn store_is_bounded_and_evicts_oldest() {
        let store = SessionStore::new(2);
        store.append("call-1", "user", "a");
        store.append("call-2", "user", "b");
        store.append("call-3", "user", "c");
        assert!(store.snapshot("call-1").is_empty());
        assert_eq!(store.snapshot("call-2"), vec!["[USER]: b"]);
        assert_eq!(store.snapshot("call-3"), vec!["[USER]: c"]);
        assert_eq!(store.snapshot_all().len(), 2);
    }

    #[test]
    fn remove_clears_the_session() {
        let store = SessionStore::new(2);
        store.append("call-1", "user", "a");
        store.remove("call-1");
        assert!(store.snapshot("call-1").is_empty());
        // removed id no longer counts toward the bound
        store.append("call-2", "user", "b");
        store.append("call-3", "user", "c");
        assert_eq!(store.snapshot_all().len(), 2);
    }
}

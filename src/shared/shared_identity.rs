use std::sync::{Arc, RwLock};

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct IdentityState {
    name: String,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// The process-wide display name. Clones share one cell; a `set` through any clone is
/// seen by every `get` and pushed to every subscriber.
///
/// Empty string means logged out.
#[derive(Clone, Default)]
pub struct SharedIdentity {
    // Arc lets us share ownership. RwLock lets us read/write safely.
    inner: Arc<RwLock<IdentityState>>,
}

impl SharedIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.read(|s| s.name.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.read(|s| !s.name.is_empty())
    }

    /// Stores `name` as-is and notifies every subscriber, even if unchanged.
    pub fn set(&self, name: impl Into<String>) {
        let name = name.into();
        // Listeners run outside the lock so they may call back into the cell.
        let listeners: Vec<Listener> = self.write(|s| {
            s.name = name.clone();
            s.listeners.iter().map(|(_, l)| l.clone()).collect()
        });
        for listener in listeners {
            listener(&name);
        }
    }

    /// Accepts any input that is non-empty after trimming; stores the trimmed name.
    pub fn login(&self, input: &str) -> bool {
        let name = input.trim();
        if name.is_empty() {
            return false;
        }
        self.set(name);
        true
    }

    pub fn logout(&self) {
        self.set(String::new());
    }

    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> SubscriptionId {
        self.write(|s| {
            let id = SubscriptionId(s.next_id);
            s.next_id += 1;
            s.listeners.push((id, Arc::new(listener)));
            id
        })
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.write(|s| s.listeners.retain(|(lid, _)| *lid != id));
    }

    pub fn subscriber_count(&self) -> usize {
        self.read(|s| s.listeners.len())
    }

    // Helpers to avoid manually locking everywhere. A poisoned lock still holds a
    // valid name, so recover it instead of panicking.
    fn read<R>(&self, f: impl FnOnce(&IdentityState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut IdentityState) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl std::fmt::Debug for SharedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedIdentity")
            .field("name", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn starts_logged_out() {
        let id = SharedIdentity::new();
        assert_eq!(id.get(), "");
        assert!(!id.is_logged_in());
    }

    #[test]
    fn clones_share_one_cell() {
        let a = SharedIdentity::new();
        let b = a.clone();
        a.set("alice");
        assert_eq!(b.get(), "alice");
        b.logout();
        assert_eq!(a.get(), "");
    }

    #[test]
    fn set_fans_out_to_every_subscriber() {
        let id = SharedIdentity::new();
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();

        for tag in ["header", "login"] {
            let seen = seen.clone();
            id.subscribe(move |name| seen.lock().unwrap().push(format!("{tag}:{name}")));
        }

        id.clone().set("alice");
        assert_eq!(*seen.lock().unwrap(), vec!["header:alice", "login:alice"]);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let id = SharedIdentity::new();
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        let sub = id.subscribe(move |_| *c.lock().unwrap() += 1);
        id.set("a");
        id.unsubscribe(sub);
        id.set("b");
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(id.subscriber_count(), 0);
    }

    #[test]
    fn listener_can_read_back_the_cell() {
        let id = SharedIdentity::new();
        let seen = Arc::new(Mutex::new(String::new()));
        let (cell, s) = (id.clone(), seen.clone());
        id.subscribe(move |_| *s.lock().unwrap() = cell.get());
        id.set("carol");
        assert_eq!(*seen.lock().unwrap(), "carol");
    }

    #[test]
    fn login_trims_and_rejects_blank() {
        let id = SharedIdentity::new();
        assert!(!id.login("   "));
        assert!(!id.is_logged_in());
        assert!(id.login("  alice \n"));
        assert_eq!(id.get(), "alice");
    }
}

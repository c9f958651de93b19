//! Per-section visibility for table-of-contents highlighting.
//!
//! Rendered blocks report whether they are on screen; the collector records the
//! section each visible block belongs to. A section is visible while at least
//! one of its blocks is.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Canonical section identity.
///
/// Blocks before the first h1/h2 belong to [`SectionKey::Untitled`], which can
/// never collide with a real heading key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Untitled,
    Heading(String),
}

impl From<Option<&str>> for SectionKey {
    fn from(key: Option<&str>) -> Self {
        match key {
            Some(key) => SectionKey::Heading(key.to_string()),
            None => SectionKey::Untitled,
        }
    }
}

impl From<&str> for SectionKey {
    fn from(key: &str) -> Self {
        SectionKey::Heading(key.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&VisibilityCollector) + Send + Sync>;

#[derive(Default)]
struct State {
    /// Visible block key -> section it reported under
    visible_blocks: HashMap<String, SectionKey>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

/// Shared visibility store for one rendered document.
///
/// Cloning yields another handle to the same store. Every state change is
/// applied under a single lock and listeners are notified after the lock is
/// released, one mutation at a time.
#[derive(Clone, Default)]
pub struct VisibilityCollector {
    state: Arc<Mutex<State>>,
}

impl std::fmt::Debug for VisibilityCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityCollector")
            .field("visible_sections", &self.visible_sections())
            .finish()
    }
}

impl VisibilityCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records whether `block_key` is on screen.
    ///
    /// Becoming visible adds the block under `section_key`; becoming hidden
    /// removes it. Reports that match the recorded state change nothing and
    /// do not notify listeners.
    pub fn report_visibility(&self, block_key: &str, section_key: Option<&str>, visible: bool) {
        self.report(block_key, SectionKey::from(section_key), visible);
    }

    fn report(&self, block_key: &str, section: SectionKey, visible: bool) {
        let listeners = {
            let mut state = self.lock();
            let changed = if visible {
                if state.visible_blocks.contains_key(block_key) {
                    false
                } else {
                    state.visible_blocks.insert(block_key.to_string(), section);
                    true
                }
            } else {
                state.visible_blocks.remove(block_key).is_some()
            };

            if !changed {
                return;
            }
            state
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect::<Vec<_>>()
        };

        for listener in listeners {
            listener(self);
        }
    }

    /// True while at least one block of the section is visible.
    pub fn get_visibility(&self, section_key: Option<&str>) -> bool {
        self.is_section_visible(&SectionKey::from(section_key))
    }

    pub fn is_section_visible(&self, section: &SectionKey) -> bool {
        self.lock().visible_blocks.values().any(|s| s == section)
    }

    /// Distinct sections with at least one visible block.
    pub fn visible_sections(&self) -> BTreeSet<SectionKey> {
        self.lock().visible_blocks.values().cloned().collect()
    }

    /// True when no block is currently reported visible.
    pub fn is_empty(&self) -> bool {
        self.lock().visible_blocks.is_empty()
    }

    /// Registers a listener called after every visibility change.
    ///
    /// Listeners run on the reporting thread and may query the collector.
    pub fn subscribe(
        &self,
        listener: impl Fn(&VisibilityCollector) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut state = self.lock();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().listeners.retain(|(existing, _)| *existing != id);
    }

    /// Starts tracking a mounted block.
    ///
    /// The returned handle reports visibility for the block and retracts it when
    /// dropped, so an unmounted block can never stay visible.
    pub fn track(&self, block_key: impl Into<String>, section: SectionKey) -> VisibilityHandle {
        VisibilityHandle {
            collector: self.clone(),
            block_key: block_key.into(),
            section,
        }
    }
}

/// Visibility reporter owned by one mounted block.
#[derive(Debug)]
pub struct VisibilityHandle {
    collector: VisibilityCollector,
    block_key: String,
    section: SectionKey,
}

impl VisibilityHandle {
    pub fn block_key(&self) -> &str {
        &self.block_key
    }

    pub fn section(&self) -> &SectionKey {
        &self.section
    }

    /// Feeds one transition of the viewport-intersection signal.
    pub fn set_visible(&self, visible: bool) {
        self.collector
            .report(&self.block_key, self.section.clone(), visible);
    }
}

impl Drop for VisibilityHandle {
    fn drop(&mut self) {
        self.collector
            .report(&self.block_key, self.section.clone(), false);
    }
}

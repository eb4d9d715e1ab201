//! Observable canonical color.
//!
//! # Architecture
//!
//! ```text
//! commit / slider / picker --replace--> SharedColor --notify--> subscribers
//!                                           |
//!                                     ArcSwap<Color>  (always OKLCh)
//! ```
//!
//! The stored color is replaced whole on every change, never mutated.
//! Subscribers run synchronously, in subscription order, on the thread
//! that called [`SharedColor::replace`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::color::{Color, FormatId, to_canonical_oklch};

/// Where a replacement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A committed text field.
    Field(FormatId),
    /// The alpha slider.
    Alpha,
    /// The color picker.
    Picker,
}

impl Origin {
    /// Whether this change was committed from `id`'s field.
    pub fn is_field(self, id: FormatId) -> bool {
        self == Origin::Field(id)
    }
}

/// Handle returned by [`SharedColor::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Color, Origin) + Send>;

pub struct SharedColor {
    current: ArcSwap<Color>,
    revision: AtomicU64,
    next_id: AtomicU64,
    /// Listeners must not call back into `replace`.
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
}

impl SharedColor {
    /// Start from `initial`, stored in OKLCh.
    pub fn new(initial: &Color) -> Self {
        Self {
            current: ArcSwap::from_pointee(to_canonical_oklch(initial).into_color()),
            revision: AtomicU64::new(0),
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    #[inline]
    pub fn current(&self) -> Arc<Color> {
        self.current.load_full()
    }

    /// Number of replacements so far.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Color, Origin) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Store `color` (converted to OKLCh) and notify every subscriber.
    pub fn replace(&self, color: &Color, origin: Origin) -> Arc<Color> {
        let canonical = Arc::new(to_canonical_oklch(color).into_color());
        self.current.store(Arc::clone(&canonical));
        self.revision.fetch_add(1, Ordering::Relaxed);

        for (_, listener) in self.listeners.lock().iter_mut() {
            listener(&canonical, origin);
        }
        canonical
    }
}

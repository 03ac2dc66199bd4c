//! Client-side interaction state for the generated pages.
//!
//! These are small, single-threaded state machines driven by discrete input
//! events and timestamps. The generator uses them to compute the initial
//! state it renders (track transforms, preload hints, `data-*` settings) and
//! the bundled `site.js` runtime follows the same transitions in the browser.
//!
//! | Module | Role |
//! |--------|------|
//! | [`swipe`] | Touch X coordinates → `Left` / `Right` / `None` |
//! | [`carousel`] | Bounded slide index with clamp or wrap policy |
//! | [`card`] | Hover / tap / long-press reveal for service cards |
//! | [`timer`] | Cancellable one-shot timer slots |
//! | [`listeners`] | RAII registration of page-level listeners |
//! | [`preload`] | Eager image warm-up tracking for the gallery |

pub mod card;
pub mod carousel;
pub mod listeners;
pub mod preload;
pub mod swipe;
pub mod timer;

pub use card::{CardEffect, CardState, CardTimings, Layout, RevealableCard};
pub use carousel::{BoundaryPolicy, Carousel};
pub use listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
pub use preload::{ImagePair, PreloadCache, PreloadRequest, Side};
pub use swipe::{SwipeDetector, SwipeDirection};
pub use timer::{Millis, TimerHandle, TimerSlot};

//! shellmotion is the scroll-driven motion layer of a single-page launch shell.
//!
//! It binds a fixed set of effects to a mounted view and guarantees they are torn
//! down completely when the view goes away:
//!
//! - the hero title is split into per-character units that enter with a stagger,
//! - the hero visual, content sections and device mockups are scrubbed by scroll
//!   position through a trigger window,
//! - cards tilt in 3D under the pointer and settle back when it leaves.
//!
//! # Architecture
//!
//! 1. **Document seam**: every page operation goes through the [`dom::Dom`] trait.
//!    [`MemoryDom`] is a deterministic headless document; `dom::web::WebDom`
//!    (feature `web`) targets a browser.
//! 2. **Runtime**: [`MotionRuntime`] owns time-based players and scroll observers,
//!    each tagged with the [`ScopeId`] that created it. Hosts drive it with
//!    `tick`, `on_scroll` and `on_resize`.
//! 3. **Shell**: [`RootScope`] registers the effects for one mount and reverts them
//!    (plus its raw pointer listeners) on disposal. [`ViewLifecycle`] keeps one live
//!    scope per view.
//!
//! Everything is single-threaded; shared state lives in `Rc<RefCell<_>>` and event
//! handlers only hold weak references.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod runtime;
mod shell;

/// Document seam and its backends.
pub mod dom;

pub use animation::ease::Ease;
pub use animation::state::{Lerp, PropertySet, VisualState};
pub use animation::tween::{Player, TweenSpec, stagger_offsets};
pub use dom::memory::{ElementFixture, ElementSnapshot, MemoryDom, PageFixture};
pub use dom::{Dom, ElementId, EventKind, Listener, ListenerId, PointerEvent, ScrollBehavior};
pub use foundation::core::{Point, Rect, Vec2, Viewport};
pub use foundation::error::{MotionError, MotionResult};
pub use runtime::scroll::{Edge, ScrollTriggerWindow, TriggerBounds, TriggerPosition};
pub use runtime::timeline::{
    EffectId, MotionRuntime, ObserveSpec, RevertPolicy, RuntimeHandle, ScopeId, WeakRuntime,
};
pub use shell::config::{
    EntranceConfig, RoleNames, ScrollEffectConfig, ShellConfig, SplitConfig, TiltConfig,
};
pub use shell::entrance::EntranceAnimator;
pub use shell::nav::scroll_to_target;
pub use shell::registry::{EffectHandle, EffectRegistry, EffectRole};
pub use shell::reveal::{AlternateSide, ScrollLinkedAnimator};
pub use shell::scope::{RawListenerBinding, RootScope, ViewLifecycle};
pub use shell::split::{SplitText, TextSplitter};
pub use shell::tilt::{TiltController, TiltState};

//! tickmark core runtime
//!
//! This crate provides the foundational primitives shared by the tickmark
//! crates:
//!
//! - **Colors**: a small linear RGBA color type with CSS-name and hex parsing
//! - **Store**: a synchronous action store with ordered, snapshot-based
//!   subscriber notification
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tickmark_core::store::{Reducer, Store};
//!
//! struct Counter;
//!
//! enum CounterAction {
//!     Init,
//!     Increment,
//! }
//!
//! impl Reducer for Counter {
//!     type State = u32;
//!     type Action = CounterAction;
//!
//!     fn init_action(&self) -> CounterAction {
//!         CounterAction::Init
//!     }
//!
//!     fn reduce(&self, state: &Arc<u32>, action: &CounterAction) -> Arc<u32> {
//!         match action {
//!             CounterAction::Increment => Arc::new(**state + 1),
//!             CounterAction::Init => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! let store = Store::new(Counter, 0);
//! let subscription = store.subscribe(|change| {
//!     println!("count is now {}", change.current);
//! });
//!
//! store.dispatch(CounterAction::Increment);
//! assert_eq!(*store.get_state(), 1);
//! subscription.unsubscribe();
//! ```

pub mod color;
pub mod store;

pub use color::{Color, ColorParseError};
pub use store::{Change, Reducer, Store, Subscription};

//! Tic-tac-toe against a greedy computer opponent, with outcome
//! notifications relayed to a chat.
//!
//! # Architecture
//!
//! - **Controller**: one session, two-phase turns, end-of-game reporting
//! - **Notifier**: fire-and-forget delivery of win/loss messages
//! - **Relay**: HTTP server forwarding messages to the chat API
//! - **Terminal**: line-based front-end for the controller
//!
//! Game rules and the opponent live in the `ttt_core` crate.
//!
//! # Example
//!
//! ```no_run
//! use ttt_promo::{GameConfig, GameController, ImmediateScheduler, RecordingNotifier, TurnReport};
//!
//! # async fn example() {
//! let notifier = RecordingNotifier::new();
//! let mut controller = GameController::new(
//!     notifier.clone(),
//!     ImmediateScheduler,
//!     rand::thread_rng(),
//!     GameConfig::default(),
//! );
//! let report = controller.play_human_turn(4).await;
//! assert!(matches!(report, TurnReport::ComputerMoved(_)));
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod notifier;
pub mod relay;
mod reward;
mod scheduler;
pub mod terminal;

// Crate-level exports - Configuration
pub use config::{API_BASE_VAR, BOT_TOKEN_VAR, CHAT_ID_VAR, ConfigError, GameConfig, RelayConfig};

// Crate-level exports - Controller
pub use controller::{GameController, GameReport, IgnoreReason, Phase, Session, TurnReport};

// Crate-level exports - Notifications
pub use notifier::{
    HttpNotifier, NoopNotifier, Notifier, NotifyError, RecordingNotifier, RelayReply,
    SendMessageRequest,
};

// Crate-level exports - Rewards
pub use reward::{generate_promo_code, loss_notification, win_notification};

// Crate-level exports - Scheduling
pub use scheduler::{ImmediateScheduler, Scheduler, TokioScheduler};

// Crate-level exports - Relay errors
pub use relay::{RelayError, RelayErrorKind};

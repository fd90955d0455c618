//! mjsonwp - Android commands over the Mobile JSON Wire Protocol.
//!
//! Maps typed method calls (keyboard visibility, key events, key presses with
//! modifier bitmasks, element value manipulation) onto the session-scoped
//! HTTP endpoints an Appium server exposes, and decodes the `value` of each
//! JSON response.
//!
//! ```no_run
//! # async fn demo() -> Result<(), mjsonwp::Error> {
//! use mjsonwp::{flags, Dispatcher, HttpTransport, KeyPress, SessionId};
//!
//! let transport = HttpTransport::new("http://127.0.0.1:4723/wd/hub".parse().unwrap())?;
//! let driver = Dispatcher::new(transport, SessionId::new("1234")?);
//! driver
//!     .press_keycode(KeyPress::new(86).metastate([flags::meta::SHIFT_ON]))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod android;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod flags;
pub mod keys;
pub mod session;
pub mod transport;

pub use android::{HideKeyboardStrategy, KeyPress};
pub use dispatch::Dispatcher;
pub use error::Error;
pub use session::{ElementId, SessionId};
pub use transport::{HttpTransport, Transport};

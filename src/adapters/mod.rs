//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements            | Connects to                  |
//! |-------------|-----------------------|------------------------------|
//! | `gpio`      | InputPort, OutputPort | any embedded-hal digital pin |
//! | `rpi`       | (pin bring-up)        | Raspberry Pi GPIO via rppal  |
//! | `log_sink`  | EventSink             | `log` facade                 |
//! | `telegram`  | Notifier              | Telegram Bot API             |
//! | `time`      | TimePort, DelayNs     | host monotonic clock         |

pub mod gpio;
pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod telegram;
pub mod time;

//! Sectioned JSON configuration store.
//!
//! A configuration document is one JSON object whose keys name sections:
//!
//! ```json
//! {"log": {"file": "example.log"}, "server": {"port": 8088}}
//! ```
//!
//! Loading keeps every section as raw JSON text. Each section is decoded only
//! when asked for, into whatever type the caller names.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct LogConfig {
//!     file: String,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct ServerConfig {
//!     port: u16,
//! }
//!
//! let mut store = configs::Store::new();
//! store.load_from_str(r#"{"log": {"file": "example.log"}, "server": {"port": 8088}}"#)?;
//!
//! let log: LogConfig = store.get("log")?;
//! assert_eq!(log.file, "example.log");
//!
//! let mut server = ServerConfig { port: 80 };
//! store.get_into("server", Some(&mut server))?;
//! assert_eq!(server.port, 8088);
//!
//! let err = store.get::<LogConfig>("nope").unwrap_err();
//! assert!(err.is_not_found());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod shared;
mod store;

pub use error::{GetError, LoadError};
pub use serde_json::value::RawValue;
pub use shared::SharedStore;
pub use store::Store;

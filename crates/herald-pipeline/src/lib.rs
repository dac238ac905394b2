//! Message delivery for Herald.
//!
//! [`MessagePipeline`] ties the other crates together: it looks a
//! [`MessageRecord`](herald_core::MessageRecord) up in a [`RecordSource`],
//! skips it while the recipient's cooldown is running, resolves its macros
//! with a [`MacroReplacer`](herald_macro::MacroReplacer), hands the result
//! to the [`MessageSender`] for the record's channel, and finally starts the
//! cooldown.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use herald_config::Config;
//! use herald_core::{MessageRecord, Recipient, RecordKey};
//! use herald_pipeline::{MemoryRecordSource, MessagePipeline, SendOutcome};
//!
//! #[derive(Default)]
//! struct Console(Mutex<Vec<String>>);
//!
//! impl Recipient for Console {
//!     fn name(&self) -> &str { "CONSOLE" }
//!     fn send_message(&self, message: &str) {
//!         self.0.lock().unwrap().push(message.to_owned());
//!     }
//! }
//!
//! let source = MemoryRecordSource::new().with_record(
//!     MessageRecord::new(RecordKey::new("SCORE").unwrap())
//!         .with_message("%PLAYER% scored %POINTS%"),
//! );
//! let pipeline = MessagePipeline::new(Arc::new(Config::default()), Arc::new(source));
//!
//! let console = Arc::new(Console::default());
//! let recipient: Arc<dyn Recipient> = console.clone();
//! let outcome = pipeline
//!     .send_str(&recipient, "SCORE", |ctx| ctx.bind("POINTS", 12))
//!     .unwrap();
//!
//! assert_eq!(outcome, SendOutcome::Sent);
//! assert_eq!(*console.0.lock().unwrap(), vec!["CONSOLE scored 12"]);
//! ```

mod error;
mod pipeline;
mod sender;
mod source;

pub use error::PipelineError;
pub use pipeline::{MessagePipeline, SendOutcome};
pub use sender::{ChatSender, MessageSender, TitleSender};
pub use source::{MemoryRecordSource, RecordSource};

//! Core data types exchanged between pipeline stages

pub mod answer;
pub mod email;
pub mod retrieval;

pub use answer::{Answer, IngestReport, ReplyDraft};
pub use email::{EmailRecord, Mailbox};
pub use retrieval::RetrievedEmail;

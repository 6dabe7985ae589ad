//! Answer generation: prompt assembly, composition, and reply drafting

pub mod composer;
pub mod drafter;
pub mod prompt;

pub use composer::AnswerComposer;
pub use drafter::ReplyDrafter;
pub use prompt::PromptBuilder;

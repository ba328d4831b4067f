//! Quizsmith external services
//!
//! Clients for the hosted services a quiz request depends on. Today that is the
//! chat-completion API that writes the quiz.

pub mod completion;

pub use completion::{CompletionProvider, OpenAiCompletionClient};

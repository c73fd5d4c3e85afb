pub mod detail_fetcher;
pub mod question_resolver;
pub mod submission;
pub mod variant_dispatcher;

pub use detail_fetcher::{fetch_detail, DetailFetcher, DetailTicket};
pub use question_resolver::{find_by_ordinal, parse_ordinal, QuestionResolver, Resolution};
pub use submission::{
    prepare_submission, send_submission, SubmissionCoordinator, SubmissionRequest, SubmitOutcome,
    SubmitRejection,
};
pub use variant_dispatcher::{dispatch, Dispatch, LoggingTypingHandler, TypingHandler, TypingHandoff};

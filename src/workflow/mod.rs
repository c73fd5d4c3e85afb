pub mod navigation;
pub mod question_ctx;
pub mod question_flow;

pub use navigation::{Destination, Navigator, RecordingNavigator};
pub use question_ctx::QuestionCtx;
pub use question_flow::{AssetLink, DetailState, QuestionFlow, QuestionView, Screen};

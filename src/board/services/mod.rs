//! Application services for the chore board.

mod board;
mod daily;
mod error;

pub use board::BoardService;
pub use daily::DailyTaskGenerator;
pub use error::{BoardServiceError, BoardServiceResult, MutationOutcome, StatusChangeOutcome};

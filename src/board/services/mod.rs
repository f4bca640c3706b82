//! Application services for board ordering and lifecycle orchestration.

mod assignment;
mod board;
mod cycles;
mod error;
mod placement;
mod queries;
mod reorder;
mod requests;

pub use board::BoardService;
pub use error::{BoardServiceError, BoardServiceResult};
pub use requests::{
    BoardLane, CreateTaskRequest, MoveTaskRequest, ProvisionCycleRequest, ProvisionedCycle,
    UpdateCycleRequest,
};

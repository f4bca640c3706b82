//! In-memory board adapters for tests and local tooling.

mod board;

pub use board::InMemoryBoardRepository;

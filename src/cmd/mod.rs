//! CLI command implementations.
//!
//! | Module  | Commands handled                              |
//! |---------|-----------------------------------------------|
//! | `serve` | `Serve`                                       |
//! | `board` | `Generate`, `Board`, `Move`, `Delete`, `Clear`|

pub mod board;
pub mod serve;

pub use board::{cmd_board, cmd_clear, cmd_delete, cmd_generate, cmd_move};
pub use serve::cmd_serve;

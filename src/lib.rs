//! # Design Patterns
//!
//! Classic object-oriented design patterns, each reworked as a small
//! self-contained Rust module with a toy scenario.
//!
//! ## Patterns Covered
//!
//! 1. **Creational**
//!    - Factory Method: cross-platform terminal commands
//!    - Builder: line-drawing API with a shape director
//!    - Singleton: process-wide file logger
//!
//! 2. **Structural**
//!    - Monad: an optional value with `map` / `and_then`
//!    - Decorator: codecs stacked over a data source
//!
//! 3. **Behavioral**
//!    - Chain of Responsibility: API request handler chain
//!    - Iterator: iterative in-order tree traversal
//!    - Observer: drag-and-drop mouse listeners
//!
//! ## Running Examples
//!
//! ```bash
//! cargo run --bin patterns -- list
//! cargo run --bin patterns -- run builder
//! cargo run --bin patterns -- run --all
//! ```

pub mod behavioral;
pub mod catalog;
pub mod config;
pub mod creational;
pub mod logging;
pub mod structural;

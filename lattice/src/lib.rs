//! Lattice evolution engine for elementary (1-D) automata and Conway's Game of Life.
//!
//! The engine never touches pixels. A front end calls into it, gets a grid back
//! and draws it however it likes.
//!
//! ```
//! use lattice::{elementary, Boundary, LifeGrid, RuleTable};
//!
//! let rule = RuleTable::decode(90).unwrap();
//! let mut row = elementary::reset(11);
//! row[5] = true;
//! let next = elementary::step(&row, &rule, Boundary::Periodic);
//! assert!(next[4] && next[6] && !next[5]);
//!
//! let mut life = LifeGrid::new(6, 6);
//! life.set(2, 1, true).unwrap();
//! life.set(2, 2, true).unwrap();
//! life.set(2, 3, true).unwrap();
//! assert_eq!(life.step().population(), 3);
//! ```

pub mod config;
pub mod elementary;
pub mod error;
pub mod grid;
pub mod life;
pub mod messages;
pub mod patterns;
pub mod rule;
pub mod runner;
pub mod state;

pub use config::Config;
pub use elementary::{Boundary, OneDimGrid};
pub use error::{LatticeError, Result};
pub use grid::Grid;
pub use life::{Direction, LifeGrid, Viewport};
pub use messages::{Level, Message, MessageLog};
pub use patterns::{Pattern, PATTERNS};
pub use rule::RuleTable;
pub use runner::{RunControl, Steppable};
pub use state::{ElementaryState, LifeState};

//! Week board model: lanes over the flat task list

mod lane;
mod view;
mod week;

pub use lane::{lane_key_order, partition_lanes, reorder_by_move, LaneKey, MoveRequest};
pub use view::{entries_by_day, BoardView, DateGroup};
pub use week::Week;

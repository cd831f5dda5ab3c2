mod mutex;
mod shared;

use mutex::*;
pub use shared::*;

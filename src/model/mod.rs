pub mod analysis;
pub mod date;
pub mod event;
pub mod round;
pub mod score;
pub mod season;
pub mod utils;

pub use analysis::*;
pub use date::*;
pub use event::*;
pub use round::*;
pub use score::*;
pub use season::*;
pub use utils::*;

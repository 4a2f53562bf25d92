pub mod history;
pub mod profile;
pub mod recommendation;
pub mod route;
pub mod weather;

pub use history::*;
pub use profile::*;
pub use recommendation::*;
pub use route::*;
pub use weather::*;

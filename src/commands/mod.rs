pub mod create;
pub mod delete;
pub mod move_files;
pub mod rename;
pub mod stage;
pub mod status;
pub mod watch;

pub use create::*;
pub use delete::*;
pub use move_files::*;
pub use rename::*;
pub use stage::*;
pub use status::*;
pub use watch::*;

//! Interactive menu: options, session state and the prompt loop

pub mod options;
pub mod session;

pub use options::MenuOption;
pub use session::{run_menu, Session, World};

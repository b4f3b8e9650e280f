//! Pieces shared by every crate in the workspace: logging setup and the small
//! response shapes that are not tied to a collection.

pub mod types;

pub mod utils {
    pub mod logging;
}

pub mod check;
pub mod context;
pub mod edit;
pub mod init;
pub mod inspect;

pub use check::{check, fmt, CheckArgs, FmtArgs};
pub use context::Context;
pub use edit::{
    add, move_node, remove, reorder, set, unset, AddArgs, MoveArgs, RemoveArgs, ReorderArgs,
    SetArgs, UnsetArgs,
};
pub use init::{init, InitArgs};
pub use inspect::{tree, types, TreeArgs, TypesArgs};

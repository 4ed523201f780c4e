//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss
//! sowie die Speicher-Aufträge an den Host.

mod command;
mod commit;
mod intent;

pub use command::AppCommand;
pub use commit::{CommitKind, CommitRecord, CommitRequest};
pub use intent::AppIntent;

pub use wayfare_types::prelude::*;

// vim: ts=4

mod injector;
mod raw_input;

pub use {
    injector::InputInjector,
    raw_input::{RawInput, RawInputKind},
};

mod atomic_write;
mod codec;
mod recording_file;

pub use atomic_write::write_atomic;
pub use codec::{load_recording, save_recording};
pub use recording_file::FORMAT_VERSION;

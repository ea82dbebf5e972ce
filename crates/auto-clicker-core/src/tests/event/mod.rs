mod input_event;
mod settings;

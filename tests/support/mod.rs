pub mod recording_port;

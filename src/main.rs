mod app;
mod catalog;
mod config;
mod fetch;
mod runtime;
mod store;
mod transport;
mod ui;
mod waveform;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}

use console_frontend::{App, logging};
use tracing::error;

fn main() {
    logging::init_logging();

    match App::start() {
        // The app lives as long as the page
        Ok(app) => std::mem::forget(app),
        Err(e) => error!("Failed to start console: {e}"),
    }
}

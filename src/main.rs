use anyhow::Result;
use camera_enumerator::{
    config::Config,
    listing::write_listing,
    logging::init_logging,
    platform_enumerator
};
use std::io::{stdout, Write};
use tracing::debug;

fn main() -> Result<()> { // Note, this is anyhow::Result
    let config = Config::default();
    init_logging(&config.logging);

    let enumerator = platform_enumerator(&config);
    debug!(backend = enumerator.backend_name(), "enumerating capture devices");

    let devices = enumerator.find_capture_devices()?;

    let mut out = stdout().lock();
    write_listing(&mut out, &devices)?;
    out.flush()?;
    Ok(())
}

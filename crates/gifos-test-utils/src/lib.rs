pub mod decode;
pub mod fixtures;

pub use decode::{DecodedAnimation, DecodedFrame};
pub use fixtures::TestFixtures;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("gifos=debug,gifos_anim=debug")),
            )
            .with_test_writer()
            .init();
    });
}
